//! A library for rendering simple procedural logos and exporting them as PNG
//! or ICO files.
//!
//! Three designs are drawn procedurally (a gear with network nodes, a chip,
//! and a hexagon); a decoded raster image or SVG text can stand in for them.
//! The ICO export wraps the rendered PNG in a single-entry icon file:
//!
//! ```no_run
//! let settings = logoico::LogoSettings {
//!     design: logoico::DesignKind::Hex,
//!     size: 64,
//!     ..logoico::LogoSettings::default()
//! };
//! let ico_data = settings.export_ico().unwrap();
//! std::fs::write("logo.ico", ico_data).unwrap();
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod color;
mod design;
mod ico;
mod image;
mod restype;
mod settings;

pub use crate::color::{ColorScheme, Rgb, BACKGROUND_PALETTE};
pub use crate::design::{gear_svg, Design, DesignKind, MAX_RENDER_SIZE};
pub use crate::ico::{
    encode, IcoContainer, IcoDirectoryEntry, ENTRY_LEN, HEADER_LEN,
    MAX_ICON_SIZE,
};
pub use crate::image::LogoImage;
pub use crate::restype::ResourceType;
pub use crate::settings::{
    export_ico, export_png, ExportFormat, LogoSettings, DEFAULT_SIZE,
};
