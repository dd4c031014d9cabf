use crate::color::ColorScheme;
use crate::design::{Design, DesignKind};
use crate::ico;
use crate::image::LogoImage;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

//===========================================================================//

/// The output size used when none is chosen.
pub const DEFAULT_SIZE: u32 = 256;

//===========================================================================//

/// Everything the UI layer lets the user choose for a procedural logo.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogoSettings {
    /// Which procedural design to draw
    pub design: DesignKind,
    /// Colors to draw it in
    pub colors: ColorScheme,
    /// Output width and height, in pixels
    pub size: u32,
}

impl Default for LogoSettings {
    fn default() -> LogoSettings {
        LogoSettings {
            design: DesignKind::default(),
            colors: ColorScheme::default(),
            size: DEFAULT_SIZE,
        }
    }
}

impl LogoSettings {
    /// Returns the procedural design these settings select.
    pub fn design(&self) -> Design {
        self.design.design()
    }

    /// Renders the selected design.
    pub fn render(&self) -> io::Result<LogoImage> {
        self.design().render(self.size, &self.colors)
    }

    /// Renders the selected design and encodes it as a PNG file.
    pub fn export_png(&self) -> io::Result<Vec<u8>> {
        export_png(&self.design(), &self.colors, self.size)
    }

    /// Renders the selected design and encodes it as an ICO file.
    pub fn export_ico(&self) -> io::Result<Vec<u8>> {
        export_ico(&self.design(), &self.colors, self.size)
    }
}

//===========================================================================//

/// The file formats a logo can be exported as.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum ExportFormat {
    /// A PNG image at the full output size
    Png,
    /// A single-entry ICO file wrapping a PNG image
    Ico,
}

impl ExportFormat {
    /// Picks a format from a file path's extension (case-insensitive).
    /// Returns `None` for any extension other than `png` or `ico`.
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("png") {
            Some(ExportFormat::Png)
        } else if extension.eq_ignore_ascii_case("ico") {
            Some(ExportFormat::Ico)
        } else {
            None
        }
    }

    /// Returns the name a downloaded file in this format gets by default.
    pub fn default_file_name(self) -> &'static str {
        match self {
            ExportFormat::Png => "logo.png",
            ExportFormat::Ico => "logo.ico",
        }
    }

    /// Returns the MIME type of this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Ico => "image/x-icon",
        }
    }

    /// Renders `design` and encodes it in this format.
    pub fn export(
        self,
        design: &Design,
        colors: &ColorScheme,
        size: u32,
    ) -> io::Result<Vec<u8>> {
        match self {
            ExportFormat::Png => export_png(design, colors, size),
            ExportFormat::Ico => export_ico(design, colors, size),
        }
    }
}

//===========================================================================//

/// Renders `design` at `size` pixels and encodes it as a PNG file.
pub fn export_png(
    design: &Design,
    colors: &ColorScheme,
    size: u32,
) -> io::Result<Vec<u8>> {
    design.render(size, colors)?.encode_png()
}

/// Renders `design` at `size` pixels and wraps the PNG encoding in an ICO
/// file.  Sizes above 256 are still rendered at full size, but the ICO
/// directory entry declares 256.
pub fn export_ico(
    design: &Design,
    colors: &ColorScheme,
    size: u32,
) -> io::Result<Vec<u8>> {
    let png_data = export_png(design, colors, size)?;
    ico::encode(&png_data, size)
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{ExportFormat, LogoSettings, DEFAULT_SIZE};
    use crate::design::DesignKind;
    use std::path::Path;

    #[test]
    fn default_settings() {
        let settings = LogoSettings::default();
        assert_eq!(settings.design, DesignKind::Gear);
        assert_eq!(settings.size, DEFAULT_SIZE);
    }

    #[test]
    fn export_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out/logo.PNG")),
            Some(ExportFormat::Png)
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("favicon.ico")),
            Some(ExportFormat::Ico)
        );
        assert_eq!(ExportFormat::from_path(Path::new("logo.svg")), None);
        assert_eq!(ExportFormat::from_path(Path::new("logo")), None);
    }

    #[test]
    fn default_file_names() {
        assert_eq!(ExportFormat::Png.default_file_name(), "logo.png");
        assert_eq!(ExportFormat::Ico.default_file_name(), "logo.ico");
        assert_eq!(ExportFormat::Ico.mime_type(), "image/x-icon");
    }

    #[test]
    fn render_uses_settings_size() {
        let settings = LogoSettings { size: 48, ..LogoSettings::default() };
        let image = settings.render().unwrap();
        assert_eq!(image.width(), 48);
        assert_eq!(image.height(), 48);
    }
}

//===========================================================================//
