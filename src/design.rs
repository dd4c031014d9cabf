use crate::color::{ColorScheme, Rgb};
use crate::image::LogoImage;
use resvg::tiny_skia::{
    self, FillRule, FilterQuality, Paint, Path, PathBuilder, Pixmap,
    PixmapPaint, Rect, Stroke, Transform,
};
use resvg::usvg;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;
use std::io;
use std::str::FromStr;

//===========================================================================//

/// The largest width/height that `Design::render` will produce.
pub const MAX_RENDER_SIZE: u32 = 4096;

// Control-point distance for approximating a quarter circle with a cubic.
const KAPPA: f32 = 0.552_284_8;

// The gear's rotation, in degrees.
const GEAR_ROTATION: f32 = -22.5;
const GEAR_TEETH: usize = 12;

// The side length the editable gear SVG is laid out at.
const SVG_CANVAS_SIZE: f32 = 256.0;

//===========================================================================//

/// The procedurally drawn designs, by name.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "lowercase")
)]
pub enum DesignKind {
    /// A gear with three network nodes
    #[default]
    Gear,
    /// A chip with pads and traces
    Chip,
    /// A hexagon with nodes on its corners
    Hex,
}

impl DesignKind {
    /// All procedural designs, in display order.
    pub const ALL: [DesignKind; 3] =
        [DesignKind::Gear, DesignKind::Chip, DesignKind::Hex];

    /// Returns the design's lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            DesignKind::Gear => "gear",
            DesignKind::Chip => "chip",
            DesignKind::Hex => "hex",
        }
    }

    /// Returns the procedural design of this kind.
    pub fn design(self) -> Design {
        match self {
            DesignKind::Gear => Design::Gear,
            DesignKind::Chip => Design::Chip,
            DesignKind::Hex => Design::Hex,
        }
    }
}

impl FromStr for DesignKind {
    type Err = io::Error;

    fn from_str(string: &str) -> io::Result<DesignKind> {
        for kind in DesignKind::ALL {
            if string.eq_ignore_ascii_case(kind.name()) {
                return Ok(kind);
            }
        }
        invalid_input!(
            "Unknown design {:?} (expected gear, chip or hex)",
            string
        );
    }
}

impl fmt::Display for DesignKind {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

//===========================================================================//

/// A logo design, carrying whatever its renderer needs.
#[derive(Clone, Debug)]
pub enum Design {
    /// The gear/network motif, drawn procedurally
    Gear,
    /// The chip motif, drawn procedurally
    Chip,
    /// The hexagon motif, drawn procedurally
    Hex,
    /// A decoded raster image, scaled to fill the output
    Image(LogoImage),
    /// SVG document text, scaled to fill the output
    Svg(String),
}

impl Design {
    /// Returns a short name for the design.
    pub fn name(&self) -> &'static str {
        match self {
            Design::Gear => DesignKind::Gear.name(),
            Design::Chip => DesignKind::Chip.name(),
            Design::Hex => DesignKind::Hex.name(),
            Design::Image(_) => "image",
            Design::Svg(_) => "svg",
        }
    }

    /// Draws the design into a new `size` by `size` image over the scheme's
    /// background color.  Returns an `InvalidInput` error if `size` is zero
    /// or larger than `MAX_RENDER_SIZE`, and an `InvalidData` error if SVG
    /// text can't be parsed.
    pub fn render(
        &self,
        size: u32,
        colors: &ColorScheme,
    ) -> io::Result<LogoImage> {
        if size < 1 || size > MAX_RENDER_SIZE {
            invalid_input!(
                "Invalid render size (was {}, but must be 1 to {})",
                size,
                MAX_RENDER_SIZE
            );
        }
        log::debug!("Rendering {} design at {}x{}", self.name(), size, size);
        let mut pixmap = new_pixmap(size, size)?;
        pixmap.fill(solid(colors.background));
        let mut canvas = Canvas { pixmap: &mut pixmap, size: size as f32 };
        match self {
            Design::Gear => canvas.draw_gear(colors),
            Design::Chip => canvas.draw_chip(colors),
            Design::Hex => canvas.draw_hex(colors),
            Design::Image(image) => canvas.draw_image(image)?,
            Design::Svg(text) => canvas.draw_svg(text)?,
        }
        Ok(pixmap_to_image(&pixmap))
    }
}

//===========================================================================//

struct Canvas<'a> {
    pixmap: &'a mut Pixmap,
    size: f32,
}

impl<'a> Canvas<'a> {
    fn draw_gear(&mut self, colors: &ColorScheme) {
        let s = self.size;
        let center = s / 2.0;
        let radius = s * 0.22;
        let frame = Transform::from_translate(center, center)
            .pre_rotate(GEAR_ROTATION);
        let primary = paint(colors.primary);
        for (x, y) in gear_teeth(radius) {
            if let Some(rect) = Rect::from_xywh(x - 4.0, y - 4.0, 8.0, 8.0) {
                self.pixmap.fill_rect(rect, &primary, frame, None);
            }
        }
        self.fill_circle(0.0, 0.0, radius, colors.primary, frame);
        self.fill_circle(0.0, 0.0, radius * 0.45, Rgb::WHITE, frame);
        for (x, y) in gear_nodes(center, radius) {
            self.stroke_line((center, center), (x, y), 3.0, colors.secondary);
            self.fill_circle(
                x,
                y,
                s * 0.06,
                colors.secondary,
                Transform::identity(),
            );
        }
    }

    fn draw_chip(&mut self, colors: &ColorScheme) {
        let s = self.size;
        let margin = s * 0.12;
        let (x, y) = (margin, margin);
        let (w, h) = (s - margin * 2.0, s - margin * 2.0);
        self.fill_path(rounded_rect(x, y, w, h, 12.0), colors.primary);
        let inset = s * 0.06;
        self.fill_path(
            rounded_rect(x + inset, y + inset, w - s * 0.12, h - s * 0.12, 8.0),
            Rgb::WHITE,
        );
        let pad_count = 6;
        for index in 0..pad_count {
            let px = x + (index as f32 + 0.5) * (w / pad_count as f32);
            let top = (y + inset, y - s * 0.02 + s * 0.2);
            let bottom = (y + h - inset, y + h + s * 0.02 - s * 0.2);
            self.stroke_line((px, top.0), (px, top.1), 2.0, colors.secondary);
            self.stroke_line(
                (px, bottom.0),
                (px, bottom.1),
                2.0,
                colors.secondary,
            );
        }
        let middle = y + h * 0.5;
        self.stroke_line(
            (x + w * 0.2, middle),
            (x + w * 0.8, middle),
            2.0,
            colors.secondary,
        );
        for index in 0..3 {
            let offset = (index as f32 - 1.0) * 8.0;
            self.fill_circle(
                x + w * 0.5,
                middle - offset,
                4.0,
                colors.secondary,
                Transform::identity(),
            );
        }
    }

    fn draw_hex(&mut self, colors: &ColorScheme) {
        let s = self.size;
        let center = s / 2.0;
        let radius = s * 0.28;
        let corners = hex_corners(center, radius);
        let mut builder = PathBuilder::new();
        for (index, &(x, y)) in corners.iter().enumerate() {
            if index == 0 {
                builder.move_to(x, y);
            } else {
                builder.line_to(x, y);
            }
        }
        builder.close();
        self.fill_path(builder.finish(), colors.primary);
        for &(x, y) in corners.iter() {
            self.fill_circle(
                x,
                y,
                s * 0.045,
                colors.secondary,
                Transform::identity(),
            );
        }
        for (x, y) in hex_corners(center, radius * 0.7) {
            self.stroke_line((center, center), (x, y), 3.0, colors.secondary);
        }
    }

    fn draw_image(&mut self, image: &LogoImage) -> io::Result<()> {
        let mut source = new_pixmap(image.width(), image.height())?;
        for (pixel, rgba) in source
            .pixels_mut()
            .iter_mut()
            .zip(image.rgba_data().chunks_exact(4))
        {
            *pixel =
                tiny_skia::ColorU8::from_rgba(rgba[0], rgba[1], rgba[2], rgba[3])
                    .premultiply();
        }
        let transform = Transform::from_scale(
            self.size / image.width() as f32,
            self.size / image.height() as f32,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
        Ok(())
    }

    fn draw_svg(&mut self, text: &str) -> io::Result<()> {
        let options = usvg::Options::default();
        let tree = match usvg::Tree::from_data(text.as_bytes(), &options) {
            Ok(tree) => tree,
            Err(error) => invalid_data!("Malformed SVG data: {}", error),
        };
        let svg_size = tree.size();
        let transform = Transform::from_scale(
            self.size / svg_size.width(),
            self.size / svg_size.height(),
        );
        resvg::render(&tree, transform, &mut self.pixmap.as_mut());
        Ok(())
    }

    fn fill_path(&mut self, path: Option<Path>, color: Rgb) {
        if let Some(path) = path {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_circle(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        color: Rgb,
        transform: Transform,
    ) {
        if let Some(path) = PathBuilder::from_circle(x, y, radius) {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::Winding,
                transform,
                None,
            );
        }
    }

    fn stroke_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Rgb,
    ) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.0, from.1);
        builder.line_to(to.0, to.1);
        if let Some(path) = builder.finish() {
            let stroke = Stroke { width, ..Stroke::default() };
            self.pixmap.stroke_path(
                &path,
                &paint(color),
                &stroke,
                Transform::identity(),
                None,
            );
        }
    }
}

//===========================================================================//

/// Returns an editable SVG document of the gear design in the given colors.
/// Rendering it through `Design::Svg` at 256 pixels matches the procedural
/// gear; at other sizes the whole drawing scales, teeth included.
pub fn gear_svg(colors: &ColorScheme) -> String {
    let s = SVG_CANVAS_SIZE;
    let center = s / 2.0;
    let radius = s * 0.22;
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" \
         width=\"{s}\" height=\"{s}\" viewBox=\"0 0 {s} {s}\">\n"
    );
    svg.push_str(&format!(
        "  <rect width=\"{s}\" height=\"{s}\" fill=\"{}\"/>\n",
        colors.background
    ));
    svg.push_str(&format!(
        "  <g transform=\"translate({center} {center}) \
         rotate({GEAR_ROTATION})\" fill=\"{}\">\n",
        colors.primary
    ));
    for (x, y) in gear_teeth(radius) {
        svg.push_str(&format!(
            "    <rect x=\"{:.2}\" y=\"{:.2}\" width=\"8\" height=\"8\"/>\n",
            x - 4.0,
            y - 4.0
        ));
    }
    svg.push_str(&format!("    <circle r=\"{:.2}\"/>\n", radius));
    svg.push_str(&format!(
        "    <circle r=\"{:.2}\" fill=\"{}\"/>\n",
        radius * 0.45,
        Rgb::WHITE
    ));
    svg.push_str("  </g>\n");
    svg.push_str(&format!(
        "  <g stroke=\"{0}\" stroke-width=\"3\" fill=\"{0}\">\n",
        colors.secondary
    ));
    for (x, y) in gear_nodes(center, radius) {
        svg.push_str(&format!(
            "    <line x1=\"{center}\" y1=\"{center}\" \
             x2=\"{:.2}\" y2=\"{:.2}\"/>\n",
            x, y
        ));
        svg.push_str(&format!(
            "    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" \
             stroke=\"none\"/>\n",
            x,
            y,
            s * 0.06
        ));
    }
    svg.push_str("  </g>\n</svg>\n");
    svg
}

//===========================================================================//

// Tooth centers, relative to the gear's center and before rotation.
fn gear_teeth(radius: f32) -> impl Iterator<Item = (f32, f32)> {
    (0..GEAR_TEETH).map(move |index| {
        let angle = (index as f32 / GEAR_TEETH as f32) * PI * 2.0;
        (angle.cos() * (radius + 6.0), angle.sin() * (radius + 6.0))
    })
}

fn gear_nodes(center: f32, radius: f32) -> [(f32, f32); 3] {
    [
        (center + radius * 2.1, center),
        (center - radius * 2.1, center - radius * 0.8),
        (center - radius * 2.1, center + radius * 0.8),
    ]
}

fn hex_corners(center: f32, radius: f32) -> [(f32, f32); 6] {
    let mut corners = [(0.0, 0.0); 6];
    for (index, corner) in corners.iter_mut().enumerate() {
        let angle = PI / 3.0 * index as f32;
        *corner =
            (center + angle.cos() * radius, center + angle.sin() * radius);
    }
    corners
}

// A rectangle with circular corners, with the radius reduced as needed to fit
// the rectangle.
fn rounded_rect(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    let k = r * KAPPA;
    let mut builder = PathBuilder::new();
    builder.move_to(x + r, y);
    builder.line_to(x + w - r, y);
    builder.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    builder.line_to(x + w, y + h - r);
    builder.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    builder.line_to(x + r, y + h);
    builder.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    builder.line_to(x, y + r);
    builder.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    builder.close();
    builder.finish()
}

fn new_pixmap(width: u32, height: u32) -> io::Result<Pixmap> {
    match Pixmap::new(width, height) {
        Some(pixmap) => Ok(pixmap),
        None => invalid_input!("Can't allocate {}x{} canvas", width, height),
    }
}

fn solid(color: Rgb) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.red, color.green, color.blue, u8::MAX)
}

fn paint(color: Rgb) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(solid(color));
    paint.anti_alias = true;
    paint
}

// Pixmaps store premultiplied alpha; images store straight alpha.
fn pixmap_to_image(pixmap: &Pixmap) -> LogoImage {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ]);
    }
    LogoImage::from_rgba_data(pixmap.width(), pixmap.height(), rgba)
}

//===========================================================================//


//===========================================================================//
