use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::str::FromStr;

//===========================================================================//

/// An opaque 24-bit color, written as `#rrggbb`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct Rgb {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl Rgb {
    /// Pure white; used for the cut-outs in the gear and chip designs.
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    /// Creates a color from its channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Rgb {
        Rgb { red, green, blue }
    }

    /// Returns the color as a fully opaque RGBA pixel.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.red, self.green, self.blue, u8::MAX]
    }
}

impl FromStr for Rgb {
    type Err = io::Error;

    /// Parses `#rrggbb` or the `#rgb` shorthand.
    fn from_str(string: &str) -> io::Result<Rgb> {
        let digits = match string.strip_prefix('#') {
            Some(digits) if digits.chars().all(|c| c.is_ascii_hexdigit()) => {
                digits
            }
            _ => invalid_input!("Invalid color {:?} (expected #rrggbb)", string),
        };
        let channel = |hex: &str| u8::from_str_radix(hex, 16).unwrap_or(0);
        match digits.len() {
            6 => Ok(Rgb::new(
                channel(&digits[0..2]),
                channel(&digits[2..4]),
                channel(&digits[4..6]),
            )),
            3 => Ok(Rgb::new(
                channel(&digits[0..1]) * 0x11,
                channel(&digits[1..2]) * 0x11,
                channel(&digits[2..3]) * 0x11,
            )),
            _ => invalid_input!("Invalid color {:?} (expected #rrggbb)", string),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl TryFrom<String> for Rgb {
    type Error = io::Error;

    fn try_from(string: String) -> io::Result<Rgb> {
        string.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> String {
        color.to_string()
    }
}

//===========================================================================//

/// The three colors a design is drawn with.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ColorScheme {
    /// Main shape color
    pub primary: Rgb,
    /// Accent color for traces and nodes
    pub secondary: Rgb,
    /// Fill behind the design
    pub background: Rgb,
}

/// The backgrounds `ColorScheme::random` chooses between.
pub const BACKGROUND_PALETTE: [Rgb; 3] = [
    Rgb::WHITE,
    Rgb::new(0x0b, 0x0b, 0x12),
    Rgb::new(0xf6, 0xfb, 0xff),
];

impl ColorScheme {
    /// Picks random primary and secondary colors and one of the
    /// `BACKGROUND_PALETTE` backgrounds.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> ColorScheme {
        let primary = Rgb::new(rng.gen(), rng.gen(), rng.gen());
        let secondary = Rgb::new(rng.gen(), rng.gen(), rng.gen());
        let background =
            BACKGROUND_PALETTE[rng.gen_range(0..BACKGROUND_PALETTE.len())];
        ColorScheme { primary, secondary, background }
    }
}

impl Default for ColorScheme {
    fn default() -> ColorScheme {
        ColorScheme {
            primary: Rgb::new(0x1e, 0x88, 0xe5),
            secondary: Rgb::new(0xff, 0x70, 0x43),
            background: Rgb::WHITE,
        }
    }
}

//===========================================================================//


//===========================================================================//
