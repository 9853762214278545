use crate::tabular::{Cell, FormatError, ParseError};
use rgb::RGB8;
use std::fmt;
use std::str::FromStr;

/// A color, written as six hexadecimal digits `RRGGBB` without a leading `#`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub RGB8);

impl Color {
    /// Builds the color from its components
    pub const fn new(r: u8, g: u8, b: u8) -> Color {
        Color(RGB8 { r, g, b })
    }
}

/// White, the default color of a route
pub const WHITE: Color = Color::new(255, 255, 255);
/// Black, the default text color of a route
pub const BLACK: Color = Color::new(0, 0, 0);

impl FromStr for Color {
    type Err = ParseError;

    /// Leading and trailing whitespace is ignored, letters can be of any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseError::Color(s.to_owned()));
        }
        let component = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseError::Color(s.to_owned()))
        };
        Ok(Color::new(component(0)?, component(2)?, component(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0.r, self.0.g, self.0.b)
    }
}

impl Cell for Color {
    fn decode(text: &str) -> Result<Self, ParseError> {
        text.parse()
    }

    fn encode(&self) -> Result<String, FormatError> {
        Ok(self.to_string())
    }
}
