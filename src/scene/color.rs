//! `#rrggbb` colors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::SceneError;

/// An sRGB color, stored and serialized as a lower case `#rrggbb` string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xrrggbb` value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_hex_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SceneError::InvalidColor(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let packed = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        Ok(Color::from_hex(packed))
    }
}

impl TryFrom<String> for Color {
    type Error = SceneError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let c: Color = "#8B5CF6".parse().unwrap();
        assert_eq!(c, Color::rgb(0x8b, 0x5c, 0xf6));
        assert_eq!(c.to_string(), "#8b5cf6");
    }

    #[test]
    fn test_rejects_bad_input() {
        for bad in ["8b5cf6", "#8b5cf", "#8b5cf6a", "#zzzzzz", "", "#"] {
            assert!(bad.parse::<Color>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Color::from_hex(0x0ea5e9)).unwrap();
        assert_eq!(json, "\"#0ea5e9\"");
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }
}
