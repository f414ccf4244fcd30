//! RGBA color type and the default palette

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColorParseError {
    #[error("Invalid hex color: {0}")]
    InvalidHexColor(String),
}

/// RGBA color with byte channels (0-255).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREY: Color = Color::rgb(128, 128, 128);
    pub const TRANSPARENT: Color = Color::rgba(255, 255, 255, 0);

    /// Create an opaque color from RGB values (0-255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from RGBA values (0-255)
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse hex color string (#RGB, #RGBA, #RRGGBB, #RRGGBBAA)
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.trim_start_matches('#');
        let invalid = || ColorParseError::InvalidHexColor(hex.to_string());

        let nibble = |i: usize| -> Result<u8, ColorParseError> {
            digits
                .as_bytes()
                .get(i)
                .and_then(|b| (*b as char).to_digit(16))
                .map(|d| d as u8)
                .ok_or_else(invalid)
        };
        let byte = |i: usize| -> Result<u8, ColorParseError> {
            digits
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(invalid)
        };

        match digits.len() {
            3 => Ok(Self::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            4 => Ok(Self::rgba(
                nibble(0)? * 17,
                nibble(1)? * 17,
                nibble(2)? * 17,
                nibble(3)? * 17,
            )),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// The stock color table. Immutable; pass it by reference wherever a
/// themed color is needed instead of reaching for process-wide statics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub white: Color,
    pub black: Color,
    pub grey: Color,
    /// The muek theme color
    pub muek: Color,
    pub light_muek: Color,
    pub dark_muek: Color,
    /// Used for warnings or delete buttons
    pub muek_red: Color,
    pub light_muek_red: Color,
    pub dark_muek_red: Color,
    pub muek_blue: Color,
    pub light_muek_blue: Color,
    pub dark_muek_blue: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            white: Color::WHITE,
            black: Color::BLACK,
            grey: Color::GREY,
            muek: Color::rgb(100, 200, 150),
            light_muek: Color::rgb(150, 250, 200),
            dark_muek: Color::rgb(50, 100, 75),
            muek_red: Color::rgb(220, 60, 60),
            light_muek_red: Color::rgb(250, 120, 120),
            dark_muek_red: Color::rgb(100, 30, 20),
            muek_blue: Color::rgb(100, 140, 250),
            light_muek_blue: Color::rgb(150, 200, 250),
            dark_muek_blue: Color::rgb(20, 50, 100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_forms() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::from_hex("#000f").unwrap(), Color::BLACK);
        assert_eq!(
            Color::from_hex("#64C896").unwrap(),
            Color::rgb(100, 200, 150)
        );
        assert_eq!(
            Color::from_hex("64C89680").unwrap(),
            Color::rgba(100, 200, 150, 128)
        );
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_palette_defaults() {
        let palette = Palette::default();
        assert_eq!(palette.muek, Color::rgb(100, 200, 150));
        assert_eq!(palette.light_muek, Color::rgb(150, 250, 200));
        assert_eq!(palette.dark_muek, Color::rgb(50, 100, 75));
        assert_eq!(palette.muek_red, Color::rgb(220, 60, 60));
    }
}
