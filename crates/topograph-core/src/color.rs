//! Color handling for diagram styling.
//!
//! Colors come from configuration as CSS strings (`"#E5F5FD"`, `"white"`,
//! `"rgb(123, 136, 148)"`). They are parsed with the `color` crate and
//! emitted as the `#rrggbb` / `#rrggbbaa` form Graphviz understands.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string.
    ///
    /// # Examples
    ///
    /// ```
    /// use topograph_core::color::Color;
    ///
    /// let blue = Color::new("#E5F5FD").unwrap();
    /// assert_eq!(blue.to_hex(), "#e5f5fd");
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns the color as lowercase hex, with an alpha byte only when the
    /// color is not fully opaque.
    pub fn to_hex(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        if rgba.a == u8::MAX {
            format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_color_to_hex() {
        assert_eq!(Color::new("white").unwrap().to_hex(), "#ffffff");
        assert_eq!(Color::new("black").unwrap().to_string(), "#000000");
    }

    #[test]
    fn test_hex_is_normalized() {
        let edge = Color::new("#7B8894").unwrap();
        assert_eq!(edge.to_hex(), "#7b8894");
    }

    #[test]
    fn test_alpha_is_kept() {
        let translucent = Color::new("rgba(255, 0, 0, 0.0)").unwrap();
        assert_eq!(translucent.to_hex(), "#ff000000");
    }

    #[test]
    fn test_invalid_color() {
        let err = Color::new("definitely-not").unwrap_err();
        assert!(err.contains("definitely-not"));
        assert!("also-not".parse::<Color>().is_err());
    }
}
