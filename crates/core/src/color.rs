//! Stroke color for the animated outline.
//!
//! Colors are passed through to the drawing surface without further
//! validation, so the only format concern is parsing. Hosts hand us CSS-style
//! hex strings: `#rrggbb`, or `#rrggbbaa` when a caller fades the stroke.

use crate::error::BorderError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with straight (non-premultiplied) alpha, components in [0, 1].
///
/// Serializes as a hex string. Opaque colors use the 6-digit form; anything
/// with alpha below 1 uses the 8-digit form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Srgba {
    /// Opaque color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parses a hex color like "#3b82f6", "3b82f6" or "#3b82f6cc" (case insensitive).
    ///
    /// Returns `BorderError::InvalidColor` for any other length or for
    /// non-hex digits.
    pub fn from_hex(hex: &str) -> Result<Srgba, BorderError> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(BorderError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {:?}",
                hex
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| BorderError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        let r = channel(0..2, "red")?;
        let g = channel(2..4, "green")?;
        let b = channel(4..6, "blue")?;
        let a = if hex.len() == 8 {
            channel(6..8, "alpha")?
        } else {
            255
        };
        Ok(Srgba {
            a: a as f64 / 255.0,
            ..Srgba::rgb8(r, g, b)
        })
    }

    /// Converts the color to `"#rrggbb"`, or `"#rrggbbaa"` when not opaque.
    ///
    /// Components are quantized to 8-bit with rounding.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Quantized 8-bit channels `[r, g, b, a]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Serialize for Srgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
