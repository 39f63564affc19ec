//! Color representations and conversions
//!
//! - [`Rgb`]: the integer triple produced by extraction
//! - [`Hsv`]: hue/saturation/value derived on demand for classification
//! - Hexadecimal `#RRGGBB` form for display and CLI input

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AnalysisError, Result};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Sum of the three channels, used by the near-black filter
    pub fn channel_sum(self) -> u16 {
        u16::from(self.r) + u16::from(self.g) + u16::from(self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Hue/saturation/value triple
///
/// `hue` is in degrees [0, 360); `saturation` and `value` are in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl Hsv {
    /// Value rescaled to the 0-255 range the decision tree thresholds use
    pub fn brightness(&self) -> f64 {
        self.value * 255.0
    }
}

/// Stateless converter between color representations
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert RGB (0-255) to HSV with the max/min channel formula
    ///
    /// Achromatic colors (all channels equal) get hue 0.
    pub fn rgb_to_hsv(&self, rgb: Rgb) -> Hsv {
        let r = f64::from(rgb.r) / 255.0;
        let g = f64::from(rgb.g) / 255.0;
        let b = f64::from(rgb.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let diff = max - min;

        // Offset is applied before the modulo so hue boundaries land exactly
        let hue = if diff == 0.0 {
            0.0
        } else if max == r {
            (60.0 * ((g - b) / diff) + 360.0) % 360.0
        } else if max == g {
            (60.0 * ((b - r) / diff) + 120.0) % 360.0
        } else {
            (60.0 * ((r - g) / diff) + 240.0) % 360.0
        };

        let saturation = if max == 0.0 { 0.0 } else { diff / max };

        Hsv {
            hue,
            saturation,
            value: max,
        }
    }

    /// Convert RGB to hexadecimal color string (e.g., "#FF0000")
    pub fn rgb_to_hex(&self, rgb: Rgb) -> String {
        rgb.to_string()
    }

    /// Parse hexadecimal color string to RGB
    ///
    /// Accepts "#FF0000" or "FF0000".
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if the string is not six hex digits
    pub fn hex_to_rgb(&self, hex: &str) -> Result<Rgb> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AnalysisError::invalid("hex color", hex));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| AnalysisError::invalid("hex color", hex))
        };

        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}
