//! Mapping of RGB colors to named color categories
//!
//! Classification is a fixed decision tree over HSV: low-saturation colors
//! are split into four gray bands by brightness, everything else is bucketed
//! by hue range with brightness/saturation tie-breaks. Every RGB triple maps
//! to exactly one [`ColorCategory`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::conversion::{ColorConverter, Hsv, Rgb};
use crate::config::ClassificationConfig;
use crate::constants::thresholds::*;
use crate::AnalysisError;

/// Named color bucket. The string form doubles as the output folder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColorCategory {
    Red,
    #[serde(rename = "Dark_Red")]
    DarkRed,
    Orange,
    #[serde(rename = "Dark_Orange")]
    DarkOrange,
    Yellow,
    Gold,
    #[serde(rename = "Yellow_Green")]
    YellowGreen,
    Green,
    #[serde(rename = "Dark_Green")]
    DarkGreen,
    Teal,
    Cyan,
    Blue,
    #[serde(rename = "Dark_Blue")]
    DarkBlue,
    Purple,
    #[serde(rename = "Dark_Purple")]
    DarkPurple,
    Magenta,
    Pink,
    Brown,
    Tan,
    Beige,
    White,
    #[serde(rename = "Light_Gray")]
    LightGray,
    Gray,
    #[serde(rename = "Dark_Gray")]
    DarkGray,
    Mixed,
}

impl ColorCategory {
    /// Every category, in declaration order
    pub const ALL: [ColorCategory; 25] = [
        ColorCategory::Red,
        ColorCategory::DarkRed,
        ColorCategory::Orange,
        ColorCategory::DarkOrange,
        ColorCategory::Yellow,
        ColorCategory::Gold,
        ColorCategory::YellowGreen,
        ColorCategory::Green,
        ColorCategory::DarkGreen,
        ColorCategory::Teal,
        ColorCategory::Cyan,
        ColorCategory::Blue,
        ColorCategory::DarkBlue,
        ColorCategory::Purple,
        ColorCategory::DarkPurple,
        ColorCategory::Magenta,
        ColorCategory::Pink,
        ColorCategory::Brown,
        ColorCategory::Tan,
        ColorCategory::Beige,
        ColorCategory::White,
        ColorCategory::LightGray,
        ColorCategory::Gray,
        ColorCategory::DarkGray,
        ColorCategory::Mixed,
    ];

    /// Label used for folder names, logs and JSON
    pub fn as_str(self) -> &'static str {
        match self {
            ColorCategory::Red => "Red",
            ColorCategory::DarkRed => "Dark_Red",
            ColorCategory::Orange => "Orange",
            ColorCategory::DarkOrange => "Dark_Orange",
            ColorCategory::Yellow => "Yellow",
            ColorCategory::Gold => "Gold",
            ColorCategory::YellowGreen => "Yellow_Green",
            ColorCategory::Green => "Green",
            ColorCategory::DarkGreen => "Dark_Green",
            ColorCategory::Teal => "Teal",
            ColorCategory::Cyan => "Cyan",
            ColorCategory::Blue => "Blue",
            ColorCategory::DarkBlue => "Dark_Blue",
            ColorCategory::Purple => "Purple",
            ColorCategory::DarkPurple => "Dark_Purple",
            ColorCategory::Magenta => "Magenta",
            ColorCategory::Pink => "Pink",
            ColorCategory::Brown => "Brown",
            ColorCategory::Tan => "Tan",
            ColorCategory::Beige => "Beige",
            ColorCategory::White => "White",
            ColorCategory::LightGray => "Light_Gray",
            ColorCategory::Gray => "Gray",
            ColorCategory::DarkGray => "Dark_Gray",
            ColorCategory::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for ColorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ColorCategory {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AnalysisError::invalid("color category", s))
    }
}

/// Classify a color with the default decision tree
pub fn classify(rgb: Rgb) -> ColorCategory {
    ColorClassifier::default().classify(rgb)
}

/// HSV decision tree classifier
#[derive(Debug, Clone, Default)]
pub struct ColorClassifier {
    converter: ColorConverter,
    brown_override: bool,
}

impl ColorClassifier {
    pub fn new(config: &ClassificationConfig) -> Self {
        Self {
            converter: ColorConverter::new(),
            brown_override: config.brown_override,
        }
    }

    /// Map an RGB triple to its category
    pub fn classify(&self, rgb: Rgb) -> ColorCategory {
        self.classify_hsv(self.converter.rgb_to_hsv(rgb))
    }

    /// Map an HSV triple to its category
    pub fn classify_hsv(&self, hsv: Hsv) -> ColorCategory {
        let h = hsv.hue;
        let s = hsv.saturation;
        let brightness = hsv.brightness();

        if s < GRAYSCALE_SATURATION {
            return grayscale(brightness);
        }

        if self.brown_override && is_brown(h, s, brightness) {
            return ColorCategory::Brown;
        }

        if let Some(category) = by_hue(h, s, brightness) {
            return category;
        }

        // Unreachable while the hue ranges cover [0, 360); kept in this
        // position unless brown_override moves it in front of them.
        if is_brown(h, s, brightness) {
            return ColorCategory::Brown;
        }

        ColorCategory::Mixed
    }
}

fn grayscale(brightness: f64) -> ColorCategory {
    if brightness > WHITE_BRIGHTNESS {
        ColorCategory::White
    } else if brightness > LIGHT_GRAY_BRIGHTNESS {
        ColorCategory::LightGray
    } else if brightness > GRAY_BRIGHTNESS {
        ColorCategory::Gray
    } else {
        ColorCategory::DarkGray
    }
}

fn is_brown(h: f64, s: f64, brightness: f64) -> bool {
    let (low, high) = BROWN_HUE_RANGE;
    brightness < BROWN_MAX_BRIGHTNESS && s < BROWN_MAX_SATURATION && h >= low && h < high
}

fn by_hue(h: f64, s: f64, brightness: f64) -> Option<ColorCategory> {
    let dark = brightness < DARK_BRIGHTNESS;

    let category = if h >= RED_HUE_START || h < ORANGE_HUE_START {
        if dark {
            ColorCategory::DarkRed
        } else if s > PINK_RED_MIN_SATURATION && brightness > PINK_RED_MIN_BRIGHTNESS {
            ColorCategory::Pink
        } else {
            ColorCategory::Red
        }
    } else if h < YELLOW_HUE_START {
        if dark {
            ColorCategory::DarkOrange
        } else if brightness > BRIGHT_ORANGE_MIN_BRIGHTNESS && s > BRIGHT_ORANGE_MIN_SATURATION {
            ColorCategory::Orange
        } else if s < TAN_MAX_SATURATION {
            ColorCategory::Tan
        } else {
            ColorCategory::Orange
        }
    } else if h < YELLOW_GREEN_HUE_START {
        match (
            s > YELLOW_MIN_SATURATION,
            brightness > YELLOW_MIN_BRIGHTNESS,
        ) {
            (true, true) => ColorCategory::Yellow,
            (true, false) => ColorCategory::Gold,
            (false, _) => ColorCategory::Beige,
        }
    } else if h < GREEN_HUE_START {
        ColorCategory::YellowGreen
    } else if h < TEAL_HUE_START {
        if dark {
            ColorCategory::DarkGreen
        } else {
            ColorCategory::Green
        }
    } else if h < BLUE_HUE_START {
        if h < CYAN_HUE_START {
            ColorCategory::Teal
        } else {
            ColorCategory::Cyan
        }
    } else if h < PURPLE_HUE_START {
        if dark {
            ColorCategory::DarkBlue
        } else {
            ColorCategory::Blue
        }
    } else if h < MAGENTA_HUE_START {
        if dark {
            ColorCategory::DarkPurple
        } else {
            ColorCategory::Purple
        }
    } else if h < RED_HUE_START {
        if brightness > PINK_MAGENTA_MIN_BRIGHTNESS {
            ColorCategory::Pink
        } else {
            ColorCategory::Magenta
        }
    } else {
        return None;
    };

    Some(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn rgb(r: u8, g: u8, b: u8) -> Rgb {
        Rgb::new(r, g, b)
    }

    fn hsv(hue: f64, saturation: f64, value: f64) -> Hsv {
        Hsv {
            hue,
            saturation,
            value,
        }
    }

    #[test]
    fn test_known_fixtures() {
        // Fully saturated and bright enough for the pink split
        assert_eq!(classify(rgb(255, 0, 0)), ColorCategory::Pink);
        // brightness 90 is above the dark cutoff
        assert_eq!(classify(rgb(90, 10, 10)), ColorCategory::Red);
        assert_eq!(classify(rgb(70, 10, 10)), ColorCategory::DarkRed);
        assert_eq!(classify(rgb(255, 255, 255)), ColorCategory::White);
        assert_eq!(classify(rgb(128, 128, 128)), ColorCategory::Gray);
        assert_eq!(classify(rgb(0, 0, 0)), ColorCategory::DarkGray);
    }

    #[test]
    fn test_grayscale_boundaries() {
        assert_eq!(classify(rgb(219, 219, 219)), ColorCategory::LightGray);
        assert_eq!(classify(rgb(220, 220, 220)), ColorCategory::LightGray);
        assert_eq!(classify(rgb(221, 221, 221)), ColorCategory::White);
        assert_eq!(classify(rgb(170, 170, 170)), ColorCategory::Gray);
        assert_eq!(classify(rgb(171, 171, 171)), ColorCategory::LightGray);
        assert_eq!(classify(rgb(100, 100, 100)), ColorCategory::DarkGray);
        assert_eq!(classify(rgb(101, 101, 101)), ColorCategory::Gray);
    }

    #[test]
    fn test_low_saturation_tint_is_gray() {
        // s = 20/200 = 0.1
        assert_eq!(classify(rgb(200, 180, 180)), ColorCategory::LightGray);
    }

    #[test]
    fn test_hue_wraparound() {
        let classifier = ColorClassifier::default();
        assert_eq!(classifier.classify_hsv(hsv(359.0, 0.8, 0.6)), ColorCategory::Red);
        assert_eq!(classifier.classify_hsv(hsv(1.0, 0.8, 0.6)), ColorCategory::Red);

        // Same wrap through real RGB input: hues ~359.1 and ~0.9
        assert_eq!(classify(rgb(255, 0, 4)), ColorCategory::Pink);
        assert_eq!(classify(rgb(150, 0, 2)), ColorCategory::Red);
        assert_eq!(classify(rgb(150, 2, 0)), ColorCategory::Red);
    }

    #[test]
    fn test_red_family() {
        assert_eq!(classify(rgb(60, 5, 5)), ColorCategory::DarkRed);
        // bright and saturated red reads as pink
        assert_eq!(classify(rgb(230, 40, 40)), ColorCategory::Pink);
        assert_eq!(classify(rgb(180, 40, 40)), ColorCategory::Red);
    }

    #[test]
    fn test_orange_family() {
        assert_eq!(classify(rgb(70, 35, 10)), ColorCategory::DarkOrange);
        assert_eq!(classify(rgb(255, 140, 0)), ColorCategory::Orange);
        // muted warm tone: s = 0.3
        assert_eq!(classify(rgb(160, 136, 112)), ColorCategory::Tan);
        // mid brightness, s between 0.4 and 0.5
        assert_eq!(classify(rgb(160, 112, 88)), ColorCategory::Orange);
    }

    #[test]
    fn test_yellow_family() {
        assert_eq!(classify(rgb(255, 230, 0)), ColorCategory::Yellow);
        assert_eq!(classify(rgb(140, 120, 20)), ColorCategory::Gold);
        assert_eq!(classify(rgb(230, 220, 170)), ColorCategory::Beige);
    }

    #[test]
    fn test_green_to_cyan() {
        assert_eq!(classify(rgb(160, 220, 40)), ColorCategory::YellowGreen);
        assert_eq!(classify(rgb(0, 200, 0)), ColorCategory::Green);
        assert_eq!(classify(rgb(0, 60, 0)), ColorCategory::DarkGreen);
        assert_eq!(classify(rgb(0, 128, 100)), ColorCategory::Teal);
        assert_eq!(classify(rgb(0, 220, 230)), ColorCategory::Cyan);
    }

    #[test]
    fn test_blue_to_magenta() {
        assert_eq!(classify(rgb(0, 0, 255)), ColorCategory::Blue);
        assert_eq!(classify(rgb(0, 0, 60)), ColorCategory::DarkBlue);
        assert_eq!(classify(rgb(130, 40, 220)), ColorCategory::Purple);
        assert_eq!(classify(rgb(40, 10, 70)), ColorCategory::DarkPurple);
        assert_eq!(classify(rgb(150, 0, 150)), ColorCategory::Magenta);
        assert_eq!(classify(rgb(255, 100, 220)), ColorCategory::Pink);
    }

    #[test]
    fn test_hue_range_edges() {
        let classifier = ColorClassifier::default();
        let at = |h: f64| classifier.classify_hsv(hsv(h, 0.9, 1.0));

        assert_eq!(at(14.999), ColorCategory::Pink);
        assert_eq!(at(15.0), ColorCategory::Orange);
        assert_eq!(at(45.0), ColorCategory::Yellow);
        assert_eq!(at(70.0), ColorCategory::YellowGreen);
        assert_eq!(at(90.0), ColorCategory::Green);
        assert_eq!(at(150.0), ColorCategory::Teal);
        assert_eq!(at(175.0), ColorCategory::Cyan);
        assert_eq!(at(200.0), ColorCategory::Blue);
        assert_eq!(at(260.0), ColorCategory::Purple);
        assert_eq!(at(290.0), ColorCategory::Pink);
        assert_eq!(at(345.0), ColorCategory::Pink);
    }

    #[test]
    fn test_saturation_splits_are_strict() {
        let classifier = ColorClassifier::default();
        let at = |h: f64, s: f64, v: f64| classifier.classify_hsv(hsv(h, s, v));

        assert_eq!(at(0.0, PINK_RED_MIN_SATURATION, 1.0), ColorCategory::Red);
        assert_eq!(at(0.0, PINK_RED_MIN_SATURATION + 0.01, 1.0), ColorCategory::Pink);

        assert_eq!(at(30.0, TAN_MAX_SATURATION - 0.01, 0.6), ColorCategory::Tan);
        assert_eq!(at(30.0, TAN_MAX_SATURATION, 0.6), ColorCategory::Orange);

        assert_eq!(at(50.0, YELLOW_MIN_SATURATION, 1.0), ColorCategory::Beige);
        assert_eq!(at(50.0, YELLOW_MIN_SATURATION + 0.01, 1.0), ColorCategory::Yellow);
        assert_eq!(at(50.0, YELLOW_MIN_SATURATION + 0.01, 0.5), ColorCategory::Gold);
    }

    #[test]
    fn test_brown_unreachable_by_default() {
        let classifier = ColorClassifier::default();
        // Inside the Brown guard, but the orange and yellow branches answer first
        assert_eq!(
            classifier.classify_hsv(hsv(30.0, 0.45, 0.3)),
            ColorCategory::DarkOrange
        );
        assert_eq!(
            classifier.classify_hsv(hsv(50.0, 0.45, 0.35)),
            ColorCategory::Beige
        );

        for r in 0..=255u8 {
            for g in (0..=255u8).step_by(5) {
                for b in (0..=255u8).step_by(5) {
                    assert_ne!(classifier.classify(rgb(r, g, b)), ColorCategory::Brown);
                }
            }
        }
    }

    #[test]
    fn test_brown_override() {
        let classifier = ColorClassifier::new(&ClassificationConfig {
            brown_override: true,
        });

        assert_eq!(
            classifier.classify_hsv(hsv(30.0, 0.45, 0.3)),
            ColorCategory::Brown
        );
        // hue 30, s = 0.4, brightness 90
        assert_eq!(classifier.classify(rgb(90, 72, 54)), ColorCategory::Brown);
        // bright enough to escape the guard
        assert_eq!(classifier.classify(rgb(255, 140, 0)), ColorCategory::Orange);
        // grayscale still wins over the override
        assert_eq!(classifier.classify(rgb(50, 48, 46)), ColorCategory::DarkGray);
    }

    #[test]
    fn test_totality_and_determinism() {
        let classifier = ColorClassifier::default();
        let mut seen = HashSet::new();

        for r in (0..=255u16).step_by(3) {
            for g in (0..=255u16).step_by(3) {
                for b in (0..=255u16).step_by(3) {
                    let color = rgb(r as u8, g as u8, b as u8);
                    let first = classifier.classify(color);
                    assert_eq!(first, classifier.classify(color));
                    assert_ne!(first, ColorCategory::Mixed);
                    seen.insert(first);
                }
            }
        }

        // Every label except Brown (unreachable) and Mixed (fallback) shows up
        assert_eq!(seen.len(), ColorCategory::ALL.len() - 2);
    }

    #[test]
    fn test_hsv_grid_totality() {
        let classifier = ColorClassifier::default();
        for hi in 0..720 {
            for si in 0..=20 {
                for vi in 0..=20 {
                    let category = classifier.classify_hsv(hsv(
                        f64::from(hi) * 0.5,
                        f64::from(si) / 20.0,
                        f64::from(vi) / 20.0,
                    ));
                    assert!(ColorCategory::ALL.contains(&category));
                }
            }
        }
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(ColorCategory::DarkRed.to_string(), "Dark_Red");
        assert_eq!(ColorCategory::LightGray.as_str(), "Light_Gray");
        assert_eq!(
            "yellow_green".parse::<ColorCategory>().unwrap(),
            ColorCategory::YellowGreen
        );
        assert!("Chartreuse".parse::<ColorCategory>().is_err());

        for category in ColorCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
            assert_eq!(category.as_str().parse::<ColorCategory>().unwrap(), category);
        }
    }
}
