//! Progress-driven color ramp.
//!
//! Hue, saturation and lightness move linearly with progress (green `#2b630d`
//! at 0 through to dark red `#8a0000` at 100). This is a plain HSL ramp, not a
//! perceptual interpolation.

use std::fmt;
use std::str::FromStr;

use super::progress::clamp_progress;

/// 8-bit sRGB triplet; `Display` renders `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional, case-insensitive).
    pub fn from_hex(raw: &str) -> Option<Self> {
        let hex = raw.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = InvalidHex;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or(InvalidHex)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected a #rrggbb color")]
pub struct InvalidHex;

/// Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Ramp position for a progress value.
    pub fn for_progress(progress: f64) -> Self {
        let p = clamp_progress(progress);
        Self {
            h: 99.0 - p * 0.99,
            s: 77.0 + p * 0.23,
            l: 22.0 + p * 0.05,
        }
    }

    pub fn to_rgb(self) -> Rgb {
        let l = self.l / 100.0;
        let a = self.s / 100.0 * l.min(1.0 - l);
        let channel = |n: f64| {
            let k = (n + self.h / 30.0).rem_euclid(12.0);
            let value = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
            (value * 255.0).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(channel(0.0), channel(8.0), channel(4.0))
    }
}

/// Color for a progress value.
pub fn progress_color(progress: f64) -> Rgb {
    Hsl::for_progress(progress).to_rgb()
}
