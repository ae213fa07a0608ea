// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type with hex parsing and hue/saturation conversion.
//!
//! Models occasionally answer with `color=R,G,B` instead of the requested
//! hue/saturation pair. [`RgbColor::to_hs`] maps such triples onto the color
//! model the lights understand.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

use super::HsColor;

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use voxhome_lib::types::{HsColor, RgbColor};
///
/// let red = RgbColor::new(255, 0, 0);
/// assert_eq!(red.to_hs(), HsColor::red());
///
/// let parsed = RgbColor::from_hex("#00FF00").unwrap();
/// assert_eq!(parsed.to_hs(), HsColor::green());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses an RGB color from a hex string.
    ///
    /// Accepts formats: `#RRGGBB`, `RRGGBB`, `#RGB`, `RGB`
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` if the hex string is invalid.
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(ValueError::InvalidHexColor(hex.to_string()));
        }

        match digits.len() {
            3 => {
                let mut channels = digits.chars().map(parse_hex_char);
                let r = channels.next().unwrap_or(Ok(0))?;
                let g = channels.next().unwrap_or(Ok(0))?;
                let b = channels.next().unwrap_or(Ok(0))?;
                // 0xF -> 0xFF
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::new(
                parse_hex_pair(&digits[0..2])?,
                parse_hex_pair(&digits[2..4])?,
                parse_hex_pair(&digits[4..6])?,
            )),
            _ => Err(ValueError::InvalidHexColor(hex.to_string())),
        }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the color as a hex string with the hash prefix.
    #[must_use]
    pub fn to_hex_with_hash(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Converts this color to hue/saturation using the RGB to HSL transform.
    ///
    /// Lightness is discarded. Hue is rounded to the nearest degree and
    /// saturation to the nearest percent, so the result is always valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxhome_lib::types::RgbColor;
    ///
    /// let orange = RgbColor::new(255, 165, 0).to_hs();
    /// assert_eq!((orange.hue(), orange.saturation()), (39, 100));
    ///
    /// // HSL saturation, not HSV: a dark desaturated red
    /// let brick = RgbColor::new(128, 64, 64).to_hs();
    /// assert_eq!((brick.hue(), brick.saturation()), (0, 33));
    /// ```
    #[must_use]
    pub fn to_hs(&self) -> HsColor {
        let (hue, saturation) = rgb_to_hue_saturation(self.red, self.green, self.blue);
        HsColor::clamped(hue, saturation)
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::new(255, 255, 255)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_with_hash())
    }
}

impl FromStr for RgbColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

fn parse_hex_char(c: char) -> Result<u8, ValueError> {
    c.to_digit(16)
        .and_then(|d| u8::try_from(d).ok())
        .ok_or_else(|| ValueError::InvalidHexColor(c.to_string()))
}

fn parse_hex_pair(s: &str) -> Result<u8, ValueError> {
    u8::from_str_radix(s, 16).map_err(|_| ValueError::InvalidHexColor(s.to_string()))
}

/// RGB to HSL, keeping hue (0-360) and saturation (0-100).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
fn rgb_to_hue_saturation(r: u8, g: u8, b: u8) -> (u16, u8) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta < f64::EPSILON {
        return (0, 0);
    }

    let lightness = (max + min) / 2.0;
    let saturation = if lightness <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let sector = if (max - r).abs() < f64::EPSILON {
        ((g - b) / delta).rem_euclid(6.0)
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let hue = (sector * 60.0).round();
    let saturation = (saturation * 100.0).round();

    (hue as u16, saturation as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hs(r: u8, g: u8, b: u8) -> (u16, u8) {
        let color = RgbColor::new(r, g, b).to_hs();
        (color.hue(), color.saturation())
    }

    #[test]
    fn primaries() {
        assert_eq!(hs(255, 0, 0), (0, 100));
        assert_eq!(hs(0, 255, 0), (120, 100));
        assert_eq!(hs(0, 0, 255), (240, 100));
    }

    #[test]
    fn secondaries() {
        assert_eq!(hs(255, 255, 0), (60, 100));
        assert_eq!(hs(0, 255, 255), (180, 100));
        assert_eq!(hs(255, 0, 255), (300, 100));
    }

    #[test]
    fn achromatic_colors_have_no_hue_or_saturation() {
        assert_eq!(hs(0, 0, 0), (0, 0));
        assert_eq!(hs(128, 128, 128), (0, 0));
        assert_eq!(hs(255, 255, 255), (0, 0));
    }

    #[test]
    fn light_colors_use_hsl_saturation() {
        // pink: lightness above one half
        assert_eq!(hs(255, 192, 203), (350, 100));
        assert_eq!(hs(128, 64, 64), (0, 33));
    }

    #[test]
    fn hue_wraps_below_red() {
        // magenta-red side of the wheel
        let (hue, _) = hs(255, 0, 64);
        assert_eq!(hue, 345);
    }

    #[test]
    fn conversion_is_total() {
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let color = RgbColor::new(r, g, b).to_hs();
                    assert!(color.hue() <= 360);
                    assert!(color.saturation() <= 100);
                }
            }
        }
    }

    #[test]
    fn from_hex_formats() {
        assert_eq!(RgbColor::from_hex("#FF5733").unwrap(), RgbColor::new(255, 87, 51));
        assert_eq!(RgbColor::from_hex("00ff00").unwrap(), RgbColor::new(0, 255, 0));
        assert_eq!(RgbColor::from_hex("#F00").unwrap(), RgbColor::new(255, 0, 0));
    }

    #[test]
    fn from_hex_invalid() {
        assert!(RgbColor::from_hex("#GG0000").is_err());
        assert!(RgbColor::from_hex("#12345").is_err());
        assert!(RgbColor::from_hex("#ÿÿ").is_err());
    }

    #[test]
    fn display_uses_hex() {
        assert_eq!(RgbColor::new(255, 128, 0).to_string(), "#FF8000");
    }
}
