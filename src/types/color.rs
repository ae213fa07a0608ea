// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hue/saturation color, the color model every light action is expressed in.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

use super::RgbColor;

/// Hue/saturation color (Hue 0-360, Saturation 0-100).
///
/// Serializes as a two element array, the `hs_color` shape light hubs use.
///
/// # Examples
///
/// ```
/// use voxhome_lib::types::HsColor;
///
/// let blue = HsColor::new(240, 100).unwrap();
/// assert_eq!(blue, HsColor::blue());
/// assert_eq!(blue.to_string(), "(240, 100)");
///
/// assert!(HsColor::new(361, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u16, u8)", into = "(u16, u8)")]
pub struct HsColor {
    hue: u16,
    saturation: u8,
}

impl HsColor {
    /// Maximum hue value.
    pub const MAX_HUE: u16 = 360;

    /// Maximum saturation value.
    pub const MAX_SATURATION: u8 = 100;

    /// Creates a new hue/saturation color.
    ///
    /// # Errors
    ///
    /// Returns error if hue exceeds 360 or saturation exceeds 100.
    pub fn new(hue: u16, saturation: u8) -> Result<Self, ValueError> {
        if hue > Self::MAX_HUE {
            return Err(ValueError::InvalidHue(hue));
        }
        if saturation > Self::MAX_SATURATION {
            return Err(ValueError::InvalidSaturation(saturation));
        }
        Ok(Self { hue, saturation })
    }

    /// Creates a color, clamping both components to their valid ranges.
    #[must_use]
    pub const fn clamped(hue: u16, saturation: u8) -> Self {
        Self {
            hue: if hue > Self::MAX_HUE { Self::MAX_HUE } else { hue },
            saturation: if saturation > Self::MAX_SATURATION {
                Self::MAX_SATURATION
            } else {
                saturation
            },
        }
    }

    /// Pure red.
    #[must_use]
    pub const fn red() -> Self {
        Self {
            hue: 0,
            saturation: 100,
        }
    }

    /// Pure green.
    #[must_use]
    pub const fn green() -> Self {
        Self {
            hue: 120,
            saturation: 100,
        }
    }

    /// Pure blue.
    #[must_use]
    pub const fn blue() -> Self {
        Self {
            hue: 240,
            saturation: 100,
        }
    }

    /// White (no saturation).
    #[must_use]
    pub const fn white() -> Self {
        Self {
            hue: 0,
            saturation: 0,
        }
    }

    /// Returns the hue value (0-360).
    #[must_use]
    pub const fn hue(&self) -> u16 {
        self.hue
    }

    /// Returns the saturation value (0-100).
    #[must_use]
    pub const fn saturation(&self) -> u8 {
        self.saturation
    }
}

impl Default for HsColor {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for HsColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.hue, self.saturation)
    }
}

impl TryFrom<(u16, u8)> for HsColor {
    type Error = ValueError;

    fn try_from((hue, saturation): (u16, u8)) -> Result<Self, Self::Error> {
        Self::new(hue, saturation)
    }
}

impl From<HsColor> for (u16, u8) {
    fn from(color: HsColor) -> Self {
        (color.hue, color.saturation)
    }
}

/// A color as it was written in a command, before or after conversion.
///
/// A value is either given directly as hue/saturation or derived from an
/// 8-bit RGB triple; one light action only ever carries one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorValue {
    /// Hue/saturation pair taken as-is.
    Hs(HsColor),
    /// RGB triple, converted on demand.
    Rgb(RgbColor),
}

impl ColorValue {
    /// Returns the hue/saturation form of this color.
    #[must_use]
    pub fn to_hs(&self) -> HsColor {
        match self {
            Self::Hs(hs) => *hs,
            Self::Rgb(rgb) => rgb.to_hs(),
        }
    }
}

impl From<HsColor> for ColorValue {
    fn from(value: HsColor) -> Self {
        Self::Hs(value)
    }
}

impl From<RgbColor> for ColorValue {
    fn from(value: RgbColor) -> Self {
        Self::Rgb(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hs_color_valid() {
        let color = HsColor::new(180, 50).unwrap();
        assert_eq!(color.hue(), 180);
        assert_eq!(color.saturation(), 50);
    }

    #[test]
    fn hs_color_invalid_hue() {
        assert!(matches!(
            HsColor::new(361, 50),
            Err(ValueError::InvalidHue(361))
        ));
    }

    #[test]
    fn hs_color_invalid_saturation() {
        assert!(matches!(
            HsColor::new(180, 101),
            Err(ValueError::InvalidSaturation(101))
        ));
    }

    #[test]
    fn hs_color_clamped() {
        assert_eq!(HsColor::clamped(400, 150), HsColor::new(360, 100).unwrap());
        assert_eq!(HsColor::clamped(30, 20), HsColor::new(30, 20).unwrap());
    }

    #[test]
    fn hs_color_presets() {
        assert_eq!(HsColor::red().hue(), 0);
        assert_eq!(HsColor::green().hue(), 120);
        assert_eq!(HsColor::blue().hue(), 240);
        assert_eq!(HsColor::white().saturation(), 0);
        assert_eq!(HsColor::default(), HsColor::white());
    }

    #[test]
    fn hs_color_serializes_as_pair() {
        let json = serde_json::to_string(&HsColor::blue()).unwrap();
        assert_eq!(json, "[240,100]");
        let back: HsColor = serde_json::from_str("[30,100]").unwrap();
        assert_eq!(back, HsColor::new(30, 100).unwrap());
        assert!(serde_json::from_str::<HsColor>("[30,101]").is_err());
    }

    #[test]
    fn color_value_converts_rgb() {
        let value = ColorValue::from(RgbColor::new(0, 0, 255));
        assert_eq!(value.to_hs(), HsColor::blue());
        assert_eq!(ColorValue::from(HsColor::red()).to_hs(), HsColor::red());
    }
}
