// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Field parsers and the repair rules they apply.
//!
//! Every parameter parser returns a [`FieldOutcome`] instead of an error.
//! The resolver decides what a defaulted field turns into.
//!
//! | Input | Rule | Outcome |
//! |-------|------|---------|
//! | `brightness=75` | none | brightness 75 |
//! | `brightness="75"` | quotes stripped | brightness 75 |
//! | `brightness=150` | [`Repair::Clamped`] | brightness 100 |
//! | `brightness=240,100` | [`Repair::MisplacedColor`] | color (240, 100), default brightness |
//! | `brightness=40,1,2` | [`Repair::ExtraValues`] | brightness 40 |
//! | `brightness=bright` | [`Repair::InvalidNumber`] | brightness unset |
//! | `color=240,100` | none | color (240, 100) |
//! | `color=255,0,0` | RGB conversion | color (0, 100) |
//! | `color=#FF8000` | RGB conversion | color (30, 100) |
//! | `color=#GG0000` | [`Repair::InvalidHexColor`] | fallback color |
//! | `color=1,2,3,4` | [`Repair::UnsupportedColorArity`] | fallback color |
//! | `color=blue` | [`Repair::InvalidNumber`] | fallback color |

use std::fmt;

use crate::types::{Brightness, ColorValue, HsColor, RgbColor};

/// Parameter a value repair applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `brightness=` value.
    Brightness,
    /// `color=` value.
    Color,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Brightness => "brightness",
            Self::Color => "color",
        };
        write!(f, "{name}")
    }
}

/// A repair applied while resolving a light command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    /// No recognized alias token; the default alias was used.
    MissingAlias {
        /// Alias substituted.
        default: String,
    },
    /// Neither `ON` nor `OFF` was present; the light is switched on.
    MissingPower,
    /// Parameters were present on an `OFF` command and dropped.
    IgnoredParameters {
        /// Number of parameter tokens dropped.
        count: usize,
    },
    /// A value was not a list of integers.
    InvalidNumber {
        /// Field the value belonged to.
        field: Field,
        /// Value as written.
        raw: String,
    },
    /// A value was outside its range and clamped.
    Clamped {
        /// Field the value belonged to.
        field: Field,
        /// Value as written.
        raw: String,
    },
    /// A hue/saturation pair was written as the brightness value.
    MisplacedColor {
        /// Color recovered from the brightness slot.
        color: HsColor,
    },
    /// A comma list in the brightness slot that is not a color; the first
    /// value was kept.
    ExtraValues {
        /// Value as written.
        raw: String,
    },
    /// A `#`-prefixed color that is not `#RGB` or `#RRGGBB`.
    InvalidHexColor {
        /// Value as written.
        raw: String,
    },
    /// A color with neither two nor three components.
    UnsupportedColorArity {
        /// Number of components found.
        count: usize,
    },
}

impl fmt::Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAlias { default } => write!(f, "no device alias, using {default}"),
            Self::MissingPower => write!(f, "no ON/OFF keyword, assuming ON"),
            Self::IgnoredParameters { count } => {
                write!(f, "ignored {count} parameter(s) on an OFF command")
            }
            Self::InvalidNumber { field, raw } => write!(f, "invalid {field} value {raw:?}"),
            Self::Clamped { field, raw } => write!(f, "{field} value {raw:?} clamped to range"),
            Self::MisplacedColor { color } => {
                write!(f, "color {color} found in the brightness slot")
            }
            Self::ExtraValues { raw } => write!(f, "brightness {raw:?} has extra values"),
            Self::InvalidHexColor { raw } => write!(f, "invalid hex color {raw:?}"),
            Self::UnsupportedColorArity { count } => {
                write!(f, "color with {count} component(s) is not HS or RGB")
            }
        }
    }
}

/// Result of parsing one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome<T> {
    /// The value parsed cleanly.
    Parsed(T),
    /// A value was recovered by applying a repair.
    Repaired(T, Repair),
    /// No usable value; the caller substitutes its default.
    Defaulted(Repair),
}

impl<T> FieldOutcome<T> {
    /// Returns the value, if one was produced.
    #[must_use]
    pub fn value(self) -> Option<T> {
        match self {
            Self::Parsed(value) | Self::Repaired(value, _) => Some(value),
            Self::Defaulted(_) => None,
        }
    }

    /// Returns the repair applied, if any.
    #[must_use]
    pub fn repair(&self) -> Option<&Repair> {
        match self {
            Self::Parsed(_) => None,
            Self::Repaired(_, repair) | Self::Defaulted(repair) => Some(repair),
        }
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldOutcome<U> {
        match self {
            Self::Parsed(value) => FieldOutcome::Parsed(f(value)),
            Self::Repaired(value, repair) => FieldOutcome::Repaired(f(value), repair),
            Self::Defaulted(repair) => FieldOutcome::Defaulted(repair),
        }
    }
}

/// What a `brightness=` value turned out to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrightnessSlot {
    /// A brightness level.
    Level(Brightness),
    /// A hue/saturation pair written in the wrong slot.
    MisplacedColor(HsColor),
}

/// Parses the value of a `brightness=` token.
///
/// # Examples
///
/// ```
/// use voxhome_lib::command::{BrightnessSlot, FieldOutcome, parse_brightness};
/// use voxhome_lib::types::{Brightness, HsColor};
///
/// assert_eq!(
///     parse_brightness("\"75\""),
///     FieldOutcome::Parsed(BrightnessSlot::Level(Brightness::new(75).unwrap()))
/// );
/// assert_eq!(
///     parse_brightness("240,100").value(),
///     Some(BrightnessSlot::MisplacedColor(HsColor::blue()))
/// );
/// assert_eq!(parse_brightness("high").value(), None);
/// ```
#[must_use]
pub fn parse_brightness(raw: &str) -> FieldOutcome<BrightnessSlot> {
    let value = strip_quotes(raw);

    if !value.contains(',') {
        return match parse_integer(value) {
            Some(level) => clamp_brightness(level, raw).map(BrightnessSlot::Level),
            None => invalid(Field::Brightness, raw),
        };
    }

    let Some(values) = parse_integer_list(value) else {
        return invalid(Field::Brightness, raw);
    };
    match values.as_slice() {
        [hue, saturation] => {
            let color = clamp_hs(*hue, *saturation);
            FieldOutcome::Repaired(
                BrightnessSlot::MisplacedColor(color),
                Repair::MisplacedColor { color },
            )
        }
        [first, ..] => {
            let level = clamp_brightness(*first, raw).value().unwrap_or(Brightness::MIN);
            FieldOutcome::Repaired(
                BrightnessSlot::Level(level),
                Repair::ExtraValues {
                    raw: raw.to_string(),
                },
            )
        }
        [] => invalid(Field::Brightness, raw),
    }
}

/// Parses the value of a `color=` token.
///
/// Two components are hue/saturation, three are an 8-bit RGB triple, and a
/// value starting with `#` is a hex RGB color.
///
/// # Examples
///
/// ```
/// use voxhome_lib::command::parse_color;
/// use voxhome_lib::types::HsColor;
///
/// let hs = parse_color("240,100").value().unwrap();
/// assert_eq!(hs.to_hs(), HsColor::blue());
///
/// let rgb = parse_color("255,0,0").value().unwrap();
/// assert_eq!(rgb.to_hs(), HsColor::red());
///
/// let hex = parse_color("#0000FF").value().unwrap();
/// assert_eq!(hex.to_hs(), HsColor::blue());
///
/// assert!(parse_color("1,2,3,4").value().is_none());
/// ```
#[must_use]
pub fn parse_color(raw: &str) -> FieldOutcome<ColorValue> {
    let value = strip_quotes(raw);
    if value.starts_with('#') {
        return match value.parse::<RgbColor>() {
            Ok(rgb) => FieldOutcome::Parsed(ColorValue::Rgb(rgb)),
            Err(_) => FieldOutcome::Defaulted(Repair::InvalidHexColor {
                raw: raw.to_string(),
            }),
        };
    }

    let Some(values) = parse_integer_list(value) else {
        return invalid(Field::Color, raw);
    };

    match values.as_slice() {
        [hue, saturation] => {
            let color = clamp_hs(*hue, *saturation);
            if i64::from(color.hue()) == *hue && i64::from(color.saturation()) == *saturation {
                FieldOutcome::Parsed(ColorValue::Hs(color))
            } else {
                FieldOutcome::Repaired(ColorValue::Hs(color), clamped(Field::Color, raw))
            }
        }
        [r, g, b] => {
            let channels = [*r, *g, *b].map(clamp_channel);
            let rgb = RgbColor::new(channels[0], channels[1], channels[2]);
            if [*r, *g, *b] == channels.map(i64::from) {
                FieldOutcome::Parsed(ColorValue::Rgb(rgb))
            } else {
                FieldOutcome::Repaired(ColorValue::Rgb(rgb), clamped(Field::Color, raw))
            }
        }
        other => FieldOutcome::Defaulted(Repair::UnsupportedColorArity { count: other.len() }),
    }
}

fn strip_quotes(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '"' || c == '\'')
}

fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

fn parse_integer_list(value: &str) -> Option<Vec<i64>> {
    value.split(',').map(parse_integer).collect()
}

fn invalid<T>(field: Field, raw: &str) -> FieldOutcome<T> {
    FieldOutcome::Defaulted(Repair::InvalidNumber {
        field,
        raw: raw.to_string(),
    })
}

fn clamped(field: Field, raw: &str) -> Repair {
    Repair::Clamped {
        field,
        raw: raw.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_brightness(level: i64, raw: &str) -> FieldOutcome<Brightness> {
    // clamp keeps the value inside u8 range
    let bounded = level.clamp(0, 100) as u8;
    let brightness = Brightness::clamped(bounded);
    if i64::from(bounded) == level {
        FieldOutcome::Parsed(brightness)
    } else {
        FieldOutcome::Repaired(brightness, clamped(Field::Brightness, raw))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_hs(hue: i64, saturation: i64) -> HsColor {
    HsColor::clamped(
        hue.clamp(0, i64::from(HsColor::MAX_HUE)) as u16,
        saturation.clamp(0, i64::from(HsColor::MAX_SATURATION)) as u8,
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}
