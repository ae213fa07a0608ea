// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for device actions.
//!
//! Each type guarantees its value is within range once constructed, so a
//! resolved action can be handed to a device controller without further
//! checks.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off
//! - [`Brightness`] - Brightness level (0-100%)
//! - [`HsColor`] - Hue 0-360, Saturation 0-100
//! - [`RgbColor`] - 8-bit RGB triple, convertible to [`HsColor`]
//! - [`ColorValue`] - A color as written in a command (hue/saturation or RGB)

mod brightness;
mod color;
mod power;
mod rgb_color;

pub use brightness::Brightness;
pub use color::{ColorValue, HsColor};
pub use power::PowerState;
pub use rgb_color::RgbColor;
