// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed device actions produced from command fragments.

use std::fmt;

use crate::types::{Brightness, ColorValue, HsColor, PowerState};

/// A resolved, typed device action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceAction {
    /// Change a light's power, brightness or color.
    Light(LightAction),
    /// Turn the TV on or off.
    Tv(TvAction),
    /// Query the current device state.
    Status,
}

impl DeviceAction {
    /// Returns what this action addresses, used to tag results.
    #[must_use]
    pub fn target(&self) -> Target {
        match self {
            Self::Light(light) => Target::Light(light.alias().to_string()),
            Self::Tv(_) => Target::Tv,
            Self::Status => Target::Status,
        }
    }
}

impl From<LightAction> for DeviceAction {
    fn from(value: LightAction) -> Self {
        Self::Light(value)
    }
}

impl From<TvAction> for DeviceAction {
    fn from(value: TvAction) -> Self {
        Self::Tv(value)
    }
}

/// The device an action is dispatched to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// A light, by alias.
    Light(String),
    /// The TV.
    Tv,
    /// The status query.
    Status,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light(alias) => write!(f, "{alias}"),
            Self::Tv => write!(f, "TV"),
            Self::Status => write!(f, "status"),
        }
    }
}

/// Light change request.
///
/// Brightness and color are only ever present when the light is switched on;
/// the constructors enforce this.
///
/// # Examples
///
/// ```
/// use voxhome_lib::command::LightAction;
/// use voxhome_lib::types::{Brightness, HsColor};
///
/// let action = LightAction::on("wiz")
///     .with_brightness(Brightness::new(50).unwrap())
///     .with_color(HsColor::blue());
/// assert_eq!(action.describe(), "Turned on wiz at 50% brightness with color (240, 100)");
///
/// let off = LightAction::off("wiz").with_brightness(Brightness::MAX);
/// assert_eq!(off.brightness(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightAction {
    alias: String,
    power: PowerState,
    brightness: Option<Brightness>,
    color: Option<ColorValue>,
}

impl LightAction {
    /// Creates an action switching the light on, without parameters.
    #[must_use]
    pub fn on(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            power: PowerState::On,
            brightness: None,
            color: None,
        }
    }

    /// Creates an action switching the light off.
    #[must_use]
    pub fn off(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            power: PowerState::Off,
            brightness: None,
            color: None,
        }
    }

    /// Sets the brightness. Ignored when the action switches the light off.
    #[must_use]
    pub fn with_brightness(mut self, brightness: Brightness) -> Self {
        if self.power.is_on() {
            self.brightness = Some(brightness);
        }
        self
    }

    /// Sets the color. Ignored when the action switches the light off.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<ColorValue>) -> Self {
        if self.power.is_on() {
            self.color = Some(color.into());
        }
        self
    }

    /// Returns the device alias.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns the requested power state.
    #[must_use]
    pub const fn power(&self) -> PowerState {
        self.power
    }

    /// Returns the requested brightness, if any.
    #[must_use]
    pub const fn brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    /// Returns the requested color in the hue/saturation model, if any.
    #[must_use]
    pub fn color(&self) -> Option<HsColor> {
        self.color.map(|c| c.to_hs())
    }

    /// Returns the color as it was written in the command, if any.
    #[must_use]
    pub const fn color_value(&self) -> Option<ColorValue> {
        self.color
    }

    /// Human-readable description of a successful dispatch.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut text = format!("Turned {} {}", self.power, self.alias);
        if let Some(brightness) = self.brightness {
            text.push_str(&format!(" at {brightness} brightness"));
        }
        if let Some(color) = self.color() {
            text.push_str(&format!(" with color {color}"));
        }
        text
    }
}

/// TV power request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TvAction {
    power: PowerState,
}

impl TvAction {
    /// Creates a TV action.
    #[must_use]
    pub const fn new(power: PowerState) -> Self {
        Self { power }
    }

    /// Returns the requested power state.
    #[must_use]
    pub const fn power(&self) -> PowerState {
        self.power
    }

    /// Human-readable description of a successful dispatch.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("Turned {} TV", self.power)
    }
}
