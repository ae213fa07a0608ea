// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structured device state returned by a status query.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, HsColor};

/// Current state of the controlled devices, keyed by device name.
///
/// # Examples
///
/// ```
/// use voxhome_lib::dispatch::{DeviceState, DeviceStatus};
/// use voxhome_lib::types::{Brightness, HsColor};
///
/// let status = DeviceStatus::default().with_device(
///     "light",
///     DeviceState::new("on")
///         .with_brightness(Brightness::new(50).unwrap())
///         .with_color(HsColor::blue())
///         .with_entity_id("light.wiz_rgbw_tunable"),
/// );
///
/// let json = serde_json::to_string(&status).unwrap();
/// assert_eq!(
///     json,
///     r#"{"light":{"state":"on","brightness":50,"color":[240,100],"entity_id":"light.wiz_rgbw_tunable"}}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceStatus {
    devices: BTreeMap<String, DeviceState>,
}

impl DeviceStatus {
    /// Adds or replaces the state of one device.
    #[must_use]
    pub fn with_device(mut self, name: impl Into<String>, state: DeviceState) -> Self {
        self.devices.insert(name.into(), state);
        self
    }

    /// Returns the state of a device by name.
    #[must_use]
    pub fn device(&self, name: &str) -> Option<&DeviceState> {
        self.devices.get(name)
    }

    /// Iterates over all devices in name order.
    pub fn devices(&self) -> impl Iterator<Item = (&str, &DeviceState)> {
        self.devices.iter().map(|(name, state)| (name.as_str(), state))
    }

    /// Returns true if no device is reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// State of one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    /// Raw state as reported by the hub (`on`, `off`, `unavailable`, ...).
    pub state: String,

    /// Brightness, for lights that report it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<Brightness>,

    /// Color, for lights that report it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<HsColor>,

    /// Identifier of the device in the hub.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

impl DeviceState {
    /// Creates a state with only the raw state string.
    #[must_use]
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            brightness: None,
            color: None,
            entity_id: None,
        }
    }

    /// Sets the brightness.
    #[must_use]
    pub fn with_brightness(mut self, brightness: Brightness) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: HsColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the hub identifier.
    #[must_use]
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_partial_state() {
        let json = r#"{"light": {"state": "off"}, "tv": {"state": "on", "entity_id": "remote.tv"}}"#;
        let status: DeviceStatus = serde_json::from_str(json).unwrap();

        let light = status.device("light").unwrap();
        assert_eq!(light.state, "off");
        assert_eq!(light.brightness, None);
        assert_eq!(status.device("tv").unwrap().entity_id.as_deref(), Some("remote.tv"));

        let names: Vec<_> = status.devices().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["light", "tv"]);
    }

    #[test]
    fn empty_status() {
        let status = DeviceStatus::default();
        assert!(status.is_empty());
        assert_eq!(serde_json::to_string(&status).unwrap(), "{}");
    }
}
