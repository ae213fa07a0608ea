// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dispatching resolved actions to devices.
//!
//! The crate does not talk to devices itself. A [`DeviceController`]
//! implementation (a Home Assistant client, a test double, ...) executes each
//! action, and the [`Sequencer`] drives it in order, paces consecutive
//! actions and folds the results into a [`Report`].

mod result;
mod sequencer;
mod status;

pub use result::{ActionResult, Report};
pub use sequencer::{Sequencer, SequencerConfig};
pub use status::{DeviceState, DeviceStatus};

use crate::command::{LightAction, TvAction};
use crate::error::ControlError;

/// Executes device actions.
///
/// Implementations return a human-readable message on success. Failures are
/// reported as [`ControlError`] and recorded by the sequencer without
/// stopping the remaining actions.
///
/// # Examples
///
/// ```
/// use voxhome_lib::command::{LightAction, TvAction};
/// use voxhome_lib::dispatch::{DeviceController, DeviceStatus};
/// use voxhome_lib::error::ControlError;
///
/// struct Console;
///
/// impl DeviceController for Console {
///     async fn set_light(&self, action: &LightAction) -> Result<String, ControlError> {
///         Ok(action.describe())
///     }
///
///     async fn set_tv(&self, action: &TvAction) -> Result<String, ControlError> {
///         Ok(action.describe())
///     }
///
///     async fn status(&self) -> Result<DeviceStatus, ControlError> {
///         Ok(DeviceStatus::default())
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait DeviceController {
    /// Applies a light action.
    ///
    /// # Errors
    ///
    /// Returns `ControlError` if the light could not be changed.
    async fn set_light(&self, action: &LightAction) -> Result<String, ControlError>;

    /// Applies a TV action.
    ///
    /// # Errors
    ///
    /// Returns `ControlError` if the TV could not be switched.
    async fn set_tv(&self, action: &TvAction) -> Result<String, ControlError>;

    /// Reads the current device state.
    ///
    /// # Errors
    ///
    /// Returns `ControlError` if the state could not be read.
    async fn status(&self) -> Result<DeviceStatus, ControlError>;
}
