// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `VoxHome` Lib - Turn language-model replies into smart home actions.
//!
//! A language model answers a user's request in natural language and appends
//! command tokens such as `LIGHT:wiz:ON:brightness=50:color=240,100` or
//! `TV:OFF`. This library finds those tokens in the free-form text, repairs
//! the usual mistakes, and dispatches typed actions to your devices through a
//! [`DeviceController`](dispatch::DeviceController) you provide.
//!
//! # Supported Commands
//!
//! - **Lights**: power, brightness (0-100%), color as hue/saturation or RGB
//! - **TV**: power
//! - **Status**: query the state of all devices
//!
//! # Pipeline
//!
//! 1. [`command::tokenize`] finds command fragments in the response
//! 2. [`command::normalize`] splits a light fragment into tokens
//! 3. [`command::Resolver`] builds a [`LightAction`](command::LightAction),
//!    falling back to defaults for anything malformed
//! 4. [`dispatch::Sequencer`] runs the actions in order and reports
//!
//! [`CommandEngine`] wraps the whole pipeline; [`Assistant`] adds the
//! completion request in front of it (requires the `http` feature).
//!
//! # Quick Start
//!
//! ```
//! use voxhome_lib::CommandEngine;
//! use voxhome_lib::command::{LightAction, TvAction};
//! use voxhome_lib::dispatch::{DeviceController, DeviceStatus};
//! use voxhome_lib::error::ControlError;
//!
//! struct Console;
//!
//! impl DeviceController for Console {
//!     async fn set_light(&self, action: &LightAction) -> Result<String, ControlError> {
//!         Ok(action.describe())
//!     }
//!     async fn set_tv(&self, action: &TvAction) -> Result<String, ControlError> {
//!         Ok(action.describe())
//!     }
//!     async fn status(&self) -> Result<DeviceStatus, ControlError> {
//!         Ok(DeviceStatus::default())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let engine = CommandEngine::default();
//!     let report = engine
//!         .execute("Lights off, TV on!\nLIGHT:wiz:OFF\nTV:ON", &Console)
//!         .await;
//!
//!     assert_eq!(report.summary(), "Turned off wiz | Turned on TV");
//! }
//! ```
//!
//! # Configuration
//!
//! Aliases, fallback color, pacing delay and messages are set through
//! [`EngineConfig`], which can be loaded from JSON.

#[cfg(feature = "http")]
mod assistant;
pub mod command;
mod config;
pub mod dispatch;
mod engine;
pub mod error;
pub mod llm;
pub mod types;

#[cfg(feature = "http")]
pub use assistant::{Assistant, Reply};
pub use config::EngineConfig;
pub use engine::CommandEngine;
pub use error::{ControlError, Error, ParseError, ProtocolError, Result, ValueError};
pub use types::{Brightness, ColorValue, HsColor, PowerState, RgbColor};
