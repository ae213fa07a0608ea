// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `VoxHome` library.
//!
//! The command-extraction core never fails: malformed model output degrades to
//! documented defaults. Errors only exist at the I/O edges of the crate:
//! value validation, the language-model completion client, configuration
//! loading and device controllers.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the language model.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response or a configuration document.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A device controller rejected or failed an operation.
    #[error("control error: {0}")]
    Control(#[from] ControlError),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// A hue value is outside the valid range (0-360).
    #[error("hue value {0} is out of range [0, 360]")]
    InvalidHue(u16),

    /// A saturation value is outside the valid range (0-100).
    #[error("saturation value {0} is out of range [0, 100]")]
    InvalidSaturation(u8),

    /// Invalid hex color string.
    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),
}

/// Errors related to communication with the completion endpoint.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing completion responses and configuration.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),
}

/// Errors reported by a [`DeviceController`](crate::dispatch::DeviceController).
///
/// The sequencer turns these into failure-tagged results; they never abort a
/// sequence of actions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// The device could not be reached.
    #[error("device unreachable: {0}")]
    Unreachable(String),

    /// The device or its hub rejected the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The alias does not name a known device.
    #[error("unknown device: {0}")]
    UnknownDevice(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 100]");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::InvalidHue(400);
        let err: Error = value_err.into();
        assert!(matches!(err, Error::Value(ValueError::InvalidHue(400))));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("response".to_string());
        assert_eq!(err.to_string(), "missing field in response: response");
    }

    #[test]
    fn control_error_display() {
        let err = ControlError::Unreachable("hub offline".to_string());
        assert_eq!(err.to_string(), "device unreachable: hub offline");

        let err: Error = ControlError::UnknownDevice("lamp".to_string()).into();
        assert_eq!(err.to_string(), "control error: unknown device: lamp");
    }
}
