// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deployment configuration for the command engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::command::ResolverConfig;
use crate::dispatch::SequencerConfig;
use crate::error::{Error, ParseError};

/// Settings for a [`CommandEngine`](crate::CommandEngine).
///
/// Every field is optional in the JSON form; missing fields keep their
/// defaults.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use voxhome_lib::EngineConfig;
///
/// let config = EngineConfig::from_json_str(
///     r#"{
///         "resolver": { "aliases": ["desk", "ceiling"], "default_alias": "desk" },
///         "sequencer": { "pacing_delay_ms": 0 }
///     }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.resolver.default_alias(), "desk");
/// assert_eq!(config.sequencer.pacing_delay(), Duration::ZERO);
/// assert_eq!(config.sequencer.separator(), " | ");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How light commands are resolved.
    pub resolver: ResolverConfig,
    /// How actions are dispatched.
    pub sequencer: SequencerConfig,
}

impl EngineConfig {
    /// Sets the resolver settings.
    #[must_use]
    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }

    /// Sets the sequencer settings.
    #[must_use]
    pub fn with_sequencer(mut self, sequencer: SequencerConfig) -> Self {
        self.sequencer = sequencer;
        self
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the JSON is malformed or has wrong types.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config = serde_json::from_str(json).map_err(ParseError::from)?;
        Ok(config)
    }

    /// Reads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::Parse`]
    /// if its contents are not a valid configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading engine configuration");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::FallbackColor;
    use crate::types::HsColor;

    #[test]
    fn empty_object_is_default() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn custom_fallback_color() {
        let config = EngineConfig::from_json_str(
            r#"{"resolver": {"fallback_color": {"custom": [30, 100]}}}"#,
        )
        .unwrap();
        assert_eq!(
            config.resolver.fallback_color(),
            FallbackColor::Custom(HsColor::new(30, 100).unwrap())
        );
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = EngineConfig::from_json_str(r#"{"sequencer": {"pacing_delay_ms": "slow"}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EngineConfig::from_file("/nonexistent/voxhome.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn builder_overrides() {
        let config = EngineConfig::default()
            .with_resolver(ResolverConfig::default().with_default_alias("rgb"))
            .with_sequencer(SequencerConfig::default().with_separator("; "));
        assert_eq!(config.resolver.default_alias(), "rgb");
        assert_eq!(config.sequencer.separator(), "; ");
    }
}
