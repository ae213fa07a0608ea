// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered, paced dispatch of device actions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ActionResult, DeviceController, Report};
use crate::command::DeviceAction;

/// Settings for [`Sequencer`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use voxhome_lib::dispatch::SequencerConfig;
///
/// let config = SequencerConfig::default().with_pacing_delay(Duration::from_millis(500));
/// assert_eq!(config.separator(), " | ");
///
/// let config: SequencerConfig = serde_json::from_str(r#"{"pacing_delay_ms": 250}"#).unwrap();
/// assert_eq!(config.pacing_delay(), Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    #[serde(rename = "pacing_delay_ms", with = "millis")]
    pacing_delay: Duration,
    separator: String,
    no_actions_message: String,
}

impl SequencerConfig {
    /// Default wait between consecutive dispatches.
    pub const DEFAULT_PACING_DELAY: Duration = Duration::from_secs(2);
    /// Default separator between results.
    pub const DEFAULT_SEPARATOR: &'static str = " | ";
    /// Default message for a response without commands.
    pub const DEFAULT_NO_ACTIONS_MESSAGE: &'static str =
        "I understand, but I don't see any actions to take.";

    /// Sets the wait between consecutive dispatches.
    #[must_use]
    pub fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = delay;
        self
    }

    /// Sets the separator used to join results.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the message reported when there is nothing to dispatch.
    #[must_use]
    pub fn with_no_actions_message(mut self, message: impl Into<String>) -> Self {
        self.no_actions_message = message.into();
        self
    }

    /// Returns the wait between consecutive dispatches.
    #[must_use]
    pub const fn pacing_delay(&self) -> Duration {
        self.pacing_delay
    }

    /// Returns the result separator.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns the "no actions" message.
    #[must_use]
    pub fn no_actions_message(&self) -> &str {
        &self.no_actions_message
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            pacing_delay: Self::DEFAULT_PACING_DELAY,
            separator: Self::DEFAULT_SEPARATOR.to_string(),
            no_actions_message: Self::DEFAULT_NO_ACTIONS_MESSAGE.to_string(),
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Dispatches actions one at a time, in order.
///
/// A failed action is recorded in the report and the next action still runs.
/// The pacing delay is only applied between actions, never before the first
/// or after the last.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    config: SequencerConfig,
}

impl Sequencer {
    /// Creates a sequencer with the given settings.
    #[must_use]
    pub const fn new(config: SequencerConfig) -> Self {
        Self { config }
    }

    /// Returns the settings.
    #[must_use]
    pub const fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Dispatches every action through `controller` and collects the results.
    pub async fn run<C, I>(&self, actions: I, controller: &C) -> Report
    where
        C: DeviceController,
        I: IntoIterator<Item = DeviceAction>,
    {
        let actions: Vec<DeviceAction> = actions.into_iter().collect();

        if actions.is_empty() {
            tracing::debug!("No actions to dispatch");
        } else {
            tracing::info!(count = actions.len(), "Dispatching actions");
        }

        let mut results = Vec::with_capacity(actions.len());
        for (index, action) in actions.iter().enumerate() {
            if index > 0 && !self.config.pacing_delay.is_zero() {
                tokio::time::sleep(self.config.pacing_delay).await;
            }
            results.push(dispatch(action, controller).await);
        }

        Report::new(
            results,
            self.config.separator.clone(),
            self.config.no_actions_message.clone(),
        )
    }
}

async fn dispatch<C: DeviceController>(action: &DeviceAction, controller: &C) -> ActionResult {
    let outcome = match action {
        DeviceAction::Light(light) => controller.set_light(light).await.map(ActionResult::Done),
        DeviceAction::Tv(tv) => controller.set_tv(tv).await.map(ActionResult::Done),
        DeviceAction::Status => controller.status().await.map(ActionResult::Status),
    };

    match outcome {
        Ok(result) => {
            tracing::debug!(device = %action.target(), "Action dispatched");
            result
        }
        Err(e) => {
            let target = action.target();
            tracing::warn!(device = %target, error = %e, "Action failed, continuing");
            ActionResult::Failed {
                target,
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{LightAction, TvAction};
    use crate::dispatch::DeviceStatus;
    use crate::error::ControlError;
    use crate::types::PowerState;

    struct Flaky;

    impl DeviceController for Flaky {
        async fn set_light(&self, action: &LightAction) -> Result<String, ControlError> {
            if action.alias() == "rgb" {
                Err(ControlError::Unreachable("timeout".to_string()))
            } else {
                Ok(action.describe())
            }
        }

        async fn set_tv(&self, action: &TvAction) -> Result<String, ControlError> {
            Ok(action.describe())
        }

        async fn status(&self) -> Result<DeviceStatus, ControlError> {
            Err(ControlError::Rejected("hub offline".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn failures_do_not_abort() {
        let sequencer = Sequencer::default();
        let actions = vec![
            DeviceAction::from(LightAction::off("rgb")),
            DeviceAction::from(LightAction::on("wiz")),
            DeviceAction::Status,
        ];

        let report = sequencer.run(actions, &Flaky).await;

        assert_eq!(report.results().len(), 3);
        assert_eq!(report.failures().count(), 2);
        assert_eq!(
            report.summary(),
            "Error controlling rgb: device unreachable: timeout | Turned on wiz | \
             Error getting status: request rejected: hub offline"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn single_action_is_not_delayed() {
        let sequencer = Sequencer::default();
        let start = tokio::time::Instant::now();

        let report = sequencer
            .run([DeviceAction::from(TvAction::new(PowerState::On))], &Flaky)
            .await;

        assert_eq!(report.summary(), "Turned on TV");
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_between_actions_only() {
        let sequencer = Sequencer::new(
            SequencerConfig::default().with_pacing_delay(Duration::from_millis(300)),
        );
        let start = tokio::time::Instant::now();

        let actions = (0..4).map(|_| DeviceAction::from(LightAction::on("wiz")));
        let report = sequencer.run(actions, &Flaky).await;

        assert_eq!(report.results().len(), 4);
        assert_eq!(start.elapsed(), Duration::from_millis(900));
    }

    #[tokio::test]
    async fn empty_sequence_reports_message() {
        let sequencer =
            Sequencer::new(SequencerConfig::default().with_no_actions_message("Nothing to do."));
        let report = sequencer.run(Vec::new(), &Flaky).await;
        assert!(report.is_empty());
        assert_eq!(report.summary(), "Nothing to do.");
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = SequencerConfig::default()
            .with_pacing_delay(Duration::from_millis(1500))
            .with_separator(", ");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""pacing_delay_ms":1500"#));
        let back: SequencerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
