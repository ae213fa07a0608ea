// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outcomes of dispatched actions.

use std::fmt;

use super::DeviceStatus;
use crate::command::Target;

/// Outcome of one dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// The action succeeded; carries the controller's message.
    Done(String),
    /// A status query succeeded.
    Status(DeviceStatus),
    /// The action failed. Failures never abort the remaining actions.
    Failed {
        /// What the action addressed.
        target: Target,
        /// Error reported by the controller.
        message: String,
    },
}

impl ActionResult {
    /// Returns true if the action failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done(message) => f.write_str(message),
            Self::Status(status) => {
                let json = serde_json::to_string(status).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            Self::Failed {
                target: Target::Status,
                message,
            } => write!(f, "Error getting status: {message}"),
            Self::Failed { target, message } => write!(f, "Error controlling {target}: {message}"),
        }
    }
}

/// Ordered results of one response's actions.
///
/// Renders as the results joined with the configured separator, or as the
/// configured "no actions" message when the response carried no command.
///
/// # Examples
///
/// ```
/// use voxhome_lib::dispatch::{ActionResult, Report};
///
/// let report = Report::new(
///     vec![
///         ActionResult::Done("Turned on wiz".to_string()),
///         ActionResult::Done("Turned off TV".to_string()),
///     ],
///     " | ",
///     "Nothing to do.",
/// );
/// assert_eq!(report.to_string(), "Turned on wiz | Turned off TV");
///
/// let empty = Report::new(Vec::new(), " | ", "Nothing to do.");
/// assert_eq!(empty.summary(), "Nothing to do.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    results: Vec<ActionResult>,
    separator: String,
    empty_message: String,
}

impl Report {
    /// Creates a report from ordered results.
    #[must_use]
    pub fn new(
        results: Vec<ActionResult>,
        separator: impl Into<String>,
        empty_message: impl Into<String>,
    ) -> Self {
        Self {
            results,
            separator: separator.into(),
            empty_message: empty_message.into(),
        }
    }

    /// Returns the results in dispatch order.
    #[must_use]
    pub fn results(&self) -> &[ActionResult] {
        &self.results
    }

    /// Returns true if no action was dispatched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterates over the failed results.
    pub fn failures(&self) -> impl Iterator<Item = &ActionResult> {
        self.results.iter().filter(|r| r.is_failure())
    }

    /// Returns the aggregate text shown to the user.
    #[must_use]
    pub fn summary(&self) -> String {
        self.to_string()
    }

    /// Consumes the report and returns its results.
    #[must_use]
    pub fn into_results(self) -> Vec<ActionResult> {
        self.results
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.results.is_empty() {
            return f.write_str(&self.empty_message);
        }
        for (i, result) in self.results.iter().enumerate() {
            if i > 0 {
                f.write_str(&self.separator)?;
            }
            write!(f, "{result}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DeviceState;

    #[test]
    fn failure_display() {
        let light = ActionResult::Failed {
            target: Target::Light("wiz".to_string()),
            message: "device unreachable: timeout".to_string(),
        };
        assert_eq!(
            light.to_string(),
            "Error controlling wiz: device unreachable: timeout"
        );
        assert!(light.is_failure());

        let tv = ActionResult::Failed {
            target: Target::Tv,
            message: "rejected".to_string(),
        };
        assert_eq!(tv.to_string(), "Error controlling TV: rejected");

        let status = ActionResult::Failed {
            target: Target::Status,
            message: "hub offline".to_string(),
        };
        assert_eq!(status.to_string(), "Error getting status: hub offline");
    }

    #[test]
    fn status_renders_as_json() {
        let result = ActionResult::Status(
            DeviceStatus::default().with_device("light", DeviceState::new("off")),
        );
        assert_eq!(result.to_string(), r#"{"light":{"state":"off"}}"#);
        assert!(!result.is_failure());
    }

    #[test]
    fn report_counts_failures() {
        let report = Report::new(
            vec![
                ActionResult::Done("Turned on wiz".to_string()),
                ActionResult::Failed {
                    target: Target::Tv,
                    message: "rejected".to_string(),
                },
            ],
            " | ",
            "none",
        );
        assert_eq!(report.failures().count(), 1);
        assert_eq!(
            report.summary(),
            "Turned on wiz | Error controlling TV: rejected"
        );
        assert!(!report.is_empty());
        assert_eq!(report.into_results().len(), 2);
    }
}
