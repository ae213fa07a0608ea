// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response-to-report pipeline.

use crate::command::{
    CommandFragment, DeviceAction, Fragments, Resolver, TvAction, normalize, tokenize,
};
use crate::config::EngineConfig;
use crate::dispatch::{DeviceController, Report, Sequencer};

/// Turns model responses into device actions and dispatches them.
///
/// Extraction is pure: the same text always yields the same actions.
///
/// # Examples
///
/// ```
/// use voxhome_lib::CommandEngine;
/// use voxhome_lib::command::DeviceAction;
/// use voxhome_lib::types::{Brightness, HsColor};
///
/// let engine = CommandEngine::default();
/// let actions = engine.extract(
///     "Dimming to a calm blue.\nLIGHT:wiz:ON:brightness=240,100\nTV:OFF",
/// );
///
/// assert_eq!(actions.len(), 2);
/// let DeviceAction::Light(light) = &actions[0] else { panic!() };
/// assert_eq!(light.brightness(), Some(Brightness::HALF));
/// assert_eq!(light.color(), Some(HsColor::blue()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandEngine {
    resolver: Resolver,
    sequencer: Sequencer,
}

impl CommandEngine {
    /// Creates an engine from its configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            resolver: Resolver::new(config.resolver),
            sequencer: Sequencer::new(config.sequencer),
        }
    }

    /// Returns the resolver.
    #[must_use]
    pub const fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Returns the sequencer.
    #[must_use]
    pub const fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Scans `text` for command fragments.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn fragments<'a>(&self, text: &'a str) -> Fragments<'a> {
        tokenize(text)
    }

    /// Lazily resolves every command in `text`, in source order.
    pub fn actions<'a>(&'a self, text: &'a str) -> impl Iterator<Item = DeviceAction> + 'a {
        self.fragments(text).map(move |fragment| self.to_action(fragment))
    }

    /// Resolves every command in `text`, in source order.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<DeviceAction> {
        self.actions(text).collect()
    }

    /// Resolves and dispatches every command in `text`.
    ///
    /// Never fails: dispatch errors are recorded in the report.
    pub async fn execute<C: DeviceController>(&self, text: &str, controller: &C) -> Report {
        let actions = self.extract(text);
        tracing::debug!(count = actions.len(), "Extracted actions from response");
        self.sequencer.run(actions, controller).await
    }

    fn to_action(&self, fragment: CommandFragment<'_>) -> DeviceAction {
        match fragment {
            CommandFragment::Light(light) => {
                DeviceAction::Light(self.resolver.resolve(&normalize(light)))
            }
            CommandFragment::Tv(power) => DeviceAction::Tv(TvAction::new(power)),
            CommandFragment::Status(_) => DeviceAction::Status,
        }
    }
}

impl From<EngineConfig> for CommandEngine {
    fn from(config: EngineConfig) -> Self {
        Self::new(config)
    }
}
