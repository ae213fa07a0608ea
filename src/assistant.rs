// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One request/response round trip: prompt, completion, dispatch.

use serde::Serialize;

use crate::dispatch::DeviceController;
use crate::engine::CommandEngine;
use crate::error::Error;
use crate::llm::{CompletionClient, clean_for_speech};

/// Answer to one user request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    /// Full model response, commands included.
    pub text: String,
    /// Response with commands removed, for display or speech synthesis.
    pub spoken_text: String,
    /// Aggregate result of the dispatched actions.
    pub action: String,
}

/// Ties a completion server, the command engine and a device controller
/// together.
///
/// # Examples
///
/// ```no_run
/// use voxhome_lib::command::{LightAction, TvAction};
/// use voxhome_lib::dispatch::{DeviceController, DeviceStatus};
/// use voxhome_lib::error::ControlError;
/// use voxhome_lib::llm::CompletionConfig;
/// use voxhome_lib::{Assistant, CommandEngine};
///
/// struct Console;
///
/// impl DeviceController for Console {
///     async fn set_light(&self, action: &LightAction) -> Result<String, ControlError> {
///         Ok(action.describe())
///     }
///     async fn set_tv(&self, action: &TvAction) -> Result<String, ControlError> {
///         Ok(action.describe())
///     }
///     async fn status(&self) -> Result<DeviceStatus, ControlError> {
///         Ok(DeviceStatus::default())
///     }
/// }
///
/// # async fn example() -> voxhome_lib::Result<()> {
/// let client = CompletionConfig::default().into_client()?;
/// let assistant = Assistant::new(client, CommandEngine::default(), Console);
///
/// let reply = assistant.handle("Make the room feel like a sunset").await?;
/// println!("{}", reply.spoken_text);
/// println!("{}", reply.action);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Assistant<C> {
    client: CompletionClient,
    engine: CommandEngine,
    controller: C,
}

impl<C: DeviceController> Assistant<C> {
    /// Creates an assistant.
    #[must_use]
    pub const fn new(client: CompletionClient, engine: CommandEngine, controller: C) -> Self {
        Self {
            client,
            engine,
            controller,
        }
    }

    /// Returns the command engine.
    #[must_use]
    pub const fn engine(&self) -> &CommandEngine {
        &self.engine
    }

    /// Returns the device controller.
    #[must_use]
    pub const fn controller(&self) -> &C {
        &self.controller
    }

    /// Asks the model, dispatches the commands in its answer and reports.
    ///
    /// # Errors
    ///
    /// Returns an error only if the completion request fails. Device failures
    /// are part of [`Reply::action`].
    pub async fn handle(&self, prompt: &str) -> Result<Reply, Error> {
        tracing::info!(prompt = %prompt, "Handling request");

        let text = self.client.complete(prompt).await?;
        let report = self.engine.execute(&text, &self.controller).await;
        if report.failures().next().is_some() {
            tracing::warn!(
                failures = report.failures().count(),
                "Some actions failed"
            );
        }

        Ok(Reply {
            spoken_text: clean_for_speech(&text),
            action: report.summary(),
            text,
        })
    }
}
