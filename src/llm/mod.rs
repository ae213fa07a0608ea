// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Language-model side of the pipeline.
//!
//! The [`SYSTEM_PROMPT`] teaches the model the command vocabulary, the
//! [`CompletionClient`] fetches a response (requires the `http` feature), and
//! [`clean_for_speech`] strips the commands back out of it for display or
//! text-to-speech.

#[cfg(feature = "http")]
mod client;
mod prompt;
mod speech;

#[cfg(feature = "http")]
pub use client::{CompletionClient, CompletionConfig};
pub use prompt::{SYSTEM_PROMPT, format_prompt};
pub use speech::clean_for_speech;
