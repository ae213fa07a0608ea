// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command extraction from language-model output.
//!
//! The model is asked to append command tokens to its natural-language
//! answer. Those tokens form the only protocol between the model and the
//! devices, and nothing enforces it, so every stage here tolerates drift.
//!
//! # Grammar
//!
//! ```text
//! command    = light | tv | status
//! light      = "LIGHT:" alias ":" power *( ":" parameter )
//! power      = "ON" | "OFF"                       ; case-insensitive
//! parameter  = "brightness=" int                  ; 0-100
//!            | "color=" int "," int [ "," int ]   ; hue,sat or r,g,b
//! tv         = "TV:ON" | "TV:OFF"
//! status     = "STATUS:" *any
//! ```
//!
//! Parameter order is not significant, unknown parameters are ignored, and a
//! single response may carry several `LIGHT:` commands to be applied in
//! sequence.
//!
//! # Stages
//!
//! | Stage | Item | Input | Output |
//! |-------|------|-------|--------|
//! | Tokenizer | [`tokenize`] | response text | [`CommandFragment`]s |
//! | Normalizer | [`normalize`] | light fragment | [`TokenList`] |
//! | Resolver | [`Resolver`] | [`TokenList`] | [`LightAction`] |
//!
//! Repair rules applied by the resolver are listed in [`Repair`].
//!
//! # Examples
//!
//! ```
//! use voxhome_lib::command::{CommandFragment, Resolver, normalize, tokenize};
//! use voxhome_lib::types::HsColor;
//!
//! let text = "Turning it red.\nLIGHT:wiz:ON:brightness=80:color=0,100";
//! let resolver = Resolver::default();
//!
//! let actions: Vec<_> = tokenize(text)
//!     .filter_map(|fragment| match fragment {
//!         CommandFragment::Light(light) => Some(resolver.resolve(&normalize(light))),
//!         _ => None,
//!     })
//!     .collect();
//!
//! assert_eq!(actions.len(), 1);
//! assert_eq!(actions[0].color(), Some(HsColor::red()));
//! ```

mod action;
mod normalizer;
mod repair;
mod resolver;
mod tokenizer;

pub use action::{DeviceAction, LightAction, Target, TvAction};
pub use normalizer::{TokenList, normalize};
pub use repair::{BrightnessSlot, Field, FieldOutcome, Repair, parse_brightness, parse_color};
pub use resolver::{FallbackColor, Resolution, Resolver, ResolverConfig};
pub use tokenizer::{
    CommandFragment, CommandKind, Fragments, LIGHT_PREFIX, STATUS_PREFIX, TV_PREFIX, tokenize,
};
