// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stripping command tokens from a response before it is spoken.

use std::sync::LazyLock;

use regex::Regex;

static LIGHT_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)LIGHT:\w+:(ON|OFF)(:\w+=[\w,]+)*").expect("light command pattern is valid")
});
static TV_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)TV:(ON|OFF)").expect("tv command pattern is valid"));
static STATUS_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)STATUS:\S*").expect("status command pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,;:!?])").expect("punctuation pattern is valid"));
static REPEATED_PERIODS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.+").expect("period pattern is valid"));

/// Removes command tokens and tidies the remaining text for speech.
///
/// Whitespace runs collapse to one space, spaces before punctuation are
/// dropped and repeated periods are merged.
///
/// # Examples
///
/// ```
/// use voxhome_lib::llm::clean_for_speech;
///
/// let text = "Turning on the TV and making it blue.\n\nLIGHT:wiz:ON:color=240,100\nTV:ON";
/// assert_eq!(clean_for_speech(text), "Turning on the TV and making it blue.");
/// ```
#[must_use]
pub fn clean_for_speech(text: &str) -> String {
    let text = LIGHT_COMMAND.replace_all(text, "");
    let text = TV_COMMAND.replace_all(&text, "");
    let text = STATUS_COMMAND.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = SPACE_BEFORE_PUNCTUATION.replace_all(&text, "$1");
    let text = REPEATED_PERIODS.replace_all(&text, ".");
    text.trim().to_string()
}
