// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Slices raw model output into command fragments.

use crate::types::PowerState;

/// Prefix that opens a light command.
pub const LIGHT_PREFIX: &str = "LIGHT:";
/// Prefix that opens a TV command.
pub const TV_PREFIX: &str = "TV:";
/// Prefix that opens a status request.
pub const STATUS_PREFIX: &str = "STATUS:";

/// Characters trimmed from the end of a light fragment.
const TRAILING_SEPARATORS: &[char] = &[',', ';', '.', '`'];

/// Kind of command a prefix introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `LIGHT:`
    Light,
    /// `TV:`
    Tv,
    /// `STATUS:`
    Status,
}

impl CommandKind {
    const ALL: [Self; 3] = [Self::Light, Self::Tv, Self::Status];

    /// Returns the prefix text for this kind.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Light => LIGHT_PREFIX,
            Self::Tv => TV_PREFIX,
            Self::Status => STATUS_PREFIX,
        }
    }
}

/// One command occurrence in a model response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFragment<'a> {
    /// Light command text, starting at `LIGHT:`.
    Light(&'a str),
    /// TV command, already resolved to a power state.
    Tv(PowerState),
    /// Status request; the text runs to the end of the response.
    Status(&'a str),
}

impl CommandFragment<'_> {
    /// Returns the command kind.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Light(_) => CommandKind::Light,
            Self::Tv(_) => CommandKind::Tv,
            Self::Status(_) => CommandKind::Status,
        }
    }
}

/// Returns the command fragments of `text`, in order of appearance.
///
/// The returned iterator is lazy and yields nothing when the text carries no
/// recognized prefix, which callers treat as a plain conversational reply.
///
/// Every occurrence of a prefix counts, even when it is glued to the word
/// before it (`好的LIGHT:wiz:ON`). A light fragment ends at the next prefix
/// occurrence of any kind, at a line break, or at the end of the text, and
/// loses trailing separators (`,` `;` `.` `` ` `` and whitespace). Ending at
/// a line break rather than only at the next `LIGHT:` is deliberate: models
/// put one command per line and follow it with prose.
///
/// # Examples
///
/// ```
/// use voxhome_lib::command::{CommandFragment, tokenize};
/// use voxhome_lib::types::PowerState;
///
/// let text = "Sure! LIGHT:wiz:ON:color=0,100, LIGHT:wiz:ON:color=240,100 TV:OFF";
/// let fragments: Vec<_> = tokenize(text).collect();
/// assert_eq!(
///     fragments,
///     vec![
///         CommandFragment::Light("LIGHT:wiz:ON:color=0,100"),
///         CommandFragment::Light("LIGHT:wiz:ON:color=240,100"),
///         CommandFragment::Tv(PowerState::Off),
///     ]
/// );
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Fragments<'_> {
    Fragments { text, cursor: 0 }
}

/// Iterator over the command fragments of a response.
///
/// Created by [`tokenize`].
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> Iterator for Fragments<'a> {
    type Item = CommandFragment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (start, kind) = next_prefix(self.text, self.cursor)?;
            let body_start = start + kind.prefix().len();
            self.cursor = body_start;

            match kind {
                CommandKind::Light => {
                    let end = fragment_end(self.text, body_start);
                    let fragment = self.text[start..end].trim_end_matches(|c: char| {
                        c.is_whitespace() || TRAILING_SEPARATORS.contains(&c)
                    });
                    return Some(CommandFragment::Light(fragment));
                }
                CommandKind::Tv => {
                    let end = fragment_end(self.text, body_start);
                    let body = self.text[body_start..end].trim_start();
                    if let Some(power) = tv_power(body) {
                        return Some(CommandFragment::Tv(power));
                    }
                    tracing::debug!(fragment = %&self.text[start..end], "Ignoring TV command without ON/OFF");
                }
                CommandKind::Status => {
                    return Some(CommandFragment::Status(self.text[start..].trim_end()));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Fragments<'_> {}

/// Finds the earliest prefix occurrence at or after `from`.
fn next_prefix(text: &str, from: usize) -> Option<(usize, CommandKind)> {
    CommandKind::ALL
        .iter()
        .filter_map(|kind| find_prefix(text, from, kind.prefix()).map(|pos| (pos, *kind)))
        .min_by_key(|(pos, _)| *pos)
}

fn find_prefix(text: &str, from: usize, prefix: &str) -> Option<usize> {
    text[from..].find(prefix).map(|offset| from + offset)
}

fn fragment_end(text: &str, body_start: usize) -> usize {
    let line_end = text[body_start..]
        .find(['\n', '\r'])
        .map_or(text.len(), |offset| body_start + offset);
    next_prefix(text, body_start).map_or(line_end, |(pos, _)| pos.min(line_end))
}

/// Reads the power keyword at the start of a TV body (`OFF please` is off).
fn tv_power(body: &str) -> Option<PowerState> {
    ["off".len(), "on".len()]
        .into_iter()
        .find_map(|len| body.get(..len)?.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<CommandFragment<'_>> {
        tokenize(text).collect()
    }

    #[test]
    fn no_prefix_yields_nothing() {
        assert!(collect("Sure, I can tell you a joke instead.").is_empty());
        assert!(collect("").is_empty());
    }

    #[test]
    fn single_light_command_on_its_own_line() {
        let text = "I'll make it blue.\n\nLIGHT:wiz:ON:brightness=75:color=240,100\n";
        assert_eq!(
            collect(text),
            vec![CommandFragment::Light("LIGHT:wiz:ON:brightness=75:color=240,100")]
        );
    }

    #[test]
    fn multiple_light_commands_keep_order() {
        let text = "Rainbow!\nLIGHT:wiz:ON:color=0,100\nLIGHT:wiz:ON:color=120,100\nLIGHT:wiz:ON:color=240,100";
        let fragments = collect(text);
        assert_eq!(
            fragments,
            vec![
                CommandFragment::Light("LIGHT:wiz:ON:color=0,100"),
                CommandFragment::Light("LIGHT:wiz:ON:color=120,100"),
                CommandFragment::Light("LIGHT:wiz:ON:color=240,100"),
            ]
        );
    }

    #[test]
    fn light_fragment_stops_at_next_prefix_on_same_line() {
        let text = "LIGHT:wiz:ON:color=240,100 TV:ON";
        assert_eq!(
            collect(text),
            vec![
                CommandFragment::Light("LIGHT:wiz:ON:color=240,100"),
                CommandFragment::Tv(PowerState::On),
            ]
        );
    }

    #[test]
    fn trailing_separators_are_trimmed() {
        let text = "LIGHT:wiz:ON:color=0,100,  \t";
        assert_eq!(collect(text), vec![CommandFragment::Light("LIGHT:wiz:ON:color=0,100")]);

        let text = "`LIGHT:wiz:OFF`.";
        assert_eq!(collect(text), vec![CommandFragment::Light("LIGHT:wiz:OFF")]);
    }

    #[test]
    fn tv_resolves_at_scan_time() {
        assert_eq!(collect("TV:ON"), vec![CommandFragment::Tv(PowerState::On)]);
        assert_eq!(collect("TV:OFF please"), vec![CommandFragment::Tv(PowerState::Off)]);
        assert_eq!(collect("TV: off"), vec![CommandFragment::Tv(PowerState::Off)]);
    }

    #[test]
    fn tv_without_power_keyword_is_skipped() {
        assert_eq!(
            collect("TV:MUTE\nLIGHT:wiz:OFF"),
            vec![CommandFragment::Light("LIGHT:wiz:OFF")]
        );
    }

    #[test]
    fn prefix_glued_to_preceding_text() {
        assert_eq!(
            collect("好的LIGHT:wiz:ON:color=0,100"),
            vec![CommandFragment::Light("LIGHT:wiz:ON:color=0,100")]
        );
        assert_eq!(
            collect("VoilàLIGHT:wiz:OFF"),
            vec![CommandFragment::Light("LIGHT:wiz:OFF")]
        );
        assert_eq!(collect("Done:2TV:ON"), vec![CommandFragment::Tv(PowerState::On)]);
        assert_eq!(collect("OkayTV:OFF"), vec![CommandFragment::Tv(PowerState::Off)]);
    }

    #[test]
    fn tv_keyword_is_read_from_the_start_of_the_body() {
        assert_eq!(collect("TV:Off."), vec![CommandFragment::Tv(PowerState::Off)]);
        assert_eq!(collect("TV:on!"), vec![CommandFragment::Tv(PowerState::On)]);
        assert!(collect("TV:1").is_empty());
    }

    #[test]
    fn status_takes_remaining_text() {
        let text = "Checking.\nSTATUS:ALL\n";
        assert_eq!(collect(text), vec![CommandFragment::Status("STATUS:ALL")]);
    }

    #[test]
    fn commands_after_status_are_still_found() {
        let text = "STATUS:ALL\nTV:OFF";
        let kinds: Vec<_> = collect(text).iter().map(CommandFragment::kind).collect();
        assert_eq!(kinds, vec![CommandKind::Status, CommandKind::Tv]);
    }

    #[test]
    fn mixed_commands_in_order() {
        let text = "Done.\nTV:ON\nLIGHT:rgb:OFF\nSTATUS:ALL";
        let kinds: Vec<_> = collect(text).iter().map(CommandFragment::kind).collect();
        assert_eq!(
            kinds,
            vec![CommandKind::Tv, CommandKind::Light, CommandKind::Status]
        );
    }

    #[test]
    fn iterator_is_fused() {
        let mut fragments = tokenize("TV:ON");
        assert!(fragments.next().is_some());
        assert!(fragments.next().is_none());
        assert!(fragments.next().is_none());
    }

    #[test]
    fn non_ascii_text_is_handled() {
        let text = "D'accord ✨ LIGHT:wiz:ON:color=300,100\nvoilà";
        assert_eq!(
            collect(text),
            vec![CommandFragment::Light("LIGHT:wiz:ON:color=300,100")]
        );
    }
}
