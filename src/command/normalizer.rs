// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turns one light fragment into a colon-delimited token list.

use std::fmt;

use super::tokenizer::LIGHT_PREFIX;

/// Ordered tokens of a light command.
///
/// Tokens keep their original case; keyword matching is done by the
/// resolver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenList(Vec<String>);

impl TokenList {
    /// Returns the tokens as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterates over the tokens.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if a token equals `literal` exactly.
    #[must_use]
    pub fn contains(&self, literal: &str) -> bool {
        self.iter().any(|token| token == literal)
    }

    /// Returns true if a token equals `keyword`, ignoring ASCII case.
    #[must_use]
    pub fn contains_keyword(&self, keyword: &str) -> bool {
        self.iter().any(|token| token.eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(":"))
    }
}

impl<S: Into<String>> FromIterator<S> for TokenList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Normalizes a light fragment into a [`TokenList`].
///
/// Text before the first `LIGHT:` is dropped, `[` and `/` become `:`, `]` and
/// whitespace are removed, and the result is split on `:`. This never fails;
/// missing tokens are dealt with by the resolver.
///
/// # Examples
///
/// ```
/// use voxhome_lib::command::normalize;
///
/// let tokens = normalize("ok LIGHT:wiz/ON [brightness=40]");
/// assert_eq!(tokens.to_string(), "LIGHT:wiz:ON:brightness=40");
/// assert_eq!(tokens.len(), 4);
/// ```
#[must_use]
pub fn normalize(fragment: &str) -> TokenList {
    let command = fragment
        .find(LIGHT_PREFIX)
        .map_or(fragment, |start| &fragment[start..]);

    let cleaned: String = command
        .chars()
        .filter(|c| *c != ']' && !c.is_whitespace())
        .map(|c| if c == '[' || c == '/' { ':' } else { c })
        .collect();

    cleaned.split(':').collect()
}
