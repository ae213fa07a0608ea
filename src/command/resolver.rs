// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resolves a light token list into a [`LightAction`].
//!
//! Resolution never fails. Missing or malformed fields fall back to the
//! defaults held in [`ResolverConfig`], and each substitution is recorded as a
//! [`Repair`].

use serde::{Deserialize, Serialize};

use super::action::LightAction;
use super::normalizer::TokenList;
use super::repair::{BrightnessSlot, FieldOutcome, Repair, parse_brightness, parse_color};
use crate::types::{Brightness, ColorValue, HsColor, PowerState};

const BRIGHTNESS_KEY: &str = "brightness=";
const COLOR_KEY: &str = "color=";

/// Color used when a `color=` value cannot be understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackColor {
    /// White, hue 0 saturation 0.
    #[default]
    White,
    /// Blue, hue 240 saturation 100.
    Blue,
    /// Any other hue/saturation pair.
    Custom(HsColor),
}

impl FallbackColor {
    /// Returns the color this policy stands for.
    #[must_use]
    pub const fn color(&self) -> HsColor {
        match self {
            Self::White => HsColor::white(),
            Self::Blue => HsColor::blue(),
            Self::Custom(color) => *color,
        }
    }
}

/// Defaults applied while resolving light commands.
///
/// # Examples
///
/// ```
/// use voxhome_lib::command::{FallbackColor, ResolverConfig};
/// use voxhome_lib::types::Brightness;
///
/// let config = ResolverConfig::default()
///     .with_aliases(["wiz", "rgb", "desk"])
///     .with_fallback_color(FallbackColor::Blue)
///     .with_misplaced_color_brightness(Brightness::new(60).unwrap());
///
/// assert_eq!(config.default_alias(), "wiz");
/// assert_eq!(config.aliases().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    aliases: Vec<String>,
    default_alias: String,
    fallback_color: FallbackColor,
    misplaced_color_brightness: Brightness,
}

impl ResolverConfig {
    /// Alias used when a command names no known light.
    pub const DEFAULT_ALIAS: &'static str = "wiz";

    /// Aliases recognized out of the box, in order of preference.
    pub const DEFAULT_ALIASES: [&'static str; 2] = ["wiz", "rgb"];

    /// Sets the recognized aliases, in order of preference.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the alias used when none is recognized.
    #[must_use]
    pub fn with_default_alias(mut self, alias: impl Into<String>) -> Self {
        self.default_alias = alias.into();
        self
    }

    /// Sets the color used for unreadable `color=` values.
    #[must_use]
    pub fn with_fallback_color(mut self, fallback: FallbackColor) -> Self {
        self.fallback_color = fallback;
        self
    }

    /// Sets the brightness used when a color is found in the brightness slot.
    #[must_use]
    pub fn with_misplaced_color_brightness(mut self, brightness: Brightness) -> Self {
        self.misplaced_color_brightness = brightness;
        self
    }

    /// Returns the recognized aliases.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the default alias.
    #[must_use]
    pub fn default_alias(&self) -> &str {
        &self.default_alias
    }

    /// Returns the fallback color policy.
    #[must_use]
    pub fn fallback_color(&self) -> FallbackColor {
        self.fallback_color
    }

    /// Returns the brightness used for a misplaced color.
    #[must_use]
    pub fn misplaced_color_brightness(&self) -> Brightness {
        self.misplaced_color_brightness
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            aliases: Self::DEFAULT_ALIASES.map(String::from).to_vec(),
            default_alias: Self::DEFAULT_ALIAS.to_string(),
            fallback_color: FallbackColor::default(),
            misplaced_color_brightness: Brightness::HALF,
        }
    }
}

/// A resolved action together with the repairs that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The resolved light action.
    pub action: LightAction,
    /// Repairs applied, in the order they were made.
    pub repairs: Vec<Repair>,
}

/// Resolves light token lists into actions.
///
/// # Examples
///
/// ```
/// use voxhome_lib::command::{Resolver, normalize};
/// use voxhome_lib::types::{HsColor, PowerState};
///
/// let resolver = Resolver::default();
/// let action = resolver.resolve(&normalize("LIGHT:wiz:ON:brightness=50:color=240,100"));
///
/// assert_eq!(action.alias(), "wiz");
/// assert_eq!(action.power(), PowerState::On);
/// assert_eq!(action.brightness().unwrap().value(), 50);
/// assert_eq!(action.color(), Some(HsColor::blue()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Creates a resolver with the given defaults.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Returns the resolver configuration.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves a token list into a light action.
    #[must_use]
    pub fn resolve(&self, tokens: &TokenList) -> LightAction {
        self.resolve_with_repairs(tokens).action
    }

    /// Resolves a token list, also reporting every repair applied.
    #[must_use]
    pub fn resolve_with_repairs(&self, tokens: &TokenList) -> Resolution {
        let mut repairs = Vec::new();

        let alias = self.resolve_alias(tokens, &mut repairs);
        let power = resolve_power(tokens, &mut repairs);

        if power == PowerState::Off {
            let count = tokens.iter().filter(|token| parameter(token).is_some()).count();
            if count > 0 {
                repairs.push(Repair::IgnoredParameters { count });
            }
            return finish(LightAction::off(alias), repairs, tokens);
        }

        let mut brightness = None;
        let mut color = None;

        // later parameters overwrite earlier ones
        for token in tokens.iter() {
            match parameter(token) {
                Some(Parameter::Brightness(raw)) => {
                    let outcome = parse_brightness(raw);
                    note(&outcome, &mut repairs);
                    match outcome.value() {
                        Some(BrightnessSlot::Level(level)) => brightness = Some(level),
                        Some(BrightnessSlot::MisplacedColor(hs)) => {
                            color = Some(ColorValue::Hs(hs));
                            brightness = Some(self.config.misplaced_color_brightness);
                        }
                        None => brightness = None,
                    }
                }
                Some(Parameter::Color(raw)) => {
                    let outcome = parse_color(raw);
                    note(&outcome, &mut repairs);
                    color = Some(
                        outcome
                            .value()
                            .unwrap_or(ColorValue::Hs(self.config.fallback_color.color())),
                    );
                }
                None => {}
            }
        }

        let mut action = LightAction::on(alias);
        if let Some(level) = brightness {
            action = action.with_brightness(level);
        }
        if let Some(value) = color {
            action = action.with_color(value);
        }
        finish(action, repairs, tokens)
    }

    fn resolve_alias(&self, tokens: &TokenList, repairs: &mut Vec<Repair>) -> String {
        if let Some(alias) = self.config.aliases.iter().find(|alias| tokens.contains(alias)) {
            return alias.clone();
        }
        repairs.push(Repair::MissingAlias {
            default: self.config.default_alias.clone(),
        });
        self.config.default_alias.clone()
    }
}

/// A recognized parameter token and its raw value.
enum Parameter<'a> {
    Brightness(&'a str),
    Color(&'a str),
}

fn parameter(token: &str) -> Option<Parameter<'_>> {
    let value = |key: &str| {
        token
            .get(..key.len())
            .filter(|head| head.eq_ignore_ascii_case(key))
            .map(|_| &token[key.len()..])
    };
    value(BRIGHTNESS_KEY)
        .map(Parameter::Brightness)
        .or_else(|| value(COLOR_KEY).map(Parameter::Color))
}

fn resolve_power(tokens: &TokenList, repairs: &mut Vec<Repair>) -> PowerState {
    if tokens.contains_keyword("off") {
        PowerState::Off
    } else if tokens.contains_keyword("on") {
        PowerState::On
    } else {
        repairs.push(Repair::MissingPower);
        PowerState::On
    }
}

fn note<T>(outcome: &FieldOutcome<T>, repairs: &mut Vec<Repair>) {
    if let Some(repair) = outcome.repair() {
        repairs.push(repair.clone());
    }
}

fn finish(action: LightAction, repairs: Vec<Repair>, tokens: &TokenList) -> Resolution {
    for repair in &repairs {
        tracing::debug!(command = %tokens, repair = %repair, "Repaired light command");
    }
    Resolution { action, repairs }
}
