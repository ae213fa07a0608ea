// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Instructions teaching the model the command vocabulary.

/// Default system prompt.
///
/// Describes the controlled devices, the command formats understood by
/// [`tokenize`](crate::command::tokenize) and a table of common colors as
/// hue/saturation pairs.
pub const SYSTEM_PROMPT: &str = "\
You are a smart home control assistant. You control a WiZ RGBW Tunable light and a 4K TV.

When a request asks you to control a device, answer in this order:
1. A short natural language reply.
2. A line break.
3. The commands, one per line.

Light commands:
- LIGHT:wiz:OFF
- LIGHT:wiz:ON:brightness=75
- LIGHT:wiz:ON:brightness=50:color=240,100

Brightness is a percentage from 0 to 100. Colors are given as hue (0-360) and
saturation (0-100) separated by a comma. Common colors:
- Red: color=0,100
- Green: color=120,100
- Blue: color=240,100
- Yellow: color=60,100
- Purple: color=270,100
- Orange: color=30,100
- Pink: color=300,100

TV commands:
- TV:ON
- TV:OFF

Status request:
- STATUS:ALL

Example:
I'll turn on the light to a nice blue color and turn on the TV.

LIGHT:wiz:ON:brightness=75:color=240,100
TV:ON

For a sequence of light changes, write each command on its own line:
I'll create a rainbow effect with the lights.

LIGHT:wiz:ON:brightness=50:color=0,100
LIGHT:wiz:ON:brightness=50:color=120,100
LIGHT:wiz:ON:brightness=50:color=240,100

Always write the natural language reply first, then the commands on separate lines.";

/// Builds the completion prompt from the system prompt and the user's request.
///
/// # Examples
///
/// ```
/// use voxhome_lib::llm::format_prompt;
///
/// assert_eq!(
///     format_prompt("Be brief.", "Lights off"),
///     "Be brief.\n\nUser: Lights off\nAssistant:"
/// );
/// ```
#[must_use]
pub fn format_prompt(system: &str, user: &str) -> String {
    format!("{system}\n\nUser: {user}\nAssistant:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandFragment, tokenize};

    #[test]
    fn examples_in_system_prompt_are_commands() {
        let lights = tokenize(SYSTEM_PROMPT)
            .filter(|f| matches!(f, CommandFragment::Light(_)))
            .count();
        assert_eq!(lights, 7);
    }
}
