//! Which interactions open and close a popover.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PopoverError;

/// The set of trigger interactions, parsed from a description such as
/// `"click"` or `"hover focus"`.
///
/// Each mode is recognized as a substring, so any separator works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TriggerOn {
    /// Clicking the trigger toggles the popover.
    pub click: bool,
    /// Hovering the trigger opens it; leaving closes it.
    pub hover: bool,
    /// Focusing the trigger opens it.
    pub focus: bool,
}

impl TriggerOn {
    /// Click only; the mode assumed before a trigger registers itself.
    pub const CLICK: Self = Self {
        click: true,
        hover: false,
        focus: false,
    };
}

impl FromStr for TriggerOn {
    type Err = PopoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let on = Self {
            click: s.contains("click"),
            hover: s.contains("hover"),
            focus: s.contains("focus"),
        };
        if on == Self::default() {
            return Err(PopoverError::UnknownTrigger(s.to_owned()));
        }
        Ok(on)
    }
}

impl fmt::Display for TriggerOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modes: Vec<&str> = [
            (self.click, "click"),
            (self.hover, "hover"),
            (self.focus, "focus"),
        ]
        .into_iter()
        .filter_map(|(enabled, name)| enabled.then_some(name))
        .collect();
        f.write_str(&modes.join(" "))
    }
}
