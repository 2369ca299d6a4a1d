//! Interaction states.

use serde::{Deserialize, Serialize};

/// Selects which configured variant of a property is active.
///
/// `All` is an editing convenience: it is the variant a host writes when one
/// value should apply everywhere. Tiles are only ever in one of the four
/// concrete states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    All,
    Selected,
    #[default]
    Unselected,
    #[serde(alias = "hover")]
    Hovered,
    Disabled,
}

impl State {
    /// The four states a tile can actually be in.
    pub const CONCRETE: [State; 4] = [
        State::Selected,
        State::Unselected,
        State::Hovered,
        State::Disabled,
    ];

    /// Every state, `All` first.
    pub const ALL_STATES: [State; 5] = [
        State::All,
        State::Selected,
        State::Unselected,
        State::Hovered,
        State::Disabled,
    ];

    /// The single-letter key suffix used by host configuration objects.
    pub fn suffix(self) -> char {
        match self {
            State::All => 'A',
            State::Selected => 'S',
            State::Unselected => 'U',
            State::Hovered => 'H',
            State::Disabled => 'D',
        }
    }

    /// Parse a key suffix.
    pub fn from_suffix(c: char) -> Option<Self> {
        match c {
            'A' => Some(State::All),
            'S' => Some(State::Selected),
            'U' => Some(State::Unselected),
            'H' => Some(State::Hovered),
            'D' => Some(State::Disabled),
            _ => None,
        }
    }

    /// Parse a state name as written in the `state` editing key.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "all" => Some(State::All),
            "selected" => Some(State::Selected),
            "unselected" => Some(State::Unselected),
            "hover" | "hovered" => Some(State::Hovered),
            "disabled" => Some(State::Disabled),
            _ => None,
        }
    }

    /// Lowercase name of the state.
    pub fn as_str(self) -> &'static str {
        match self {
            State::All => "all",
            State::Selected => "selected",
            State::Unselected => "unselected",
            State::Hovered => "hovered",
            State::Disabled => "disabled",
        }
    }

    /// Whether this is one of the four concrete states.
    pub fn is_concrete(self) -> bool {
        self != State::All
    }

    /// Split a suffixed configuration key into its base name and state,
    /// e.g. `"fontSizeH"` into `("fontSize", Hovered)`.
    pub fn split_key(key: &str) -> Option<(&str, State)> {
        let last = key.chars().last()?;
        let state = State::from_suffix(last)?;
        let base = &key[..key.len() - last.len_utf8()];
        if base.is_empty() {
            return None;
        }
        Some((base, state))
    }

    /// Build the suffixed configuration key for a base name.
    pub fn key_for(self, base: &str) -> String {
        let mut key = String::with_capacity(base.len() + 1);
        key.push_str(base);
        key.push(self.suffix());
        key
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
