use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::{Duration, Instant};

use serde::Deserialize;

/// The four physical buttons, by silkscreen label.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonLabel {
    #[serde(alias = "A")]
    A,
    #[serde(alias = "B")]
    B,
    #[serde(alias = "X")]
    X,
    #[serde(alias = "Y")]
    Y,
}

impl fmt::Display for ButtonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::A => "A",
            Self::B => "B",
            Self::X => "X",
            Self::Y => "Y",
        };
        f.write_str(s)
    }
}

/// What a button does when pressed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonAction {
    #[serde(alias = "toggle_pause", alias = "play-pause")]
    TogglePause,
    #[serde(alias = "prev")]
    Previous,
    Next,
    #[serde(alias = "show_address", alias = "address")]
    ShowAddress,
}

/// A press as delivered by the button adapter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ButtonPress {
    pub label: ButtonLabel,
    pub at: Instant,
}

/// The single table from physical button to action.
#[derive(Debug, Clone)]
pub struct ButtonMap {
    actions: BTreeMap<ButtonLabel, ButtonAction>,
}

impl ButtonMap {
    /// Overlay `overrides` on the default wiring; unmentioned buttons keep
    /// their default action.
    pub fn new(overrides: &BTreeMap<ButtonLabel, ButtonAction>) -> Self {
        let mut actions = Self::default().actions;
        actions.extend(overrides.iter().map(|(k, v)| (*k, *v)));
        Self { actions }
    }

    pub fn action(&self, label: ButtonLabel) -> Option<ButtonAction> {
        self.actions.get(&label).copied()
    }
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self {
            actions: BTreeMap::from([
                (ButtonLabel::A, ButtonAction::TogglePause),
                (ButtonLabel::B, ButtonAction::Previous),
                (ButtonLabel::X, ButtonAction::ShowAddress),
                (ButtonLabel::Y, ButtonAction::Next),
            ]),
        }
    }
}

/// Drops presses that follow an accepted press of the same button too closely.
#[derive(Debug)]
pub struct Debouncer {
    min_spacing: Duration,
    last: HashMap<ButtonLabel, Instant>,
}

impl Debouncer {
    pub fn new(min_spacing: Duration) -> Self {
        Self {
            min_spacing,
            last: HashMap::new(),
        }
    }

    pub fn accept(&mut self, press: &ButtonPress) -> bool {
        if let Some(prev) = self.last.get(&press.label) {
            if press.at.saturating_duration_since(*prev) < self.min_spacing {
                return false;
            }
        }
        self.last.insert(press.label, press.at);
        true
    }
}
