//! Roving Focus Controller
//!
//! Keyboard traversal among tab buttons. Exactly one button is tabbable
//! (tabindex 0) at a time; arrow keys move it, skipping disabled buttons and
//! wrapping at both ends. Moving focus never changes the active tab.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Enter,
    Space,
    Other,
}

impl Key {
    /// Traversal direction for this key. Up/down only count in vertical layout.
    pub fn direction(self, vertical: bool) -> Option<Direction> {
        match self {
            Key::ArrowRight => Some(Direction::Next),
            Key::ArrowLeft => Some(Direction::Previous),
            Key::ArrowDown if vertical => Some(Direction::Next),
            Key::ArrowUp if vertical => Some(Direction::Previous),
            _ => None,
        }
    }

    pub fn is_activation(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

impl std::str::FromStr for Key {
    type Err = std::convert::Infallible;

    /// Parses DOM `KeyboardEvent.key` values, including legacy names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Home" => Key::Home,
            "End" => Key::End,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            _ => Key::Other,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// A settled focus move: `from` lost tabindex 0, `to` gained it and
/// should receive focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusMove {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RovingFocus {
    focused: usize,
    tabbable: Option<usize>,
}

impl RovingFocus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the last button keyboard traversal started from or landed on.
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Index of the single button with tabindex 0.
    pub fn tabbable(&self) -> Option<usize> {
        self.tabbable
    }

    pub fn reset_tabbable(&mut self, index: Option<usize>) {
        self.tabbable = index;
    }

    /// Keep indices inside a button list that may have shrunk.
    pub fn clamp(&mut self, button_count: usize) {
        if self.focused >= button_count {
            self.focused = 0;
        }
        if self.tabbable.is_some_and(|i| i >= button_count) {
            self.tabbable = None;
        }
    }

    /// Next enabled index from `origin`, wrapping around. Visits each
    /// button at most once; `None` when no other enabled button exists and
    /// the origin itself is disabled.
    pub fn find_enabled(disabled: &[bool], origin: usize, direction: Direction) -> Option<usize> {
        let count = disabled.len();
        if origin >= count {
            return None;
        }

        let mut candidate = origin;
        for _ in 0..count {
            candidate = match direction {
                Direction::Next if candidate + 1 >= count => 0,
                Direction::Next => candidate + 1,
                Direction::Previous if candidate == 0 => count - 1,
                Direction::Previous => candidate - 1,
            };

            if !disabled[candidate] {
                return Some(candidate);
            }
            if candidate == origin {
                break;
            }
        }

        None
    }

    /// Handle a directional key on the button at `origin`.
    pub fn step(
        &mut self,
        origin: usize,
        direction: Direction,
        disabled: &[bool],
    ) -> Option<FocusMove> {
        self.focused = origin;

        match Self::find_enabled(disabled, origin, direction) {
            Some(to) => Some(self.settle(origin, to)),
            None => {
                tracing::warn!(
                    origin,
                    button_count = disabled.len(),
                    "No enabled tab button to move focus to"
                );
                None
            }
        }
    }

    /// Move to the first (`Home`) or last (`End`) enabled button.
    pub fn jump(&mut self, origin: usize, to_end: bool, disabled: &[bool]) -> Option<FocusMove> {
        let mut enabled = disabled
            .iter()
            .enumerate()
            .filter(|(_, d)| !**d)
            .map(|(i, _)| i);
        let target = if to_end {
            enabled.next_back()
        } else {
            enabled.next()
        }?;

        self.focused = origin;
        Some(self.settle(origin, target))
    }

    fn settle(&mut self, from: usize, to: usize) -> FocusMove {
        self.focused = to;
        self.tabbable = Some(to);

        tracing::debug!(from, to, "Moved tab button focus");

        FocusMove { from, to }
    }
}
