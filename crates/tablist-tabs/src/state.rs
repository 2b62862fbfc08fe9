//! Widget state
//!
//! ```text
//! Created
//!   ↓ attach
//! Attached ⇄ Detached
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    /// Constructed, content not scanned yet
    Created,
    /// Observing content; structural changes rebuild the registry
    Attached,
    /// Removed from its host; content changes are ignored
    Detached,
}

impl Lifecycle {
    pub fn can_transition_to(&self, target: Lifecycle) -> bool {
        match (self, target) {
            (Lifecycle::Created, Lifecycle::Attached) => true,
            (Lifecycle::Attached, Lifecycle::Detached) => true,
            (Lifecycle::Detached, Lifecycle::Attached) => true,
            _ => false,
        }
    }

    pub fn is_observing(&self) -> bool {
        matches!(self, Lifecycle::Attached)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Created => "created",
            Lifecycle::Attached => "attached",
            Lifecycle::Detached => "detached",
        }
    }
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Persistent per-widget state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetState {
    pub active_tab_id: Option<String>,
    pub focused_button_index: usize,
    pub vertical: bool,
    pub icons_only: bool,
    pub disabled: bool,
    pub hidden: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(Lifecycle::Created.can_transition_to(Lifecycle::Attached));
        assert!(Lifecycle::Attached.can_transition_to(Lifecycle::Detached));
        assert!(Lifecycle::Detached.can_transition_to(Lifecycle::Attached));
    }

    #[test]
    fn test_repeated_transitions_are_rejected() {
        assert!(!Lifecycle::Attached.can_transition_to(Lifecycle::Attached));
        assert!(!Lifecycle::Detached.can_transition_to(Lifecycle::Detached));
        assert!(!Lifecycle::Created.can_transition_to(Lifecycle::Detached));
    }

    #[test]
    fn test_only_attached_observes() {
        assert!(Lifecycle::Attached.is_observing());
        assert!(!Lifecycle::Created.is_observing());
        assert!(!Lifecycle::Detached.is_observing());
    }
}
