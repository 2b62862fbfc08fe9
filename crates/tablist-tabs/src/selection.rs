//! Selection Controller
//!
//! Owns the active tab id. Requests for disabled or unknown tabs fall back
//! to the first enabled tab; with no enabled tab nothing is selected.

use crate::panel::TabPanel;
use crate::registry::TabRegistry;

/// Outcome of a selection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Option<String>,
    pub current: Option<String>,
}

impl SelectionChange {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    active: Option<String>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Resolve a requested id against the enabled tabs.
    pub fn resolve(registry: &TabRegistry, requested: Option<&str>) -> Option<String> {
        let first = registry.enabled_ids().next();

        requested
            .and_then(|id| registry.enabled_ids().find(|enabled_id| *enabled_id == id))
            .or(first)
            .map(str::to_string)
    }

    /// Resolve `requested`, hide every other panel and store the result.
    pub fn select<P: TabPanel>(
        &mut self,
        registry: &mut TabRegistry,
        panels: &mut [P],
        requested: Option<&str>,
    ) -> SelectionChange {
        let resolved = Self::resolve(registry, requested);

        for panel in panels.iter_mut() {
            let hidden = Some(panel.id()) != resolved.as_deref();
            panel.set_hidden(hidden);
        }
        registry.sync_hidden(resolved.as_deref());

        let previous = std::mem::replace(&mut self.active, resolved.clone());

        if requested.is_some() && requested != resolved.as_deref() {
            tracing::debug!(
                requested = ?requested,
                resolved = ?resolved,
                "Tab request fell back to another tab"
            );
        }

        SelectionChange {
            previous,
            current: resolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::Panel;

    fn setup(panels: &[Panel]) -> TabRegistry {
        let mut registry = TabRegistry::new();
        registry.rebuild(panels);
        registry
    }

    fn abc() -> Vec<Panel> {
        vec![
            Panel::new("A", "A"),
            Panel::new("B", "B").with_disabled(true),
            Panel::new("C", "C"),
        ]
    }

    fn visible(panels: &[Panel]) -> Vec<&str> {
        panels
            .iter()
            .filter(|p| !p.hidden)
            .map(|p| p.id.as_str())
            .collect()
    }

    #[test]
    fn test_select_enabled_tab() {
        let mut panels = abc();
        let mut registry = setup(&panels);
        let mut selection = SelectionController::new();

        let change = selection.select(&mut registry, &mut panels, Some("C"));
        assert_eq!(change.current.as_deref(), Some("C"));
        assert!(change.changed());
        assert_eq!(visible(&panels), vec!["C"]);
        assert!(!registry.get("C").unwrap().hidden);
        assert!(registry.get("A").unwrap().hidden);
    }

    #[test]
    fn test_disabled_request_falls_back_to_first_enabled() {
        let mut panels = abc();
        let mut registry = setup(&panels);
        let mut selection = SelectionController::new();

        selection.select(&mut registry, &mut panels, Some("B"));
        assert_eq!(selection.active(), Some("A"));
        assert_eq!(visible(&panels), vec!["A"]);
    }

    #[test]
    fn test_unknown_and_missing_request() {
        let panels = abc();
        let registry = setup(&panels);

        assert_eq!(
            SelectionController::resolve(&registry, Some("nope")).as_deref(),
            Some("A")
        );
        assert_eq!(
            SelectionController::resolve(&registry, None).as_deref(),
            Some("A")
        );
    }

    #[test]
    fn test_all_disabled_selects_nothing() {
        let mut panels = vec![
            Panel::new("x", "X").with_disabled(true),
            Panel::new("y", "Y").with_disabled(true),
        ];
        let mut registry = setup(&panels);
        let mut selection = SelectionController::new();

        let change = selection.select(&mut registry, &mut panels, Some("x"));
        assert_eq!(change.current, None);
        assert!(visible(&panels).is_empty());
    }

    #[test]
    fn test_empty_registry_selects_nothing() {
        let mut panels: Vec<Panel> = Vec::new();
        let mut registry = setup(&panels);
        let mut selection = SelectionController::new();

        let change = selection.select(&mut registry, &mut panels, Some("A"));
        assert_eq!(change.current, None);
        assert!(!change.changed());
    }

    #[test]
    fn test_reselect_is_idempotent() {
        let mut panels = abc();
        let mut registry = setup(&panels);
        let mut selection = SelectionController::new();

        selection.select(&mut registry, &mut panels, Some("C"));
        let first = visible(&panels).iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let active = selection.active().map(str::to_string);
        let change = selection.select(&mut registry, &mut panels, active.as_deref());
        assert!(!change.changed());
        assert_eq!(visible(&panels), first);
    }
}
