//! Tab Registry
//!
//! Scans the widget's panels in document order and derives one descriptor
//! per panel. Descriptors are rebuilt wholesale on every structural change.

use serde::{Deserialize, Serialize};

use crate::panel::TabPanel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDescriptor {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub flag: Option<String>,
    pub flag_icon: Option<String>,
    pub disabled: bool,
    pub hidden: bool,
    /// 1-based position in document order
    pub order: usize,
    /// Number of tabs in the registry
    pub total: usize,
}

impl TabDescriptor {
    fn from_panel<P: TabPanel>(panel: &P, order: usize, total: usize) -> Self {
        Self {
            id: panel.id().to_string(),
            label: panel.label().to_string(),
            icon: panel.icon().map(str::to_string),
            flag: panel.flag().map(str::to_string),
            flag_icon: panel.flag_icon().map(str::to_string),
            disabled: panel.is_disabled(),
            hidden: panel.is_hidden(),
            order,
            total,
        }
    }

    /// True when the tab carries a non-empty icon.
    pub fn has_icon(&self) -> bool {
        self.icon.as_deref().is_some_and(|icon| !icon.is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TabRegistry {
    tabs: Vec<TabDescriptor>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-scan panels and replace the stored descriptors.
    pub fn rebuild<P: TabPanel>(&mut self, panels: &[P]) {
        let total = panels.len();
        self.tabs = panels
            .iter()
            .enumerate()
            .map(|(i, panel)| TabDescriptor::from_panel(panel, i + 1, total))
            .collect();

        tracing::debug!(tab_count = total, "Rebuilt tab registry");
    }

    pub fn tabs(&self) -> &[TabDescriptor] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TabDescriptor> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    /// Ids of enabled tabs, in document order
    pub fn enabled_ids(&self) -> impl Iterator<Item = &str> {
        self.tabs
            .iter()
            .filter(|t| !t.disabled)
            .map(|t| t.id.as_str())
    }

    /// Every tab has a non-empty icon (vacuously true when empty)
    pub fn all_have_icons(&self) -> bool {
        self.tabs.iter().all(TabDescriptor::has_icon)
    }

    /// Mirror panel visibility after a selection pass.
    pub(crate) fn sync_hidden(&mut self, active: Option<&str>) {
        for tab in &mut self.tabs {
            tab.hidden = Some(tab.id.as_str()) != active;
        }
    }

    /// First id that occurs more than once, if any.
    pub fn duplicate_id(&self) -> Option<&str> {
        self.tabs.iter().enumerate().find_map(|(i, tab)| {
            self.tabs[..i]
                .iter()
                .any(|earlier| earlier.id == tab.id)
                .then_some(tab.id.as_str())
        })
    }
}
