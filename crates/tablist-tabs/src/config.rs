//! Per-widget configuration

use serde::{Deserialize, Serialize};

use crate::layout::Breakpoint;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Widths above this switch to vertical layout
    pub layout_breakpoint: Breakpoint,
    /// Widths below this hide labels when every tab has an icon
    pub icon_breakpoint: Breakpoint,
    /// Stretch tab buttons across the full width
    pub full_width: bool,
    /// Keep horizontal tabs pinned while content scrolls
    pub sticky: bool,
    /// Accessible name of the tab list
    pub aria_label: Option<String>,
    /// Tab to activate on the first scan
    pub active_tab: Option<String>,
}

impl TabsConfig {
    pub fn with_breakpoints(layout_breakpoint: Breakpoint, icon_breakpoint: Breakpoint) -> Self {
        Self {
            layout_breakpoint,
            icon_breakpoint,
            ..Self::default()
        }
    }
}
