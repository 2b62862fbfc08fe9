//! Render model for the tab list
//!
//! What a presentation layer needs to draw each tab button and to style
//! the widget host. Nothing here is styled; it only mirrors state.

use serde::{Deserialize, Serialize};

use crate::registry::TabDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabButton {
    /// `<tab id>-button`
    pub button_id: String,
    /// Id of the panel this button controls (aria-controls)
    pub controls: String,
    pub label: String,
    pub icon: Option<String>,
    pub flag: Option<String>,
    pub flag_icon: Option<String>,
    /// aria-selected
    pub selected: bool,
    /// Selected and the widget is enabled
    pub active: bool,
    pub disabled: bool,
    pub tabindex: i8,
    pub show_label: bool,
    /// Tooltip text, only present in icon-only mode
    pub tooltip: Option<String>,
    pub order: usize,
    pub total: usize,
}

impl TabButton {
    pub fn button_id(tab_id: &str) -> String {
        format!("{}-button", tab_id)
    }

    pub(crate) fn from_descriptor(
        tab: &TabDescriptor,
        active_tab: Option<&str>,
        tabbable: bool,
        widget_disabled: bool,
        icons_only: bool,
    ) -> Self {
        let selected = active_tab == Some(tab.id.as_str());

        Self {
            button_id: Self::button_id(&tab.id),
            controls: tab.id.clone(),
            label: tab.label.clone(),
            icon: tab.icon.clone(),
            flag: tab.flag.clone(),
            flag_icon: tab.flag_icon.clone(),
            selected,
            active: selected && !widget_disabled,
            disabled: tab.disabled || widget_disabled,
            tabindex: if tabbable { 0 } else { -1 },
            show_label: !icons_only,
            tooltip: icons_only.then(|| tab.label.clone()),
            order: tab.order,
            total: tab.total,
        }
    }

    /// Accessible name, e.g. `"Reviews (new), tab 2 of 3"`.
    pub fn accessible_name(&self) -> String {
        match &self.flag {
            Some(flag) => format!("{} ({}), tab {} of {}", self.label, flag, self.order, self.total),
            None => format!("{}, tab {} of {}", self.label, self.order, self.total),
        }
    }
}

/// Attributes reflected on the widget host for the style layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationAttributes {
    pub vertical: bool,
    pub icons_only: bool,
    pub active_tab: Option<String>,
    pub disabled: bool,
    pub hidden: bool,
    pub sticky: bool,
    pub full_width: bool,
    pub aria_label: Option<String>,
}

impl PresentationAttributes {
    /// Present attributes as `(name, value)` pairs; boolean attributes
    /// carry an empty value and are omitted when false.
    pub fn to_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::new();

        let flags = [
            ("vertical", self.vertical),
            ("icons-only", self.icons_only),
            ("disabled", self.disabled),
            ("hidden", self.hidden),
            ("sticky", self.sticky),
            ("full-width", self.full_width),
        ];
        for (name, on) in flags {
            if on {
                attrs.push((name, String::new()));
            }
        }

        if let Some(active) = &self.active_tab {
            attrs.push(("active-tab", active.clone()));
        }
        if let Some(label) = &self.aria_label {
            attrs.push(("aria-label", label.clone()));
        }

        attrs
    }
}
