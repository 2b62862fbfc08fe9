//! Tab panel contract
//!
//! A panel is one selectable section of content. The widget reads its
//! identity and flags, and writes only its `hidden` flag.

use serde::{Deserialize, Serialize};

/// Capabilities the widget needs from a tab panel.
pub trait TabPanel {
    fn id(&self) -> &str;

    fn label(&self) -> &str;

    fn icon(&self) -> Option<&str> {
        None
    }

    /// Short status text announced alongside the label (e.g. "new").
    fn flag(&self) -> Option<&str> {
        None
    }

    fn flag_icon(&self) -> Option<&str> {
        None
    }

    fn is_disabled(&self) -> bool;

    fn is_hidden(&self) -> bool;

    fn set_hidden(&mut self, hidden: bool);
}

/// Plain data panel used by hosts that don't bring their own panel type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub flag_icon: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub hidden: bool,
}

impl Panel {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            flag: None,
            flag_icon: None,
            disabled: false,
            hidden: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>, flag_icon: Option<String>) -> Self {
        self.flag = Some(flag.into());
        self.flag_icon = flag_icon;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl TabPanel for Panel {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    fn flag(&self) -> Option<&str> {
        self.flag.as_deref()
    }

    fn flag_icon(&self) -> Option<&str> {
        self.flag_icon.as_deref()
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}
