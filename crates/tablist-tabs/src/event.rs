//! Widget notifications
//!
//! Activation changes are published on an `EventBus` shared by every widget
//! of an application. Listeners receive a snapshot of the widget rather
//! than the widget itself.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::registry::TabDescriptor;

pub const ACTIVE_TAB_CHANGED: &str = "active-tab-changed";

/// Read-only view of a widget at the time an event was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSnapshot {
    pub widget_id: String,
    pub active_tab: Option<String>,
    pub tabs: Vec<TabDescriptor>,
    pub vertical: bool,
    pub icons_only: bool,
    pub disabled: bool,
}

impl WidgetSnapshot {
    pub fn active_descriptor(&self) -> Option<&TabDescriptor> {
        let active = self.active_tab.as_deref()?;
        self.tabs.iter().find(|t| t.id == active)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TabsEvent {
    ActiveTabChanged {
        previous: Option<String>,
        widget: WidgetSnapshot,
        changed_at: DateTime<Utc>,
    },
}

impl TabsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TabsEvent::ActiveTabChanged { .. } => ACTIVE_TAB_CHANGED,
        }
    }

    pub fn widget(&self) -> &WidgetSnapshot {
        match self {
            TabsEvent::ActiveTabChanged { widget, .. } => widget,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&TabsEvent) + Send + Sync>;

/// Subscriber list shared by clones.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Arc<RwLock<Vec<(SubscriptionId, Listener)>>>,
    next_id: Arc<AtomicU64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&TabsEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Deliver `event` to every listener in subscription order.
    pub fn emit(&self, event: &TabsEvent) {
        // Listeners may subscribe or unsubscribe while being notified.
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        tracing::trace!(event = event.name(), listeners = listeners.len(), "Emitting tab event");

        for listener in listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
