//! Tabs widget
//!
//! Ties the registry, selection, roving focus and layout resolver to one
//! set of panels. Hosts drive it through explicit notifications:
//! `attach`/`detach`, `content_changed` (or a `ContentGuard`),
//! `tab_changed`, `set_measured_width`, `select_tab` and `key_down`.

use chrono::Utc;
use uuid::Uuid;

use crate::button::{PresentationAttributes, TabButton};
use crate::config::TabsConfig;
use crate::error::TabsError;
use crate::event::{EventBus, TabsEvent, WidgetSnapshot};
use crate::focus::{FocusMove, Key, RovingFocus};
use crate::layout::{self, Breakpoint, LayoutFlags};
use crate::panel::TabPanel;
use crate::registry::{TabDescriptor, TabRegistry};
use crate::selection::{SelectionChange, SelectionController};
use crate::state::{Lifecycle, WidgetState};
use crate::Result;

/// What a key press on a tab button did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Focus moved between buttons; the active tab is unchanged
    FocusMoved(FocusMove),
    /// An activation key selected a tab
    Activated(Option<String>),
    Ignored,
}

pub struct TabsWidget<P: TabPanel> {
    id: String,
    config: TabsConfig,
    disabled: bool,
    hidden: bool,
    panels: Vec<P>,
    registry: TabRegistry,
    selection: SelectionController,
    focus: RovingFocus,
    measured_width: u32,
    layout: LayoutFlags,
    lifecycle: Lifecycle,
    /// Tab requested before the first scan
    pending: Option<String>,
    bus: EventBus,
    /// Queue events instead of emitting them
    defer_events: bool,
    queued: Vec<TabsEvent>,
}

impl<P: TabPanel> TabsWidget<P> {
    /// Create a detached widget. An empty `id` gets a generated one.
    pub fn new(id: impl Into<String>, config: TabsConfig, bus: EventBus) -> Self {
        let mut id = id.into();
        if id.is_empty() {
            id = format!("a11y-tabs-{}", Uuid::new_v4());
        }

        let pending = config.active_tab.clone();

        Self {
            id,
            config,
            disabled: false,
            hidden: false,
            panels: Vec::new(),
            registry: TabRegistry::new(),
            selection: SelectionController::new(),
            focus: RovingFocus::new(),
            measured_width: 0,
            layout: LayoutFlags::default(),
            lifecycle: Lifecycle::Created,
            pending,
            bus,
            defer_events: false,
            queued: Vec::new(),
        }
    }

    /// Seed content before the widget is attached.
    pub fn with_panels(mut self, panels: Vec<P>) -> Self {
        self.panels = panels;
        self
    }

    /// Queue activation events until `take_events` instead of emitting
    /// them on the bus. For owners that mutate the widget under a lock.
    pub fn with_deferred_events(mut self, defer: bool) -> Self {
        self.set_deferred_events(defer);
        self
    }

    /// Switching back to immediate mode emits anything still queued.
    pub fn set_deferred_events(&mut self, defer: bool) {
        self.defer_events = defer;
        if !defer {
            for event in std::mem::take(&mut self.queued) {
                self.bus.emit(&event);
            }
        }
    }

    /// Drain queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<TabsEvent> {
        std::mem::take(&mut self.queued)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &TabsConfig {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    // === Lifecycle ===

    /// Scan content and start reacting to structural changes.
    pub fn attach(&mut self) {
        if !self.transition(Lifecycle::Attached) {
            return;
        }
        tracing::info!(widget_id = %self.id, "Attached tabs widget");
        self.rebuild();
    }

    /// Stop reacting to structural changes.
    pub fn detach(&mut self) {
        if self.transition(Lifecycle::Detached) {
            tracing::info!(widget_id = %self.id, "Detached tabs widget");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.lifecycle.is_observing()
    }

    fn transition(&mut self, target: Lifecycle) -> bool {
        if !self.lifecycle.can_transition_to(target) {
            return false;
        }
        tracing::debug!(
            widget_id = %self.id,
            from = %self.lifecycle,
            to = %target,
            "Widget lifecycle transition"
        );
        self.lifecycle = target;
        true
    }

    // === Content ===

    pub fn panels(&self) -> &[P] {
        &self.panels
    }

    pub fn panel(&self, id: &str) -> Result<&P> {
        self.panels
            .iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| TabsError::PanelNotFound(id.to_string()))
    }

    /// Batch structural changes; one rebuild runs when the guard drops.
    pub fn content_mut(&mut self) -> ContentGuard<'_, P> {
        ContentGuard {
            widget: self,
            dirty: false,
        }
    }

    /// Structural change notification from the host. Ignored while the
    /// widget isn't attached.
    pub fn content_changed(&mut self) {
        if self.is_attached() {
            self.rebuild();
        } else {
            tracing::trace!(widget_id = %self.id, "Ignoring content change while not attached");
        }
    }

    /// A panel's own state (label, disabled, ...) changed.
    pub fn tab_changed(&mut self) {
        self.rebuild();
    }

    /// Mutate one panel and raise the tab-changed signal.
    pub fn update_panel<F>(&mut self, id: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut P),
    {
        let panel = self
            .panels
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| TabsError::PanelNotFound(id.to_string()))?;
        f(panel);
        self.tab_changed();
        Ok(())
    }

    /// Rebuild the registry and re-validate the active tab.
    pub fn rebuild(&mut self) {
        self.registry.rebuild(&self.panels);

        if let Some(duplicate) = self.registry.duplicate_id() {
            tracing::warn!(widget_id = %self.id, tab_id = %duplicate, "Duplicate tab id");
        }

        self.focus.clamp(self.registry.len());
        self.refresh_layout();

        let request = self
            .pending
            .take()
            .or_else(|| self.selection.active().map(str::to_string));
        self.apply_selection(request.as_deref());
        self.reset_tabbable();
    }

    /// Check the current tab set for ids that can't be told apart.
    pub fn validate(&self) -> Result<()> {
        match self.registry.duplicate_id() {
            Some(id) => Err(TabsError::DuplicateTabId(id.to_string())),
            None => Ok(()),
        }
    }

    // === Selection ===

    /// Select `id`, falling back to the first enabled tab. Returns the
    /// resulting active tab, which may differ from the request.
    ///
    /// Before the first `attach` the request is kept and applied by the
    /// initial scan; `None` is returned until then.
    pub fn select_tab(&mut self, id: &str) -> Option<&str> {
        if self.lifecycle == Lifecycle::Created {
            self.pending = Some(id.to_string());
            return None;
        }
        self.apply_selection(Some(id));
        self.active_tab()
    }

    /// Pointer activation of a tab. Disabled tabs (or a disabled widget)
    /// are ignored.
    pub fn click(&mut self, tab_id: &str) -> bool {
        let enabled = self.registry.get(tab_id).is_some_and(|tab| !tab.disabled);
        if self.disabled || !enabled {
            return false;
        }
        self.select_tab(tab_id);
        true
    }

    fn apply_selection(&mut self, requested: Option<&str>) {
        let change = self
            .selection
            .select(&mut self.registry, &mut self.panels, requested);

        if change.changed() {
            self.reset_tabbable();
            self.emit_change(change);
        }
    }

    fn reset_tabbable(&mut self) {
        let active = self
            .selection
            .active()
            .and_then(|id| self.registry.position(id));
        self.focus.reset_tabbable(active);
    }

    fn emit_change(&mut self, change: SelectionChange) {
        tracing::info!(
            widget_id = %self.id,
            from = ?change.previous,
            to = ?change.current,
            "Active tab changed"
        );

        let event = TabsEvent::ActiveTabChanged {
            previous: change.previous,
            widget: self.snapshot(),
            changed_at: Utc::now(),
        };

        if self.defer_events {
            self.queued.push(event);
        } else {
            self.bus.emit(&event);
        }
    }

    // === Keyboard ===

    /// Key press on the tab button at `index`.
    pub fn key_down(&mut self, index: usize, key: Key) -> KeyOutcome {
        if self.disabled || index >= self.registry.len() {
            return KeyOutcome::Ignored;
        }

        let disabled = self.button_disabled_flags();

        if let Some(direction) = key.direction(self.layout.vertical) {
            return match self.focus.step(index, direction, &disabled) {
                Some(moved) => KeyOutcome::FocusMoved(moved),
                None => KeyOutcome::Ignored,
            };
        }

        match key {
            Key::Home | Key::End => match self.focus.jump(index, key == Key::End, &disabled) {
                Some(moved) => KeyOutcome::FocusMoved(moved),
                None => KeyOutcome::Ignored,
            },
            k if k.is_activation() => {
                if disabled[index] {
                    return KeyOutcome::Ignored;
                }
                let tab_id = self.registry.tabs()[index].id.clone();
                let active = self.select_tab(&tab_id).map(str::to_string);
                KeyOutcome::Activated(active)
            }
            _ => KeyOutcome::Ignored,
        }
    }

    fn button_disabled_flags(&self) -> Vec<bool> {
        self.registry
            .tabs()
            .iter()
            .map(|t| t.disabled || self.disabled)
            .collect()
    }

    pub fn focused_button_index(&self) -> usize {
        self.focus.focused()
    }

    // === Layout ===

    /// Responsive-width notification.
    pub fn set_measured_width(&mut self, width: u32) {
        self.measured_width = width;
        self.refresh_layout();
    }

    pub fn measured_width(&self) -> u32 {
        self.measured_width
    }

    pub fn set_breakpoints(&mut self, layout_breakpoint: Breakpoint, icon_breakpoint: Breakpoint) {
        self.config.layout_breakpoint = layout_breakpoint;
        self.config.icon_breakpoint = icon_breakpoint;
        self.refresh_layout();
    }

    pub fn set_config(&mut self, config: TabsConfig) {
        self.config = config;
        self.refresh_layout();
    }

    fn refresh_layout(&mut self) {
        let flags = layout::resolve(
            self.measured_width,
            self.config.layout_breakpoint,
            self.config.icon_breakpoint,
            &self.registry,
        );

        if flags != self.layout {
            tracing::debug!(
                widget_id = %self.id,
                width = self.measured_width,
                vertical = flags.vertical,
                icons_only = flags.icons_only,
                "Layout flags changed"
            );
            self.layout = flags;
        }
    }

    pub fn vertical(&self) -> bool {
        self.layout.vertical
    }

    pub fn icons_only(&self) -> bool {
        self.layout.icons_only
    }

    // === Widget flags ===

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    // === Derived views ===

    pub fn tabs(&self) -> &[TabDescriptor] {
        self.registry.tabs()
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.selection.active()
    }

    pub fn active_descriptor(&self) -> Option<&TabDescriptor> {
        self.active_tab().and_then(|id| self.registry.get(id))
    }

    pub fn buttons(&self) -> Vec<TabButton> {
        let tabbable = self.focus.tabbable();
        self.registry
            .tabs()
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                TabButton::from_descriptor(
                    tab,
                    self.active_tab(),
                    tabbable == Some(i),
                    self.disabled,
                    self.layout.icons_only,
                )
            })
            .collect()
    }

    pub fn attributes(&self) -> PresentationAttributes {
        PresentationAttributes {
            vertical: self.layout.vertical,
            icons_only: self.layout.icons_only,
            active_tab: self.active_tab().map(str::to_string),
            disabled: self.disabled,
            hidden: self.hidden,
            sticky: self.config.sticky,
            full_width: self.config.full_width,
            aria_label: self.config.aria_label.clone(),
        }
    }

    pub fn state(&self) -> WidgetState {
        WidgetState {
            active_tab_id: self.active_tab().map(str::to_string),
            focused_button_index: self.focus.focused(),
            vertical: self.layout.vertical,
            icons_only: self.layout.icons_only,
            disabled: self.disabled,
            hidden: self.hidden,
        }
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            widget_id: self.id.clone(),
            active_tab: self.active_tab().map(str::to_string),
            tabs: self.registry.tabs().to_vec(),
            vertical: self.layout.vertical,
            icons_only: self.layout.icons_only,
            disabled: self.disabled,
        }
    }
}

impl<P: TabPanel + std::fmt::Debug> std::fmt::Debug for TabsWidget<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabsWidget")
            .field("id", &self.id)
            .field("lifecycle", &self.lifecycle)
            .field("active_tab", &self.active_tab())
            .field("panels", &self.panels)
            .field("layout", &self.layout)
            .finish()
    }
}

/// Structural edits to a widget's content. Dropping the guard after any
/// edit sends one content-changed notification.
pub struct ContentGuard<'a, P: TabPanel> {
    widget: &'a mut TabsWidget<P>,
    dirty: bool,
}

impl<P: TabPanel> ContentGuard<'_, P> {
    pub fn panels(&self) -> &[P] {
        &self.widget.panels
    }

    pub fn push(&mut self, panel: P) {
        self.widget.panels.push(panel);
        self.dirty = true;
    }

    /// Insert at `index`, clamped to the end of the content.
    pub fn insert(&mut self, index: usize, panel: P) {
        let index = index.min(self.widget.panels.len());
        self.widget.panels.insert(index, panel);
        self.dirty = true;
    }

    pub fn remove(&mut self, id: &str) -> Option<P> {
        let position = self.widget.panels.iter().position(|p| p.id() == id)?;
        self.dirty = true;
        Some(self.widget.panels.remove(position))
    }

    pub fn clear(&mut self) {
        if !self.widget.panels.is_empty() {
            self.widget.panels.clear();
            self.dirty = true;
        }
    }
}

impl<P: TabPanel> Drop for ContentGuard<'_, P> {
    fn drop(&mut self) {
        if self.dirty {
            self.widget.content_changed();
        }
    }
}
