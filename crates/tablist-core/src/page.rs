//! Page state container
//!
//! Owns every tab widget of one document, the event bus they publish on,
//! and the responsive width they share.
//!
//! Widgets queue their events; the page publishes them once its widget lock
//! is released, so listeners may query the page.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use tablist_tabs::{
    EventBus, Panel, SubscriptionId, TabRegistry, TabsConfig, TabsError, TabsEvent, TabsWidget,
};

use crate::anchor::AnchorLinker;
use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

pub struct Page {
    config: Config,
    /// Widgets by id
    widgets: Arc<RwLock<HashMap<String, TabsWidget<Panel>>>>,
    /// Widget ids in document order
    order: Arc<RwLock<Vec<String>>>,
    bus: EventBus,
    anchor: AnchorLinker,
    width: Arc<RwLock<u32>>,
}

impl Page {
    pub fn new(config: Config) -> Result<Self> {
        let bus = EventBus::new();
        let anchor = AnchorLinker::new(config.base_url()?);
        anchor.listen(&bus);

        let width = config.initial_width;

        Ok(Self {
            config,
            widgets: Arc::new(RwLock::new(HashMap::new())),
            order: Arc::new(RwLock::new(Vec::new())),
            bus,
            anchor,
            width: Arc::new(RwLock::new(width)),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&TabsEvent) + Send + Sync + 'static,
    {
        self.bus.subscribe(listener)
    }

    // === Widgets ===

    /// Add and attach a widget using the page's default tab configuration.
    pub fn add_widget(&self, id: &str, panels: Vec<Panel>) -> Result<String> {
        self.add_widget_with_config(id, self.config.tabs.clone(), panels)
    }

    /// Add and attach a widget. An empty `id` gets a generated one.
    pub fn add_widget_with_config(
        &self,
        id: &str,
        config: TabsConfig,
        panels: Vec<Panel>,
    ) -> Result<String> {
        let (id, events) = {
            let mut widgets = self.widgets.write();
            if !id.is_empty() && widgets.contains_key(id) {
                return Err(CoreError::DuplicateWidget(id.to_string()));
            }

            let mut registry = TabRegistry::new();
            registry.rebuild(&panels);
            if let Some(duplicate) = registry.duplicate_id() {
                return Err(TabsError::DuplicateTabId(duplicate.to_string()).into());
            }

            let mut widget = TabsWidget::new(id, config, self.bus.clone())
                .with_panels(panels)
                .with_deferred_events(true);
            widget.set_measured_width(*self.width.read());
            widget.attach();

            let id = widget.id().to_string();
            let events = widget.take_events();
            widgets.insert(id.clone(), widget);
            self.order.write().push(id.clone());
            (id, events)
        };

        tracing::info!(widget_id = %id, "Added tabs widget");
        self.publish(events);

        Ok(id)
    }

    /// Detach and remove a widget.
    pub fn remove_widget(&self, id: &str) -> Result<TabsWidget<Panel>> {
        let mut widget = self
            .widgets
            .write()
            .remove(id)
            .ok_or_else(|| CoreError::WidgetNotFound(id.to_string()))?;
        self.order.write().retain(|existing| existing != id);

        widget.detach();
        widget.set_deferred_events(false);
        tracing::info!(widget_id = %id, "Removed tabs widget");

        Ok(widget)
    }

    pub fn widget_ids(&self) -> Vec<String> {
        self.order.read().clone()
    }

    pub fn with_widget<F, T>(&self, id: &str, f: F) -> Result<T>
    where
        F: FnOnce(&TabsWidget<Panel>) -> T,
    {
        let widgets = self.widgets.read();
        widgets
            .get(id)
            .map(f)
            .ok_or_else(|| CoreError::WidgetNotFound(id.to_string()))
    }

    pub fn with_widget_mut<F, T>(&self, id: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut TabsWidget<Panel>) -> T,
    {
        let (result, events) = {
            let mut widgets = self.widgets.write();
            let widget = widgets
                .get_mut(id)
                .ok_or_else(|| CoreError::WidgetNotFound(id.to_string()))?;
            let result = f(&mut *widget);
            (result, widget.take_events())
        };

        self.publish(events);
        Ok(result)
    }

    /// Emit queued widget events. Must run without the widget lock held.
    fn publish(&self, events: Vec<TabsEvent>) {
        for event in &events {
            self.bus.emit(event);
        }
    }

    // === Operations ===

    /// Select a tab in one widget; returns the tab that ended up active.
    pub fn select_tab(&self, widget_id: &str, tab_id: &str) -> Result<Option<String>> {
        self.with_widget_mut(widget_id, |widget| {
            widget.select_tab(tab_id).map(str::to_string)
        })
    }

    /// Responsive-width notification for every widget on the page.
    pub fn set_width(&self, width: u32) {
        *self.width.write() = width;
        for widget in self.widgets.write().values_mut() {
            widget.set_measured_width(width);
        }
        tracing::debug!(width, "Applied responsive width");
    }

    pub fn width(&self) -> u32 {
        *self.width.read()
    }

    /// Follow a link. When its fragment names a tab, the first widget (in
    /// document order) containing that tab selects it. Returns the id of
    /// that widget.
    pub fn navigate(&self, input: &str) -> Result<Option<String>> {
        let url = self.anchor.resolve(input)?;
        self.anchor.set_current(url.clone());

        let Some(target) = AnchorLinker::fragment_target(&url) else {
            return Ok(None);
        };

        let order = self.order.read().clone();
        let owner = order.into_iter().find(|widget_id| {
            self.widgets
                .read()
                .get(widget_id)
                .is_some_and(|w| w.tabs().iter().any(|t| t.id == target))
        });

        let Some(widget_id) = owner else {
            tracing::debug!(fragment = %target, "No tab matches anchor");
            return Ok(None);
        };

        let active = self.with_widget_mut(&widget_id, |widget| {
            widget.select_tab(target).map(str::to_string)
        })?;
        tracing::info!(
            widget_id = %widget_id,
            requested = %target,
            active = ?active,
            "Navigated to tab anchor"
        );

        Ok(Some(widget_id))
    }

    pub fn current_url(&self) -> Url {
        self.anchor.current_url()
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        for widget in self.widgets.write().values_mut() {
            widget.detach();
        }
        self.anchor.stop(&self.bus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::mpsc;
    use std::time::Duration;
    use tablist_tabs::{Breakpoint, Key, KeyOutcome};

    fn page() -> Page {
        let config = Config {
            base_url: "https://shop.example.com/item/7".to_string(),
            initial_width: 800,
            ..Config::default()
        };
        Page::new(config).unwrap()
    }

    fn product_tabs() -> Vec<Panel> {
        vec![
            Panel::new("overview", "Overview").with_icon("info"),
            Panel::new("specs", "Specs").with_icon("list").with_disabled(true),
            Panel::new("reviews", "Reviews").with_icon("star"),
        ]
    }

    #[test]
    fn test_add_widget_attaches_and_selects() {
        let page = page();
        let id = page.add_widget("details", product_tabs()).unwrap();

        let active = page
            .with_widget(&id, |w| w.active_tab().map(str::to_string))
            .unwrap();
        assert_eq!(active.as_deref(), Some("overview"));
        assert_eq!(page.current_url().fragment(), Some("overview"));
    }

    #[test]
    fn test_duplicate_and_missing_widgets() {
        let page = page();
        page.add_widget("details", product_tabs()).unwrap();

        assert!(matches!(
            page.add_widget("details", Vec::new()),
            Err(CoreError::DuplicateWidget(_))
        ));
        assert!(matches!(
            page.select_tab("nope", "reviews"),
            Err(CoreError::WidgetNotFound(_))
        ));
        assert!(matches!(
            page.add_widget("twins", vec![Panel::new("a", "A"), Panel::new("a", "B")]),
            Err(CoreError::Tabs(_))
        ));
    }

    #[test]
    fn test_generated_widget_id() {
        let page = page();
        let id = page.add_widget("", product_tabs()).unwrap();
        assert!(id.starts_with("a11y-tabs-"));
        assert_eq!(page.widget_ids(), vec![id]);
    }

    #[test]
    fn test_select_tab_updates_anchor_and_notifies() {
        let page = page();
        page.add_widget("details", product_tabs()).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        page.subscribe(move |event| {
            sink.lock().push(event.widget().widget_id.clone());
        });

        assert_eq!(
            page.select_tab("details", "specs").unwrap().as_deref(),
            Some("overview")
        );
        assert!(seen.lock().is_empty());

        assert_eq!(
            page.select_tab("details", "reviews").unwrap().as_deref(),
            Some("reviews")
        );
        assert_eq!(*seen.lock(), vec!["details".to_string()]);
        assert_eq!(
            page.current_url().as_str(),
            "https://shop.example.com/item/7#reviews"
        );
    }

    #[test]
    fn test_widgets_coexist() {
        let page = page();
        page.add_widget("first", product_tabs()).unwrap();
        page.add_widget(
            "second",
            vec![Panel::new("faq", "FAQ"), Panel::new("contact", "Contact")],
        )
        .unwrap();

        page.select_tab("second", "contact").unwrap();

        let first = page
            .with_widget("first", |w| w.active_tab().map(str::to_string))
            .unwrap();
        assert_eq!(first.as_deref(), Some("overview"));
        assert_eq!(page.current_url().fragment(), Some("contact"));
    }

    #[test]
    fn test_navigate_to_anchor() {
        let page = page();
        page.add_widget("first", product_tabs()).unwrap();
        page.add_widget(
            "second",
            vec![Panel::new("faq", "FAQ"), Panel::new("contact", "Contact")],
        )
        .unwrap();

        assert_eq!(page.navigate("#contact").unwrap().as_deref(), Some("second"));
        let active = page
            .with_widget("second", |w| w.active_tab().map(str::to_string))
            .unwrap();
        assert_eq!(active.as_deref(), Some("contact"));

        // Disabled target keeps the current tab; the anchor keeps the request
        assert_eq!(page.navigate("#specs").unwrap().as_deref(), Some("first"));
        assert_eq!(page.current_url().fragment(), Some("specs"));
        page.select_tab("first", "reviews").unwrap();
        assert_eq!(page.current_url().fragment(), Some("reviews"));

        assert_eq!(page.navigate("#unknown").unwrap(), None);
        assert_eq!(page.navigate("/other").unwrap(), None);
        assert_eq!(page.current_url().path(), "/other");
    }

    #[test]
    fn test_width_reaches_every_widget() {
        let mut config = Config {
            initial_width: 500,
            ..Config::default()
        };
        config.tabs.layout_breakpoint = Breakpoint::Width(600);
        let page = Page::new(config).unwrap();
        page.add_widget("a", product_tabs()).unwrap();
        page.add_widget("b", product_tabs()).unwrap();

        assert!(!page.with_widget("a", |w| w.vertical()).unwrap());

        page.set_width(900);
        assert_eq!(page.width(), 900);
        assert!(page.with_widget("a", |w| w.vertical()).unwrap());
        assert!(page.with_widget("b", |w| w.vertical()).unwrap());
    }

    #[test]
    fn test_keyboard_through_page() {
        let page = page();
        page.add_widget("details", product_tabs()).unwrap();

        let outcome = page
            .with_widget_mut("details", |w| w.key_down(0, Key::ArrowRight))
            .unwrap();
        assert!(matches!(outcome, KeyOutcome::FocusMoved(m) if m.to == 2));

        let outcome = page
            .with_widget_mut("details", |w| w.key_down(2, Key::Enter))
            .unwrap();
        assert_eq!(outcome, KeyOutcome::Activated(Some("reviews".to_string())));
    }

    #[test]
    fn test_remove_widget_detaches() {
        let page = page();
        page.add_widget("details", product_tabs()).unwrap();

        let mut widget = page.remove_widget("details").unwrap();
        assert!(!widget.is_attached());
        assert!(page.widget_ids().is_empty());

        widget.content_mut().clear();
        assert_eq!(widget.tabs().len(), 3);
        assert!(matches!(
            page.remove_widget("details"),
            Err(CoreError::WidgetNotFound(_))
        ));
    }

    #[test]
    fn test_listeners_can_query_the_page() {
        let page = Arc::new(page());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let weak = Arc::downgrade(&page);
        let sink = Arc::clone(&seen);
        page.subscribe(move |event| {
            let Some(page) = weak.upgrade() else {
                return;
            };
            let widget_id = event.widget().widget_id.clone();
            let active = page
                .with_widget(&widget_id, |w| w.active_tab().map(str::to_string))
                .ok()
                .flatten();
            sink.lock().push(active);
        });

        let (done_tx, done_rx) = mpsc::channel();
        let worker = Arc::clone(&page);
        std::thread::spawn(move || {
            worker.add_widget("details", product_tabs()).unwrap();
            worker.select_tab("details", "reviews").unwrap();
            worker.navigate("#overview").unwrap();
            done_tx.send(()).unwrap();
        });

        assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
        assert_eq!(
            *seen.lock(),
            vec![
                Some("overview".to_string()),
                Some("reviews".to_string()),
                Some("overview".to_string()),
            ]
        );
    }

    #[test]
    fn test_removed_widget_emits_directly() {
        let page = page();
        page.add_widget("details", product_tabs()).unwrap();
        let mut widget = page.remove_widget("details").unwrap();

        let seen = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&seen);
        page.subscribe(move |_| *sink.lock() += 1);

        widget.select_tab("reviews");
        assert_eq!(*seen.lock(), 1);
    }
}
