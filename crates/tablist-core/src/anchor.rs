//! Anchor linking
//!
//! Keeps the document URL fragment pointing at the most recently activated
//! tab, and maps an incoming fragment back to a tab id.

use parking_lot::RwLock;
use std::sync::Arc;
use url::Url;

use tablist_tabs::{EventBus, SubscriptionId, TabsEvent};

#[derive(Clone)]
pub struct AnchorLinker {
    current: Arc<RwLock<Url>>,
    subscription: Arc<RwLock<Option<SubscriptionId>>>,
}

impl AnchorLinker {
    pub fn new(base: Url) -> Self {
        Self {
            current: Arc::new(RwLock::new(base)),
            subscription: Arc::new(RwLock::new(None)),
        }
    }

    /// Start following activation changes on `bus`. Subsequent calls keep
    /// the first subscription.
    pub fn listen(&self, bus: &EventBus) -> SubscriptionId {
        let mut subscription = self.subscription.write();
        if let Some(id) = *subscription {
            return id;
        }

        let current = Arc::clone(&self.current);
        let id = bus.subscribe(move |event| {
            let TabsEvent::ActiveTabChanged { widget, .. } = event;
            if let Some(tab_id) = widget.active_tab.as_deref() {
                let mut url = current.write();
                url.set_fragment(Some(tab_id));
                tracing::debug!(url = %*url, widget_id = %widget.widget_id, "Updated tab anchor");
            }
        });

        *subscription = Some(id);
        id
    }

    pub fn stop(&self, bus: &EventBus) {
        if let Some(id) = self.subscription.write().take() {
            bus.unsubscribe(id);
        }
    }

    pub fn current_url(&self) -> Url {
        self.current.read().clone()
    }

    pub fn set_current(&self, url: Url) {
        *self.current.write() = url;
    }

    /// Resolve `input` (absolute, or relative such as `#reviews`) against
    /// the current URL.
    pub fn resolve(&self, input: &str) -> Result<Url, url::ParseError> {
        let base = self.current.read();
        Url::options().base_url(Some(&*base)).parse(input)
    }

    /// Tab id named by the URL fragment, if any.
    pub fn fragment_target(url: &Url) -> Option<&str> {
        url.fragment().filter(|f| !f.is_empty())
    }
}

impl std::fmt::Debug for AnchorLinker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnchorLinker")
            .field("current", &self.current.read().as_str())
            .field("listening", &self.subscription.read().is_some())
            .finish()
    }
}
