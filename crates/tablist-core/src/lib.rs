//! Tablist Core
//!
//! Page-level coordination for tab widgets: configuration, a shared event
//! bus, responsive width propagation and anchor linking.

mod anchor;
mod config;
mod error;
mod page;

pub use anchor::AnchorLinker;
pub use config::Config;
pub use error::CoreError;
pub use page::Page;

// Re-export widget types
pub use tablist_tabs::{
    Breakpoint, EventBus, FocusMove, Key, KeyOutcome, Panel, PresentationAttributes,
    SubscriptionId, TabButton, TabDescriptor, TabPanel, TabsConfig, TabsError, TabsEvent,
    TabsWidget, WidgetSnapshot, WidgetState,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging with an `info` fallback filter
pub fn init_logging() {
    init_logging_with("info");
}

/// Initialize logging; `RUST_LOG` takes precedence over `default_filter`
pub fn init_logging_with(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt().with_env_filter(filter).with_target(true).init();
}
