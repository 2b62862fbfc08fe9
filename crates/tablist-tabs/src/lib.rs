//! Tablist Tabs
//!
//! State and interaction logic of an accessible tab widget:
//! - exactly one active panel, never a disabled one
//! - roving-tabindex keyboard traversal among tab buttons
//! - responsive vertical / icon-only layout from a measured width

mod button;
mod config;
mod error;
mod event;
mod focus;
mod layout;
mod panel;
mod registry;
mod selection;
mod state;
mod widget;

pub use button::{PresentationAttributes, TabButton};
pub use config::TabsConfig;
pub use error::TabsError;
pub use event::{EventBus, SubscriptionId, TabsEvent, WidgetSnapshot, ACTIVE_TAB_CHANGED};
pub use focus::{Direction, FocusMove, Key, RovingFocus};
pub use layout::{resolve as resolve_layout, Breakpoint, LayoutFlags};
pub use panel::{Panel, TabPanel};
pub use registry::{TabDescriptor, TabRegistry};
pub use selection::{SelectionChange, SelectionController};
pub use state::{Lifecycle, WidgetState};
pub use widget::{ContentGuard, KeyOutcome, TabsWidget};

pub type Result<T> = std::result::Result<T, TabsError>;
