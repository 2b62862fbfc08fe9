//! Tab widget error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabsError {
    #[error("Tab panel not found: {0}")]
    PanelNotFound(String),

    #[error("Duplicate tab id: {0}")]
    DuplicateTabId(String),

    #[error("Invalid breakpoint: {0}")]
    InvalidBreakpoint(String),
}
