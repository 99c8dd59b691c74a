//! Tab error types

use thiserror::Error;

use crate::tab::TabId;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(TabId),

    #[error("No active tab")]
    NoActiveTab,

    #[error("Invalid cursor position: {0}")]
    InvalidCursor(i64),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
