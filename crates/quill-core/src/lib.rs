//! Quill Core
//!
//! Coordination layer for the editor: configuration, keyboard commands and
//! the workspace that owns the tab strip.

mod config;
mod error;
mod keymap;
mod workspace;

pub use config::Config;
pub use error::CoreError;
pub use keymap::TabCommand;
pub use workspace::{TabInfo, Workspace};

// Re-export tab components
pub use quill_tabs::{
    Cursor, Direction, EditorPane, PaneFactory, Removal, Tab, TabError, TabEvent, TabHost, TabId,
    TabOptions, TabStrip,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` wins over the configured filter.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
