//! Quill Tab Strip
//!
//! Owns the ordered set of editor tabs shown in the tab bar.
//! Rendering is delegated to a [`TabHost`], editing to an [`EditorPane`];
//! the strip itself only mints ids, keeps order, tracks the active tab
//! and decides when the bar is visible.

mod error;
pub mod headless;
mod host;
mod manager;
pub mod markup;
mod pane;
mod state;
mod tab;

pub use error::TabError;
pub use host::{TabEvent, TabHost, TAB_BAR_HIDDEN_CLASS};
pub use manager::{cycle_index, Direction, Removal, TabOptions, TabStrip};
pub use pane::{Cursor, EditorPane, PaneFactory};
pub use state::{BarVisibility, TabLifecycle};
pub use tab::{Tab, TabId, DEFAULT_TAB_NAME};

pub type Result<T> = std::result::Result<T, TabError>;
