//! Tab host seam
//!
//! The host is the tab-bar widget: it renders headers and content regions,
//! owns the active index and forwards user interaction as [`TabEvent`]s.

use serde::{Deserialize, Serialize};

use crate::tab::TabId;

pub const TAB_BAR_HIDDEN_CLASS: &str = "tab-bar-hidden";

pub trait TabHost: Send + Sync {
    /// Insert the header before the "new tab" button and append the content region
    fn mount(&mut self, id: TabId, header: &str, content: &str);

    /// Remove the header and content region of a tab
    fn unmount(&mut self, id: TabId);

    /// Re-sync widget state after DOM mutation
    fn refresh(&mut self);

    /// Index of the active header, if any
    fn active_index(&self) -> Option<usize>;

    fn set_active_index(&mut self, index: usize);

    /// Toggle the `tab-bar-hidden` class on the container
    fn set_bar_hidden(&mut self, hidden: bool);

    fn is_bar_hidden(&self) -> bool;
}

/// Interaction forwarded from the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "tab_id", rename_all = "snake_case")]
pub enum TabEvent {
    /// The "new tab" button was clicked
    NewTabRequested,
    /// A header's close control was clicked
    CloseRequested(TabId),
    /// The widget switched its active header
    Activated(TabId),
}
