//! Tab data structure
//!
//! A tab shows:
//! - Display name (falls back to the file name)
//! - Filename as tooltip
//! - Close control

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::pane::{Cursor, EditorPane};
use crate::state::TabLifecycle;
use crate::Result;

pub const DEFAULT_TAB_NAME: &str = "untitled";

/// Identifier minted from the strip's creation counter. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u64);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct Tab {
    /// Unique identifier
    pub id: TabId,
    /// Name shown in the header, if one was given
    pub name: Option<String>,
    /// File backing the tab, if any
    pub filename: Option<String>,
    /// Current state in the lifecycle
    pub lifecycle: TabLifecycle,
    /// When the tab was created
    pub created_at: DateTime<Utc>,
    /// Last time the tab was activated
    pub last_accessed_at: DateTime<Utc>,
    pane: Box<dyn EditorPane>,
}

impl Tab {
    pub fn new(
        id: TabId,
        name: Option<String>,
        filename: Option<String>,
        pane: Box<dyn EditorPane>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            name,
            filename,
            lifecycle: TabLifecycle::Present,
            created_at: now,
            last_accessed_at: now,
            pane,
        }
    }

    /// Attempt to transition to a new state
    pub fn transition_to(&mut self, new_state: TabLifecycle) -> Result<()> {
        if !self.lifecycle.can_transition_to(new_state) {
            return Err(TabError::InvalidTransition {
                from: self.lifecycle.to_string(),
                to: new_state.to_string(),
            });
        }

        tracing::debug!(
            tab_id = %self.id,
            from = %self.lifecycle,
            to = %new_state,
            "Tab lifecycle transition"
        );

        self.lifecycle = new_state;
        Ok(())
    }

    pub fn set_theme(&mut self, theme: &str) {
        self.pane.set_theme(theme);
    }

    /// Seed the editor with initial text and cursor line
    pub fn seed(&mut self, text: &str, cursor: Cursor) {
        self.pane.set_value(text);
        self.pane.set_cursor(cursor);
    }

    pub fn touch(&mut self) {
        self.last_accessed_at = Utc::now();
    }

    /// Tear down the pane. Fails if the tab was already destroyed.
    pub fn destroy(&mut self) -> Result<()> {
        self.transition_to(TabLifecycle::Destroyed)?;
        self.pane.destroy();
        Ok(())
    }

    /// Get display name (with fallback to the file name, then "untitled")
    pub fn display_name(&self) -> &str {
        display_name(self.name.as_deref(), self.filename.as_deref())
    }
}

impl std::fmt::Debug for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("filename", &self.filename)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}

pub(crate) fn display_name<'a>(name: Option<&'a str>, filename: Option<&'a str>) -> &'a str {
    if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
        return name;
    }

    filename
        .and_then(|f| f.rsplit(['/', '\\']).next())
        .filter(|base| !base.is_empty())
        .unwrap_or(DEFAULT_TAB_NAME)
}
