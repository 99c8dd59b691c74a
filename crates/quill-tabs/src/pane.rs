//! Editor pane seam
//!
//! Each tab owns one pane. The strip drives its lifecycle and theme but
//! never looks inside it.

use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::Result;

/// Zero-based line the editor cursor starts on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor(pub u32);

impl Cursor {
    /// Validate a requested cursor line coming from outside the strip
    pub fn from_requested(line: i64) -> Result<Self> {
        u32::try_from(line)
            .map(Cursor)
            .map_err(|_| TabError::InvalidCursor(line))
    }

    pub fn line(&self) -> u32 {
        self.0
    }
}

pub trait EditorPane: Send + Sync {
    fn set_theme(&mut self, theme: &str);

    /// Replace the editor contents
    fn set_value(&mut self, text: &str);

    fn set_cursor(&mut self, cursor: Cursor);

    /// Release everything the pane holds. Called once, on removal.
    fn destroy(&mut self);
}

/// Builds the pane that lives in a freshly mounted content region.
pub trait PaneFactory: Send + Sync {
    fn create(
        &mut self,
        region_id: &str,
        name: Option<&str>,
        filename: Option<&str>,
    ) -> Box<dyn EditorPane>;
}
