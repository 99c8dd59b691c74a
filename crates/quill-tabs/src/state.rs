//! Tab lifecycle and tab bar presentation states
//!
//! ```text
//! Present
//!   ↓ remove
//! Destroyed
//! ```
//!
//! The bar is `Hidden` while the strip holds at most one tab and `Shown`
//! otherwise.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabLifecycle {
    /// Tab is mounted in the strip (active or not)
    Present,
    /// Tab was removed and its pane cleaned up
    Destroyed,
}

impl TabLifecycle {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: TabLifecycle) -> bool {
        match (self, target) {
            (TabLifecycle::Present, TabLifecycle::Present) => true,
            (TabLifecycle::Present, TabLifecycle::Destroyed) => true,
            // Destroyed is terminal, cleanup must not run twice
            (TabLifecycle::Destroyed, _) => false,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self, TabLifecycle::Destroyed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabLifecycle::Present => "present",
            TabLifecycle::Destroyed => "destroyed",
        }
    }
}

impl std::fmt::Display for TabLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarVisibility {
    Hidden,
    Shown,
}

impl BarVisibility {
    /// Visibility the bar should have for a strip holding `count` tabs
    pub fn for_count(count: usize) -> Self {
        if count > 1 {
            BarVisibility::Shown
        } else {
            BarVisibility::Hidden
        }
    }
}
