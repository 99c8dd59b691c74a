//! Keyboard chords for tab commands
//!
//! - `ctrl+t` opens a tab
//! - `ctrl+w` closes the active tab
//! - `ctrl+tab` / `ctrl+pagedown` moves right
//! - `ctrl+shift+tab` / `ctrl+pageup` moves left

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabCommand {
    NewTab,
    CloseTab,
    NextTab,
    PreviousTab,
}

impl TabCommand {
    /// Parse a chord such as `Ctrl+Shift+Tab`. Modifier order and case do
    /// not matter; `cmd` is treated as `ctrl`.
    pub fn parse_chord(input: &str) -> Option<Self> {
        let mut ctrl = false;
        let mut shift = false;
        let mut key = None;

        for part in input.split('+').map(|p| p.trim().to_lowercase()) {
            match part.as_str() {
                "ctrl" | "control" | "cmd" | "meta" => ctrl = true,
                "shift" => shift = true,
                "" => return None,
                _ => {
                    if key.replace(part).is_some() {
                        return None;
                    }
                }
            }
        }

        if !ctrl {
            return None;
        }

        match (key?.as_str(), shift) {
            ("t", false) => Some(TabCommand::NewTab),
            ("w", false) => Some(TabCommand::CloseTab),
            ("tab", false) | ("pagedown", false) => Some(TabCommand::NextTab),
            ("tab", true) | ("pageup", false) => Some(TabCommand::PreviousTab),
            _ => None,
        }
    }

    /// Get the canonical chord for display
    pub fn chord(&self) -> &'static str {
        match self {
            TabCommand::NewTab => "Ctrl+T",
            TabCommand::CloseTab => "Ctrl+W",
            TabCommand::NextTab => "Ctrl+Tab",
            TabCommand::PreviousTab => "Ctrl+Shift+Tab",
        }
    }
}
