//! Editor workspace
//!
//! Owns the configuration and the tab strip. Hosts forward UI events and
//! keyboard commands here.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use quill_tabs::{
    Direction, PaneFactory, Removal, TabEvent, TabHost, TabId, TabOptions, TabStrip,
};

use crate::config::Config;
use crate::keymap::TabCommand;
use crate::Result;

/// Serializable view of one tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    pub name: String,
    pub filename: Option<String>,
    pub is_active: bool,
    pub opened_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
}

pub struct Workspace {
    config: Arc<RwLock<Config>>,
    strip: Arc<RwLock<TabStrip>>,
}

impl Workspace {
    pub fn new(
        config: Config,
        host: Box<dyn TabHost>,
        panes: Box<dyn PaneFactory>,
    ) -> Result<Self> {
        config.validate()?;
        let strip = TabStrip::new(host, panes, config.theme.clone());

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            strip: Arc::new(RwLock::new(strip)),
        })
    }

    /// Open the first tab if configured and the strip is still empty
    pub fn initialize(&self) -> Result<()> {
        let open_initial = self.config.read().open_initial_tab;
        if open_initial && self.strip.read().is_empty() {
            self.open_tab(TabOptions::default())?;
        }

        tracing::info!(tab_count = self.strip.read().len(), "Workspace initialized");

        Ok(())
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    pub fn open_tab(&self, mut options: TabOptions) -> Result<TabId> {
        if options.name.is_none() && options.filename.is_none() {
            options.name = Some(self.config.read().default_tab_name.clone());
        }

        Ok(self.strip.write().new_tab(options)?)
    }

    /// Close a tab, or the active one when `tab_id` is `None`
    pub fn close_tab(&self, tab_id: Option<TabId>) -> Result<Removal> {
        Ok(self.strip.write().remove_tab(tab_id)?)
    }

    pub fn next_tab(&self) {
        self.strip.write().change_tab(Direction::Next);
    }

    pub fn previous_tab(&self) {
        self.strip.write().change_tab(Direction::Previous);
    }

    pub fn set_theme(&self, theme: String) -> Result<()> {
        {
            let mut config = self.config.write();
            let previous = std::mem::replace(&mut config.theme, theme.clone());
            if let Err(e) = config.validate() {
                config.theme = previous;
                return Err(e);
            }
        }

        self.strip.write().set_theme(theme);
        Ok(())
    }

    pub fn theme(&self) -> String {
        self.strip.read().theme().to_string()
    }

    pub fn execute(&self, command: TabCommand) -> Result<()> {
        tracing::debug!(command = ?command, "Executing tab command");

        match command {
            TabCommand::NewTab => {
                self.open_tab(TabOptions::default())?;
            }
            TabCommand::CloseTab => {
                self.close_tab(None)?;
            }
            TabCommand::NextTab => self.next_tab(),
            TabCommand::PreviousTab => self.previous_tab(),
        }

        Ok(())
    }

    /// Run the command bound to a keyboard chord. Returns false for
    /// unbound chords.
    pub fn handle_chord(&self, chord: &str) -> Result<bool> {
        match TabCommand::parse_chord(chord) {
            Some(command) => {
                self.execute(command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn handle_event(&self, event: TabEvent) -> Result<()> {
        match event {
            // Route through open_tab so the default name applies
            TabEvent::NewTabRequested => {
                self.open_tab(TabOptions::default())?;
                Ok(())
            }
            other => Ok(self.strip.write().handle(other)?),
        }
    }

    /// Tabs in display order
    pub fn tabs(&self) -> Vec<TabInfo> {
        let strip = self.strip.read();
        let active = strip.active_tab_id();

        strip
            .tabs()
            .iter()
            .map(|tab| TabInfo {
                id: tab.id,
                name: tab.display_name().to_string(),
                filename: tab.filename.clone(),
                is_active: Some(tab.id) == active,
                opened_at: tab.created_at,
                last_accessed_at: tab.last_accessed_at,
            })
            .collect()
    }

    pub fn active_tab(&self) -> Option<TabInfo> {
        self.tabs().into_iter().find(|tab| tab.is_active)
    }

    /// Tabs ordered by most recent activation first
    pub fn recent_tabs(&self) -> Vec<TabInfo> {
        let mut tabs = self.tabs();
        tabs.sort_by(|a, b| {
            b.last_accessed_at
                .cmp(&a.last_accessed_at)
                .then_with(|| b.is_active.cmp(&a.is_active))
        });
        tabs
    }

    /// Run a closure against the strip under a read lock
    pub fn with_strip<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&TabStrip) -> T,
    {
        f(&self.strip.read())
    }
}

impl Clone for Workspace {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            strip: Arc::clone(&self.strip),
        }
    }
}
