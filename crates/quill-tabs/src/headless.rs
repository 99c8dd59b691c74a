//! In-memory host and panes
//!
//! Stand-ins for the tab-bar widget and the editor that keep everything
//! they are told in plain data structures. Clones share state, so a caller
//! can hand one copy to the strip and inspect the other.

use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::host::{TabHost, TAB_BAR_HIDDEN_CLASS};
use crate::markup::content_region_id;
use crate::pane::{Cursor, EditorPane, PaneFactory};
use crate::tab::TabId;

#[derive(Debug, Clone)]
pub struct MountedTab {
    pub id: TabId,
    pub header: String,
    pub content: String,
}

#[derive(Debug, Default)]
struct HostState {
    /// Headers in display order
    mounted: Vec<MountedTab>,
    active: Option<usize>,
    classes: BTreeSet<String>,
    refresh_count: usize,
}

#[derive(Debug, Default)]
pub struct HeadlessHost {
    state: Arc<RwLock<HostState>>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of mounted tabs in display order
    pub fn mounted_ids(&self) -> Vec<TabId> {
        self.state.read().mounted.iter().map(|m| m.id).collect()
    }

    pub fn mounted(&self, id: TabId) -> Option<MountedTab> {
        self.state
            .read()
            .mounted
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state.read().classes.contains(class)
    }

    pub fn refresh_count(&self) -> usize {
        self.state.read().refresh_count
    }
}

impl Clone for HeadlessHost {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl TabHost for HeadlessHost {
    fn mount(&mut self, id: TabId, header: &str, content: &str) {
        self.state.write().mounted.push(MountedTab {
            id,
            header: header.to_string(),
            content: content.to_string(),
        });
    }

    fn unmount(&mut self, id: TabId) {
        let mut state = self.state.write();
        let Some(index) = state.mounted.iter().position(|m| m.id == id) else {
            return;
        };
        state.mounted.remove(index);

        // Keep the same header selected when an earlier one disappears
        if let Some(active) = state.active {
            if index < active {
                state.active = Some(active - 1);
            }
        }
    }

    fn refresh(&mut self) {
        let mut state = self.state.write();
        state.refresh_count += 1;

        let len = state.mounted.len();
        state.active = match (len, state.active) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(active)) => Some(active.min(len - 1)),
        };
    }

    fn active_index(&self) -> Option<usize> {
        self.state.read().active
    }

    fn set_active_index(&mut self, index: usize) {
        let mut state = self.state.write();
        if index < state.mounted.len() {
            state.active = Some(index);
        }
    }

    fn set_bar_hidden(&mut self, hidden: bool) {
        let mut state = self.state.write();
        if hidden {
            state.classes.insert(TAB_BAR_HIDDEN_CLASS.to_string());
        } else {
            state.classes.remove(TAB_BAR_HIDDEN_CLASS);
        }
    }

    fn is_bar_hidden(&self) -> bool {
        self.has_class(TAB_BAR_HIDDEN_CLASS)
    }
}

/// Everything a memory pane has been told
#[derive(Debug, Clone, Default)]
pub struct PaneRecord {
    pub name: Option<String>,
    pub filename: Option<String>,
    pub theme: Option<String>,
    pub value: String,
    pub cursor: Option<Cursor>,
    pub destroy_calls: usize,
}

/// Shared log of pane activity, keyed by content region id
#[derive(Debug, Clone, Default)]
pub struct PaneJournal {
    records: Arc<RwLock<HashMap<String, PaneRecord>>>,
}

impl PaneJournal {
    pub fn record(&self, id: TabId) -> Option<PaneRecord> {
        self.records.read().get(&content_region_id(id)).cloned()
    }

    pub fn destroy_count(&self, id: TabId) -> usize {
        self.record(id).map(|r| r.destroy_calls).unwrap_or(0)
    }

    pub fn theme_of(&self, id: TabId) -> Option<String> {
        self.record(id).and_then(|r| r.theme)
    }

    fn update(&self, region_id: &str, f: impl FnOnce(&mut PaneRecord)) {
        let mut records = self.records.write();
        f(records.entry(region_id.to_string()).or_default());
    }
}

pub struct MemoryPane {
    region_id: String,
    journal: PaneJournal,
}

impl MemoryPane {
    pub fn new(region_id: impl Into<String>, journal: PaneJournal) -> Self {
        let region_id = region_id.into();
        journal.update(&region_id, |_| {});
        Self { region_id, journal }
    }
}

impl EditorPane for MemoryPane {
    fn set_theme(&mut self, theme: &str) {
        self.journal
            .update(&self.region_id, |r| r.theme = Some(theme.to_string()));
    }

    fn set_value(&mut self, text: &str) {
        self.journal
            .update(&self.region_id, |r| r.value = text.to_string());
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.journal
            .update(&self.region_id, |r| r.cursor = Some(cursor));
    }

    fn destroy(&mut self) {
        self.journal
            .update(&self.region_id, |r| r.destroy_calls += 1);
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPaneFactory {
    journal: PaneJournal,
}

impl MemoryPaneFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn journal(&self) -> PaneJournal {
        self.journal.clone()
    }
}

impl PaneFactory for MemoryPaneFactory {
    fn create(
        &mut self,
        region_id: &str,
        name: Option<&str>,
        filename: Option<&str>,
    ) -> Box<dyn EditorPane> {
        self.journal.update(region_id, |r| {
            r.name = name.map(str::to_string);
            r.filename = filename.map(str::to_string);
        });
        Box::new(MemoryPane::new(region_id, self.journal.clone()))
    }
}
