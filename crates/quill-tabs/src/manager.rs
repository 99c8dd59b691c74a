//! Tab Strip
//!
//! Keeps the ordered tab collection in step with the tab host.

use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::host::{TabEvent, TabHost};
use crate::markup;
use crate::pane::{Cursor, PaneFactory};
use crate::state::BarVisibility;
use crate::tab::{Tab, TabId};
use crate::Result;

/// Arguments for opening a tab
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabOptions {
    /// Text to start the editor with
    #[serde(default)]
    pub input: Option<String>,
    /// Line to start the cursor on, only used together with `input`
    #[serde(default)]
    pub cursor: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Outcome of a removal request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "tab_id", rename_all = "snake_case")]
pub enum Removal {
    Removed(TabId),
    /// The strip never drops its last tab
    RefusedLastTab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn offset(&self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
        }
    }
}

/// Step `current` one tab in `direction`, wrapping at both ends.
/// Returns `None` when there are no tabs.
pub fn cycle_index(current: usize, direction: Direction, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }

    let position = current as isize + direction.offset();
    if position >= count as isize {
        Some(0)
    } else if position < 0 {
        Some(count - 1)
    } else {
        Some(position as usize)
    }
}

pub struct TabStrip {
    /// Tabs in display order
    tabs: Vec<Tab>,
    active_tab_id: Option<TabId>,
    /// Counter for unique tab ids, only ever increases
    total_tabs_created: u64,
    theme: String,
    host: Box<dyn TabHost>,
    panes: Box<dyn PaneFactory>,
}

impl TabStrip {
    /// Bind to a tab host and store the initial theme. The strip starts
    /// empty with the bar hidden.
    pub fn new(
        host: Box<dyn TabHost>,
        panes: Box<dyn PaneFactory>,
        theme: impl Into<String>,
    ) -> Self {
        let mut strip = Self {
            tabs: Vec::new(),
            active_tab_id: None,
            total_tabs_created: 0,
            theme: theme.into(),
            host,
            panes,
        };
        strip.hide_tab_bar();
        strip
    }

    /// Dispatch an event forwarded by the host
    pub fn handle(&mut self, event: TabEvent) -> Result<()> {
        match event {
            TabEvent::NewTabRequested => {
                self.new_tab(TabOptions::default())?;
            }
            TabEvent::CloseRequested(id) => {
                self.remove_tab(Some(id))?;
            }
            TabEvent::Activated(id) => match self.position(id) {
                Some(index) => self.select(index),
                None => tracing::warn!(tab_id = %id, "Activation for unknown tab ignored"),
            },
        }
        Ok(())
    }

    /// Set theme for all tabs, including ones opened later
    pub fn set_theme(&mut self, theme: impl Into<String>) {
        self.theme = theme.into();
        for tab in &mut self.tabs {
            tab.set_theme(&self.theme);
        }

        tracing::debug!(theme = %self.theme, tab_count = self.tabs.len(), "Applied theme");
    }

    /// Open a new tab and make it active
    pub fn new_tab(&mut self, options: TabOptions) -> Result<TabId> {
        let cursor = options
            .cursor
            .map(Cursor::from_requested)
            .transpose()?
            .unwrap_or_default();

        let id = TabId(self.total_tabs_created);
        let name = options.name.as_deref();
        let filename = options.filename.as_deref();

        let header = markup::tab_header(id, name, filename);
        let content = markup::tab_content(id);
        self.host.mount(id, &header, &content);

        let pane = self
            .panes
            .create(&markup::content_region_id(id), name, filename);
        let mut tab = Tab::new(id, options.name.clone(), options.filename.clone(), pane);
        tab.set_theme(&self.theme);
        self.tabs.push(tab);

        self.host.refresh();
        self.select(self.tabs.len() - 1);

        if let Some(input) = options.input.as_deref().filter(|s| !s.is_empty()) {
            if let Some(tab) = self.tabs.last_mut() {
                tab.seed(input, cursor);
            }
        }

        self.total_tabs_created += 1;

        if self.tabs.len() > 1 && self.host.is_bar_hidden() {
            self.show_tab_bar();
        }

        tracing::info!(
            tab_id = %id,
            name = ?options.name,
            filename = ?options.filename,
            "Created new tab"
        );

        Ok(id)
    }

    /// Remove a tab, defaulting to the active one, and clean up its pane
    pub fn remove_tab(&mut self, id: Option<TabId>) -> Result<Removal> {
        if self.tabs.len() == 1 {
            tracing::debug!("Refused to remove the last tab");
            return Ok(Removal::RefusedLastTab);
        }

        let id = match id.or(self.active_tab_id) {
            Some(id) => id,
            None => return Err(TabError::NoActiveTab),
        };
        let index = self.position(id).ok_or(TabError::NotFound(id))?;

        self.host.unmount(id);
        let mut removed = self.tabs.remove(index);
        removed.destroy()?;

        self.host.refresh();
        self.sync_active();

        if self.tabs.len() == 1 {
            self.hide_tab_bar();
        }

        tracing::info!(tab_id = %id, remaining = self.tabs.len(), "Closed tab");

        Ok(Removal::Removed(id))
    }

    pub fn show_tab_bar(&mut self) {
        self.host.set_bar_hidden(false);
    }

    pub fn hide_tab_bar(&mut self) {
        self.host.set_bar_hidden(true);
    }

    /// Change active tab, wrapping around at either end
    pub fn change_tab(&mut self, direction: Direction) {
        let current = self.host.active_index().unwrap_or(0);
        if let Some(position) = cycle_index(current, direction, self.tabs.len()) {
            self.select(position);
        }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn get(&self, id: TabId) -> Result<&Tab> {
        self.tabs
            .iter()
            .find(|t| t.id == id)
            .ok_or(TabError::NotFound(id))
    }

    pub fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab_id
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.and_then(|id| self.get(id).ok())
    }

    /// Position of the active tab as reported by the host
    pub fn active_index(&self) -> Option<usize> {
        self.host.active_index()
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn total_tabs_created(&self) -> u64 {
        self.total_tabs_created
    }

    pub fn bar_visibility(&self) -> BarVisibility {
        if self.host.is_bar_hidden() {
            BarVisibility::Hidden
        } else {
            BarVisibility::Shown
        }
    }

    pub fn host(&self) -> &dyn TabHost {
        self.host.as_ref()
    }

    fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    fn select(&mut self, index: usize) {
        self.host.set_active_index(index);
        self.sync_active();
    }

    /// Mirror the host's active index into the active tab id
    fn sync_active(&mut self) {
        let id = self
            .host
            .active_index()
            .and_then(|index| self.tabs.get(index))
            .map(|tab| tab.id);

        if let Some(id) = id {
            self.record_activation(id);
        } else {
            self.active_tab_id = None;
        }
    }

    fn record_activation(&mut self, id: TabId) {
        let Some(tab) = self.tabs.iter_mut().find(|t| t.id == id) else {
            return;
        };

        tab.touch();
        if self.active_tab_id != Some(id) {
            tracing::debug!(tab_id = %id, "Activated tab");
        }
        self.active_tab_id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessHost, MemoryPaneFactory, PaneJournal};
    use rstest::rstest;

    fn strip() -> (TabStrip, HeadlessHost, PaneJournal) {
        let host = HeadlessHost::new();
        let factory = MemoryPaneFactory::new();
        let journal = factory.journal();
        let strip = TabStrip::new(Box::new(host.clone()), Box::new(factory), "default");
        (strip, host, journal)
    }

    fn strip_with(count: usize) -> (TabStrip, HeadlessHost, PaneJournal) {
        let (mut strip, host, journal) = strip();
        for _ in 0..count {
            strip.new_tab(TabOptions::default()).unwrap();
        }
        (strip, host, journal)
    }

    fn ids(strip: &TabStrip) -> Vec<TabId> {
        strip.tabs().iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_starts_empty_with_bar_hidden() {
        let (strip, host, _) = strip();
        assert!(strip.is_empty());
        assert!(host.is_bar_hidden());
        assert_eq!(strip.bar_visibility(), BarVisibility::Hidden);
        assert_eq!(strip.active_tab_id(), None);
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let (strip, host, _) = strip_with(4);
        let expected: Vec<TabId> = (0..4).map(TabId).collect();
        assert_eq!(ids(&strip), expected);
        assert_eq!(host.mounted_ids(), expected);
        assert_eq!(strip.total_tabs_created(), 4);
    }

    #[test]
    fn test_new_tab_becomes_active() {
        let (mut strip, host, _) = strip_with(2);
        let id = strip.new_tab(TabOptions::default()).unwrap();
        assert_eq!(host.active_index(), Some(2));
        assert_eq!(strip.active_tab_id(), Some(id));
        assert_eq!(strip.active_tab().map(|t| t.id), Some(id));
    }

    #[test]
    fn test_new_tab_seeds_input_and_cursor() {
        let (mut strip, _, journal) = strip();
        let id = strip
            .new_tab(TabOptions {
                input: Some("let x = 1;".to_string()),
                cursor: Some(5),
                name: Some("scratch".to_string()),
                filename: Some("/tmp/scratch.rs".to_string()),
            })
            .unwrap();

        let record = journal.record(id).unwrap();
        assert_eq!(record.value, "let x = 1;");
        assert_eq!(record.cursor, Some(Cursor(5)));
        assert_eq!(record.name.as_deref(), Some("scratch"));
        assert_eq!(record.filename.as_deref(), Some("/tmp/scratch.rs"));
    }

    #[test]
    fn test_new_tab_cursor_defaults_to_zero() {
        let (mut strip, _, journal) = strip();
        let id = strip
            .new_tab(TabOptions {
                input: Some("text".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(journal.record(id).unwrap().cursor, Some(Cursor(0)));
    }

    #[test]
    fn test_empty_input_is_not_seeded() {
        let (mut strip, _, journal) = strip();
        let id = strip
            .new_tab(TabOptions {
                input: Some(String::new()),
                cursor: Some(3),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(journal.record(id).unwrap().cursor, None);
    }

    #[test]
    fn test_negative_cursor_rejected_without_side_effects() {
        let (mut strip, host, _) = strip_with(1);
        let result = strip.new_tab(TabOptions {
            input: Some("text".to_string()),
            cursor: Some(-2),
            ..Default::default()
        });

        assert_eq!(result, Err(TabError::InvalidCursor(-2)));
        assert_eq!(strip.len(), 1);
        assert_eq!(strip.total_tabs_created(), 1);
        assert_eq!(host.mounted_ids(), vec![TabId(0)]);
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let (mut strip, _, _) = strip();
        for _ in 0..2 {
            strip
                .new_tab(TabOptions {
                    name: Some("same".to_string()),
                    filename: Some("same.txt".to_string()),
                    ..Default::default()
                })
                .unwrap();
        }
        assert_eq!(strip.len(), 2);
        assert!(strip.tabs().iter().all(|t| t.display_name() == "same"));
    }

    #[test]
    fn test_remove_destroys_pane_once() {
        let (mut strip, host, journal) = strip_with(3);

        let removal = strip.remove_tab(Some(TabId(1))).unwrap();
        assert_eq!(removal, Removal::Removed(TabId(1)));
        assert_eq!(ids(&strip), vec![TabId(0), TabId(2)]);
        assert_eq!(host.mounted_ids(), vec![TabId(0), TabId(2)]);
        assert_eq!(journal.destroy_count(TabId(1)), 1);
        assert_eq!(journal.destroy_count(TabId(0)), 0);
    }

    #[test]
    fn test_remove_last_tab_refused() {
        let (mut strip, host, journal) = strip_with(1);

        assert_eq!(strip.remove_tab(None).unwrap(), Removal::RefusedLastTab);
        assert_eq!(
            strip.remove_tab(Some(TabId(0))).unwrap(),
            Removal::RefusedLastTab
        );
        assert_eq!(ids(&strip), vec![TabId(0)]);
        assert_eq!(host.mounted_ids(), vec![TabId(0)]);
        assert_eq!(journal.destroy_count(TabId(0)), 0);
    }

    #[test]
    fn test_remove_unknown_tab() {
        let (mut strip, _, _) = strip_with(2);
        assert_eq!(
            strip.remove_tab(Some(TabId(9))),
            Err(TabError::NotFound(TabId(9)))
        );
        assert_eq!(strip.len(), 2);
    }

    #[test]
    fn test_remove_active_selects_neighbour() {
        let (mut strip, host, _) = strip_with(3);
        strip.change_tab(Direction::Next);
        assert_eq!(strip.active_tab_id(), Some(TabId(0)));

        strip.remove_tab(None).unwrap();
        assert_eq!(host.active_index(), Some(0));
        assert_eq!(strip.active_tab_id(), Some(TabId(1)));
    }

    #[test]
    fn test_remove_inactive_keeps_active() {
        let (mut strip, _, _) = strip_with(3);
        strip.remove_tab(Some(TabId(0))).unwrap();
        assert_eq!(strip.active_tab_id(), Some(TabId(2)));
        assert_eq!(strip.active_index(), Some(1));
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let (mut strip, _, _) = strip_with(2);
        strip.remove_tab(None).unwrap();
        let id = strip.new_tab(TabOptions::default()).unwrap();
        assert_eq!(id, TabId(2));
        assert_eq!(ids(&strip), vec![TabId(0), TabId(2)]);
    }

    #[test]
    fn test_bar_visibility_tracks_count() {
        let (mut strip, host, _) = strip();
        let check = |strip: &TabStrip| {
            assert_eq!(host.is_bar_hidden(), strip.len() <= 1);
            assert_eq!(strip.bar_visibility(), BarVisibility::for_count(strip.len()));
        };

        for _ in 0..3 {
            strip.new_tab(TabOptions::default()).unwrap();
            check(&strip);
        }
        for _ in 0..3 {
            strip.remove_tab(None).unwrap();
            check(&strip);
        }
    }

    #[test]
    fn test_open_then_close_scenario() {
        let (mut strip, host, _) = strip_with(1);
        assert!(host.is_bar_hidden());

        strip.new_tab(TabOptions::default()).unwrap();
        assert_eq!(strip.len(), 2);
        assert!(!host.is_bar_hidden());
        assert_eq!(host.active_index(), Some(1));

        assert_eq!(strip.remove_tab(None).unwrap(), Removal::Removed(TabId(1)));
        assert_eq!(strip.len(), 1);
        assert!(host.is_bar_hidden());
        assert_eq!(strip.active_tab_id(), Some(TabId(0)));
    }

    #[test]
    fn test_theme_reaches_existing_and_future_tabs() {
        let (mut strip, _, journal) = strip_with(2);
        assert_eq!(journal.theme_of(TabId(0)).as_deref(), Some("default"));

        strip.set_theme("dark");
        assert_eq!(strip.theme(), "dark");
        assert_eq!(journal.theme_of(TabId(0)).as_deref(), Some("dark"));
        assert_eq!(journal.theme_of(TabId(1)).as_deref(), Some("dark"));

        let id = strip.new_tab(TabOptions::default()).unwrap();
        assert_eq!(journal.theme_of(id).as_deref(), Some("dark"));
    }

    #[rstest]
    #[case(3, 2, Direction::Next, 0)]
    #[case(3, 0, Direction::Previous, 2)]
    #[case(3, 1, Direction::Next, 2)]
    #[case(3, 1, Direction::Previous, 0)]
    #[case(1, 0, Direction::Next, 0)]
    #[case(1, 0, Direction::Previous, 0)]
    fn test_cycle_index(
        #[case] count: usize,
        #[case] current: usize,
        #[case] direction: Direction,
        #[case] expected: usize,
    ) {
        assert_eq!(cycle_index(current, direction, count), Some(expected));
    }

    #[test]
    fn test_cycle_index_matches_modulo() {
        for count in 1..6usize {
            for current in 0..count {
                for direction in [Direction::Next, Direction::Previous] {
                    let expected = (current as isize + direction.offset())
                        .rem_euclid(count as isize) as usize;
                    assert_eq!(cycle_index(current, direction, count), Some(expected));
                }
            }
        }
    }

    #[test]
    fn test_change_tab_wraps() {
        let (mut strip, host, _) = strip_with(3);
        assert_eq!(host.active_index(), Some(2));

        strip.change_tab(Direction::Next);
        assert_eq!(host.active_index(), Some(0));
        assert_eq!(strip.active_tab_id(), Some(TabId(0)));

        strip.change_tab(Direction::Previous);
        assert_eq!(host.active_index(), Some(2));
        assert_eq!(strip.active_tab_id(), Some(TabId(2)));
    }

    #[test]
    fn test_change_tab_without_tabs_is_noop() {
        let (mut strip, host, _) = strip();
        strip.change_tab(Direction::Next);
        assert_eq!(host.active_index(), None);
        assert_eq!(strip.active_tab_id(), None);
        assert_eq!(cycle_index(0, Direction::Next, 0), None);
    }

    #[test]
    fn test_events_drive_the_strip() {
        let (mut strip, _, journal) = strip_with(1);

        strip.handle(TabEvent::NewTabRequested).unwrap();
        strip.handle(TabEvent::NewTabRequested).unwrap();
        assert_eq!(strip.len(), 3);

        strip.handle(TabEvent::Activated(TabId(0))).unwrap();
        assert_eq!(strip.active_tab_id(), Some(TabId(0)));

        strip.handle(TabEvent::CloseRequested(TabId(1))).unwrap();
        assert_eq!(ids(&strip), vec![TabId(0), TabId(2)]);
        assert_eq!(journal.destroy_count(TabId(1)), 1);
    }

    #[test]
    fn test_activation_moves_host_selection() {
        let (mut strip, host, _) = strip_with(3);

        strip.handle(TabEvent::Activated(TabId(0))).unwrap();
        assert_eq!(host.active_index(), Some(0));
        assert_eq!(strip.active_tab_id(), Some(TabId(0)));

        strip.change_tab(Direction::Next);
        assert_eq!(host.active_index(), Some(1));
        assert_eq!(strip.active_tab_id(), Some(TabId(1)));
    }

    /// Host that never reports a selection
    struct UnselectedHost {
        inner: HeadlessHost,
    }

    impl TabHost for UnselectedHost {
        fn mount(&mut self, id: TabId, header: &str, content: &str) {
            self.inner.mount(id, header, content);
        }

        fn unmount(&mut self, id: TabId) {
            self.inner.unmount(id);
        }

        fn refresh(&mut self) {
            self.inner.refresh();
        }

        fn active_index(&self) -> Option<usize> {
            None
        }

        fn set_active_index(&mut self, index: usize) {
            self.inner.set_active_index(index);
        }

        fn set_bar_hidden(&mut self, hidden: bool) {
            self.inner.set_bar_hidden(hidden);
        }

        fn is_bar_hidden(&self) -> bool {
            self.inner.is_bar_hidden()
        }
    }

    #[test]
    fn test_change_tab_without_host_selection_starts_at_first() {
        let inner = HeadlessHost::new();
        let host = UnselectedHost {
            inner: inner.clone(),
        };
        let mut strip = TabStrip::new(
            Box::new(host),
            Box::new(MemoryPaneFactory::new()),
            "default",
        );
        for _ in 0..3 {
            strip.new_tab(TabOptions::default()).unwrap();
        }

        strip.change_tab(Direction::Next);
        assert_eq!(inner.active_index(), Some(1));

        strip.change_tab(Direction::Previous);
        assert_eq!(inner.active_index(), Some(2));
    }

    #[test]
    fn test_mounted_markup_matches_tab() {
        let (mut strip, host, _) = strip();
        let id = strip
            .new_tab(TabOptions {
                name: Some("notes".to_string()),
                filename: Some("/tmp/notes.md".to_string()),
                ..Default::default()
            })
            .unwrap();

        let mounted = host.mounted(id).unwrap();
        assert_eq!(
            mounted.header,
            markup::tab_header(id, Some("notes"), Some("/tmp/notes.md"))
        );
        assert_eq!(mounted.content, markup::tab_content(id));

        strip.new_tab(TabOptions::default()).unwrap();
        strip.remove_tab(Some(id)).unwrap();
        assert!(host.mounted(id).is_none());
    }

    #[test]
    fn test_activation_updates_last_access() {
        let (mut strip, _, _) = strip_with(2);
        let before = strip.get(TabId(0)).unwrap().last_accessed_at;

        strip.handle(TabEvent::Activated(TabId(0))).unwrap();
        let tab = strip.get(TabId(0)).unwrap();
        assert!(tab.last_accessed_at >= before);
        assert!(tab.last_accessed_at >= tab.created_at);
    }

    #[test]
    fn test_unknown_activation_ignored() {
        let (mut strip, _, _) = strip_with(2);
        strip.handle(TabEvent::Activated(TabId(42))).unwrap();
        assert_eq!(strip.active_tab_id(), Some(TabId(1)));
    }

    #[test]
    fn test_mutations_refresh_host() {
        let (mut strip, host, _) = strip_with(2);
        assert_eq!(host.refresh_count(), 2);
        strip.remove_tab(None).unwrap();
        assert_eq!(host.refresh_count(), 3);
    }
}
