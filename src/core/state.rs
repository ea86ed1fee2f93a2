//! # Application State
//!
//! Core session state for the register. Domain logic only, no TUI types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── store: RecordStore        // ordered asset records
//! ├── selection: SelectionSet   // ids staged for export, cross-page
//! ├── paginator: Paginator      // current page + fixed page size
//! ├── theme: Theme              // light / dark
//! ├── notice: Option<Notice>    // transient user-facing message
//! └── report_title: String      // heading of the printed report
//! ```
//!
//! Fields are private. Every mutation goes through a method that keeps the
//! store, the selection and the page in step, so no caller can observe a
//! selection pointing at a deleted record or a page past the end.

use log::{debug, warn};

use crate::core::config::ResolvedConfig;
use crate::core::export::{self, ExportError, PrintDocument};
use crate::core::paginator::Paginator;
use crate::core::record::{AssetRecord, RecordId};
use crate::core::selection::SelectionSet;
use crate::core::store::RecordStore;
use crate::core::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A transient message shown to the user until dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

pub struct App {
    store: RecordStore,
    selection: SelectionSet,
    paginator: Paginator,
    theme: Theme,
    notice: Option<Notice>,
    report_title: String,
}

impl App {
    pub fn new(page_size: usize, theme: Theme) -> Self {
        Self {
            store: RecordStore::new(),
            selection: SelectionSet::new(),
            paginator: Paginator::new(page_size),
            theme,
            notice: None,
            report_title: export::DEFAULT_REPORT_TITLE.to_string(),
        }
    }

    /// Build the session from resolved config, a stored theme and seed records.
    /// Seeding does not move the page: the register opens on page 1.
    pub fn from_config(config: &ResolvedConfig, theme: Theme, seed: Vec<AssetRecord>) -> Self {
        let mut app = Self::new(config.page_size, theme);
        app.store = RecordStore::from_records(seed);
        app.report_title = config.report_title.clone();
        app
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn records(&self) -> &[AssetRecord] {
        self.store.records()
    }

    pub fn record(&self, id: &RecordId) -> Option<&AssetRecord> {
        self.store.get(id)
    }

    pub fn record_count(&self) -> usize {
        self.store.len()
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.store.len())
    }

    /// Records on the current page.
    pub fn visible_records(&self) -> &[AssetRecord] {
        self.paginator.visible(self.store.records())
    }

    pub fn page_ids(&self) -> Vec<RecordId> {
        self.visible_records().iter().map(|r| r.id.clone()).collect()
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selection.is_selected(id)
    }

    /// State of the current page's "select all" checkbox.
    pub fn page_fully_selected(&self) -> bool {
        self.selection
            .all_selected(self.visible_records().iter().map(|r| &r.id))
    }

    pub fn selection_count(&self) -> usize {
        self.selection.len()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn report_title(&self) -> &str {
        &self.report_title
    }

    // ------------------------------------------------------------------
    // Record mutations
    // ------------------------------------------------------------------

    /// Append a record and jump to the page that shows it.
    pub fn add_record(&mut self, record: AssetRecord) -> bool {
        let id = record.id.clone();
        if !self.store.insert(record) {
            warn!("Refusing to add record with existing id {}", id);
            return false;
        }
        self.paginator.on_insert(self.store.len());
        debug!(
            "Added record {} (count={}, page={}/{})",
            id,
            self.store.len(),
            self.current_page(),
            self.total_pages()
        );
        true
    }

    /// Replace a record in place. Page and selection are unaffected.
    pub fn update_record(&mut self, record: AssetRecord) -> bool {
        let id = record.id.clone();
        let updated = self.store.update(record);
        if updated {
            debug!("Updated record {}", id);
        } else {
            warn!("Update for unknown record {}", id);
        }
        updated
    }

    /// Remove a record, prune it from the selection and clamp the page, all
    /// before returning.
    pub fn delete_record(&mut self, id: &RecordId) -> Option<AssetRecord> {
        let removed = self.store.remove(id)?;
        self.selection.remove(id);
        self.paginator.on_delete(self.store.len());
        debug!(
            "Deleted record {} (count={}, page={}/{}, selected={})",
            id,
            self.store.len(),
            self.current_page(),
            self.total_pages(),
            self.selection.len()
        );
        Some(removed)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Flip one record's selection. Unknown ids are ignored.
    pub fn toggle_selection(&mut self, id: &RecordId) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.selection.toggle(id)
    }

    pub fn select_page(&mut self) {
        let ids = self.page_ids();
        self.selection.select_all(&ids);
    }

    pub fn deselect_page(&mut self) {
        let ids = self.page_ids();
        self.selection.deselect_all(&ids);
    }

    /// The "select all" checkbox: select the page unless it is already fully
    /// selected, in which case clear it.
    pub fn toggle_page_selection(&mut self) {
        if self.page_fully_selected() {
            self.deselect_page();
        } else {
            self.select_page();
        }
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    pub fn change_page(&mut self, page: usize) -> bool {
        self.paginator.request_page(page, self.store.len())
    }

    pub fn next_page(&mut self) -> bool {
        self.paginator.next_page(self.store.len())
    }

    pub fn previous_page(&mut self) -> bool {
        self.paginator.previous_page(self.store.len())
    }

    // ------------------------------------------------------------------
    // Export, theme, notices
    // ------------------------------------------------------------------

    pub fn compose_export(&self) -> Result<PrintDocument, ExportError> {
        export::compose(&self.store, &self.selection, &self.report_title)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn set_notice(&mut self, notice: Notice) {
        debug!("Notice ({:?}): {}", notice.level, notice.message);
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app_with_records, record};

    #[test]
    fn test_app_new_defaults() {
        let app = App::new(5, Theme::Light);
        assert_eq!(app.current_page(), 1);
        assert_eq!(app.total_pages(), 0);
        assert!(app.visible_records().is_empty());
        assert!(app.notice().is_none());
        assert_eq!(app.report_title(), export::DEFAULT_REPORT_TITLE);
    }

    #[test]
    fn test_add_jumps_to_last_page() {
        let mut app = App::new(5, Theme::Light);
        for i in 0..11 {
            app.add_record(record(&format!("r{i}")));
            assert_eq!(app.total_pages(), (i + 1_usize).div_ceil(5));
            assert_eq!(app.current_page(), app.total_pages());
        }
        assert_eq!(app.visible_records().len(), 1);
    }

    #[test]
    fn test_delete_lone_record_on_last_page_clamps() {
        let mut app = app_with_records(6, 5);
        assert!(app.change_page(2));
        assert_eq!(app.visible_records().len(), 1);

        let lone = app.visible_records()[0].id.clone();
        app.delete_record(&lone);
        assert_eq!(app.total_pages(), 1);
        assert_eq!(app.current_page(), 1);
    }

    #[test]
    fn test_delete_prunes_selection() {
        let mut app = app_with_records(3, 5);
        let id = app.records()[1].id.clone();
        app.toggle_selection(&id);
        assert_eq!(app.selection_count(), 1);

        app.delete_record(&id);
        assert!(!app.is_selected(&id));
        assert_eq!(app.selection_count(), 0);
    }

    #[test]
    fn test_delete_everything_resets_page() {
        let mut app = app_with_records(1, 5);
        let id = app.records()[0].id.clone();
        app.delete_record(&id);
        assert_eq!(app.current_page(), 1);
        assert_eq!(app.total_pages(), 0);
    }

    #[test]
    fn test_page_select_all_is_page_scoped() {
        let mut app = app_with_records(7, 5);
        assert!(app.change_page(2));
        let page_two: Vec<RecordId> = app.page_ids();
        app.toggle_selection(&page_two[0]);

        assert!(app.change_page(1));
        app.select_page();
        assert!(app.page_fully_selected());

        let first = app.page_ids()[0].clone();
        app.toggle_selection(&first);
        assert!(!app.page_fully_selected());

        app.deselect_page();
        assert!(app.is_selected(&page_two[0]));
        assert_eq!(app.selection_count(), 1);
    }

    #[test]
    fn test_toggle_page_selection() {
        let mut app = app_with_records(3, 5);
        app.toggle_page_selection();
        assert_eq!(app.selection_count(), 3);
        app.toggle_page_selection();
        assert_eq!(app.selection_count(), 0);
    }

    #[test]
    fn test_toggle_unknown_id_is_ignored() {
        let mut app = app_with_records(1, 5);
        assert!(!app.toggle_selection(&RecordId::from("ghost")));
        assert_eq!(app.selection_count(), 0);
    }

    #[test]
    fn test_update_keeps_page_and_selection() {
        let mut app = app_with_records(6, 5);
        let mut edited = app.records()[0].clone();
        app.toggle_selection(&edited.id);
        edited.name = "renamed".to_string();

        assert!(app.update_record(edited.clone()));
        assert_eq!(app.current_page(), 1);
        assert!(app.is_selected(&edited.id));
        assert_eq!(app.record(&edited.id).unwrap().name, "renamed");
    }

    #[test]
    fn test_seeded_app_opens_on_first_page() {
        let config = crate::core::config::resolve(&Default::default(), &Default::default());
        let seed = (0..7).map(|i| record(&format!("s{i}"))).collect();
        let app = App::from_config(&config, Theme::Dark, seed);
        assert_eq!(app.current_page(), 1);
        assert_eq!(app.total_pages(), 2);
        assert_eq!(app.theme(), Theme::Dark);
    }
}
