//! # Selection Set
//!
//! Record ids staged for batch export. Not scoped to a page: selections made
//! on page 1 survive navigation to page 3 and back.
//!
//! Page-wide operations only add or remove the ids they are given, so
//! "select all" on one page never disturbs another page's picks.

use std::collections::HashSet;

use crate::core::record::RecordId;

#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: HashSet<RecordId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership. Returns the new state.
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn select_all<'a>(&mut self, page_ids: impl IntoIterator<Item = &'a RecordId>) {
        self.ids.extend(page_ids.into_iter().cloned());
    }

    pub fn deselect_all<'a>(&mut self, page_ids: impl IntoIterator<Item = &'a RecordId>) {
        for id in page_ids {
            self.ids.remove(id);
        }
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    /// True iff the page is non-empty and every id on it is selected.
    pub fn all_selected<'a>(&self, page_ids: impl IntoIterator<Item = &'a RecordId>) -> bool {
        let mut any = false;
        for id in page_ids {
            if !self.ids.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn remove(&mut self, id: &RecordId) -> bool {
        self.ids.remove(id)
    }

    /// Drop every id the predicate rejects.
    pub fn retain(&mut self, mut keep: impl FnMut(&RecordId) -> bool) {
        self.ids.retain(|id| keep(id));
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<RecordId> {
        names.iter().map(|n| RecordId::from(*n)).collect()
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut selection = SelectionSet::new();
        let id = RecordId::from("a");
        assert!(selection.toggle(&id));
        assert!(selection.is_selected(&id));
        assert!(!selection.toggle(&id));
        assert!(!selection.is_selected(&id));
    }

    #[test]
    fn test_page_operations_leave_other_pages_alone() {
        let page_one = ids(&["a", "b"]);
        let page_two = ids(&["c", "d"]);
        let mut selection = SelectionSet::new();

        selection.select_all(&page_one);
        selection.toggle(&page_two[0]);
        selection.deselect_all(&page_one);

        assert!(!selection.is_selected(&page_one[0]));
        assert!(selection.is_selected(&page_two[0]));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_all_selected_tracks_page_aggregate() {
        let page = ids(&["a", "b", "c"]);
        let mut selection = SelectionSet::new();
        assert!(!selection.all_selected(&page));

        selection.select_all(&page);
        assert!(selection.all_selected(&page));

        selection.toggle(&page[1]);
        assert!(!selection.all_selected(&page));
    }

    #[test]
    fn test_all_selected_is_false_for_empty_page() {
        let selection = SelectionSet::new();
        assert!(!selection.all_selected(&Vec::<RecordId>::new()));
    }

    #[test]
    fn test_retain() {
        let mut selection = SelectionSet::new();
        selection.select_all(&ids(&["a", "b", "c"]));
        selection.retain(|id| id.as_str() != "b");
        assert_eq!(selection.len(), 2);
        assert!(!selection.is_selected(&RecordId::from("b")));
    }
}
