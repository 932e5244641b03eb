//! The search state and the store that owns every mutation of it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    applied_filter::{self, AppliedFilter, FilterValue},
    filter_catalog::{self, FilterValueType},
    search_const::{PAGE_SIZE, SEARCH_HISTORY_LIMIT},
    search_result::{Document, GroupCounts},
};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub query: String,
    pub filters: Vec<AppliedFilter>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPhase {
    Idle,
    Searching,
    Errored,
}

/// Snapshot of the search page. Read freely, mutate only through [`SearchStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub query: String,
    pub applied_filters: Vec<AppliedFilter>,
    pub documents: Vec<Document>,
    pub total_documents: u64,
    pub current_page: u64,
    pub page_size: u64,
    pub group_counts: GroupCounts,
    pub is_searching: bool,
    pub filter_editor_open: bool,
    pub has_searched: bool,
    pub error: Option<String>,
    pub search_history: Vec<SearchHistoryEntry>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            applied_filters: Vec::new(),
            documents: Vec::new(),
            total_documents: 0,
            current_page: 1,
            page_size: PAGE_SIZE,
            group_counts: GroupCounts::default(),
            is_searching: false,
            filter_editor_open: true,
            has_searched: false,
            error: None,
            search_history: Vec::new(),
        }
    }
}

impl SearchState {
    pub fn phase(&self) -> SearchPhase {
        if self.is_searching {
            SearchPhase::Searching
        } else if self.error.is_some() {
            SearchPhase::Errored
        } else {
            SearchPhase::Idle
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total_documents.div_ceil(self.page_size.max(1))
    }

    /// With no value, any filter with that id matches.
    pub fn is_filter_applied(&self, id: &str, value: Option<&FilterValue>) -> bool {
        self.applied_filters
            .iter()
            .any(|f| f.id == id && value.is_none_or(|v| &f.value == v))
    }

    pub fn filter_count(&self) -> FilterCount {
        let mut by_type = BTreeMap::new();
        for filter in &self.applied_filters {
            if let Some(definition) = filter_catalog::lookup(&filter.id) {
                *by_type.entry(definition.value_type).or_insert(0) += 1;
            }
        }
        FilterCount { total: self.applied_filters.len(), by_type }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCount {
    pub total: usize,
    pub by_type: BTreeMap<FilterValueType, usize>,
}


/// Owner of the [`SearchState`]. Every field change goes through one of these setters.
#[derive(Debug, Clone, Default)]
pub struct SearchStore {
    state: SearchState,
}

impl SearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    /// Returns false when the same `(id, value)` is already applied. A non-list filter
    /// whose id is already applied takes over that entry.
    pub fn add_filter(&mut self, filter: AppliedFilter) -> bool {
        applied_filter::merge_filter(&mut self.state.applied_filters, filter)
    }

    /// Remove every filter with `id`, or only the one holding `value`. Returns how many went.
    pub fn remove_filter(&mut self, id: &str, value: Option<&FilterValue>) -> usize {
        let before = self.state.applied_filters.len();
        self.state
            .applied_filters
            .retain(|f| !(f.id == id && value.is_none_or(|v| &f.value == v)));
        before - self.state.applied_filters.len()
    }

    pub fn clear_filters(&mut self) {
        self.state.applied_filters.clear();
    }

    /// Replace the result page and its total together.
    pub fn set_documents(&mut self, mut documents: Vec<Document>, total: u64) {
        documents.truncate(self.state.page_size as usize);
        self.state.documents = documents;
        self.state.total_documents = total;
    }

    pub fn set_group_counts(&mut self, group_counts: GroupCounts) {
        self.state.group_counts = group_counts;
    }

    pub fn set_current_page(&mut self, page: u64) {
        self.state.current_page = page.max(1);
    }

    pub fn set_is_searching(&mut self, is_searching: bool) {
        self.state.is_searching = is_searching;
    }

    pub fn set_filter_editor_open(&mut self, open: bool) {
        self.state.filter_editor_open = open;
    }

    pub fn set_has_searched(&mut self, has_searched: bool) {
        self.state.has_searched = has_searched;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.state.error = error;
    }

    pub fn push_history(&mut self, query: String, filters: Vec<AppliedFilter>, timestamp: DateTime<Utc>) {
        let history = &mut self.state.search_history;
        history.insert(0, SearchHistoryEntry { query, filters, timestamp });
        history.truncate(SEARCH_HISTORY_LIMIT);
    }

    pub fn remove_history_item(&mut self, index: usize) -> Option<SearchHistoryEntry> {
        if index < self.state.search_history.len() {
            Some(self.state.search_history.remove(index))
        } else {
            None
        }
    }

    pub fn clear_history(&mut self) {
        self.state.search_history.clear();
    }

    /// Replace query and filters with a history entry. Returns false if there is no such entry.
    pub fn apply_history_item(&mut self, index: usize) -> bool {
        let Some(entry) = self.state.search_history.get(index).cloned() else {
            return false;
        };
        self.state.applied_filters.clear();
        self.state.query = entry.query;
        for filter in entry.filters {
            self.add_filter(filter);
        }
        true
    }

    /// Back to a fresh page. History survives.
    pub fn reset(&mut self) {
        let search_history = std::mem::take(&mut self.state.search_history);
        self.state = SearchState { search_history, ..SearchState::default() };
    }
}


#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::applied_filter::DateRange;

    fn text_filter(id: &str, text: &str) -> AppliedFilter {
        AppliedFilter::new(id, FilterValue::Text(text.into())).unwrap()
    }

    fn at(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, second).unwrap()
    }

    #[test]
    fn add_filter_is_idempotent() {
        let mut store = SearchStore::new();
        assert!(store.add_filter(text_filter("nr_processo", "1")));
        assert!(!store.add_filter(text_filter("nr_processo", "1")));
        assert_eq!(store.state().applied_filters.len(), 1);
    }

    #[test]
    fn single_valued_filter_is_replaced_in_place() {
        let mut store = SearchStore::new();
        store.add_filter(text_filter("nr_processo", "2"));
        store.add_filter(text_filter("nome_contribuinte", "Ana"));
        assert!(store.add_filter(text_filter("nr_processo", "1")));
        assert_eq!(
            store.state().applied_filters,
            vec![text_filter("nr_processo", "1"), text_filter("nome_contribuinte", "Ana")]
        );
    }

    #[test]
    fn second_date_range_for_same_id_replaces_first() {
        let mut store = SearchStore::new();
        store.add_filter(AppliedFilter::new("dt_juntada", FilterValue::DateRange(DateRange::new("2024-01-01", ""))).unwrap());
        store.add_filter(AppliedFilter::new("dt_juntada", FilterValue::DateRange(DateRange::new("2023-01-01", "2023-02-01"))).unwrap());

        let count = store.state().filter_count();
        assert_eq!(count.by_type.get(&FilterValueType::DateRange), Some(&1));
        assert_eq!(
            store.state().applied_filters[0].value,
            FilterValue::DateRange(DateRange::new("2023-01-01", "2023-02-01"))
        );
    }

    #[test]
    fn list_filters_may_repeat_an_id() {
        let mut store = SearchStore::new();
        store.add_filter(AppliedFilter::new("tipo_processo", FilterValue::List(vec!["A".into()])).unwrap());
        store.add_filter(AppliedFilter::new("tipo_processo", FilterValue::List(vec!["B".into()])).unwrap());
        assert_eq!(store.state().applied_filters.len(), 2);
    }

    fn list_filter(value: &str) -> AppliedFilter {
        AppliedFilter::new("tipo_processo", FilterValue::List(vec![value.into()])).unwrap()
    }

    #[test]
    fn remove_filter_without_value_removes_all_for_id() {
        let mut store = SearchStore::new();
        store.add_filter(list_filter("A"));
        store.add_filter(list_filter("B"));
        store.add_filter(text_filter("nome_contribuinte", "Ana"));
        assert_eq!(store.remove_filter("tipo_processo", None), 2);
        assert_eq!(store.state().applied_filters, vec![text_filter("nome_contribuinte", "Ana")]);
    }

    #[test]
    fn remove_filter_with_value_removes_only_match() {
        let mut store = SearchStore::new();
        store.add_filter(list_filter("A"));
        store.add_filter(list_filter("B"));
        assert_eq!(store.remove_filter("tipo_processo", Some(&FilterValue::List(vec!["B".into()]))), 1);
        assert_eq!(store.state().applied_filters, vec![list_filter("A")]);
        assert_eq!(store.remove_filter("tipo_processo", Some(&FilterValue::List(vec!["Z".into()]))), 0);
    }

    #[test]
    fn history_is_bounded_newest_first() {
        let mut store = SearchStore::new();
        for i in 0..15 {
            store.push_history(format!("q{i}"), vec![], at(i));
        }
        let history = &store.state().search_history;
        assert_eq!(history.len(), SEARCH_HISTORY_LIMIT);
        assert_eq!(history[0].query, "q14");
        assert_eq!(history[9].query, "q5");
    }

    #[test]
    fn apply_history_item_replaces_query_and_filters() {
        let mut store = SearchStore::new();
        store.push_history("old".into(), vec![text_filter("nr_processo", "1")], at(0));
        store.set_query("new");
        store.add_filter(text_filter("nome_contribuinte", "Ana"));

        assert!(store.apply_history_item(0));
        assert_eq!(store.state().query, "old");
        assert_eq!(store.state().applied_filters, vec![text_filter("nr_processo", "1")]);
        assert!(!store.apply_history_item(5));
    }

    #[test]
    fn documents_never_exceed_page_size() {
        let mut store = SearchStore::new();
        store.set_documents(vec![Document::default(); 25], 1000);
        assert_eq!(store.state().documents.len(), PAGE_SIZE as usize);
        assert_eq!(store.state().total_documents, 1000);
        assert_eq!(store.state().total_pages(), 50);
    }

    #[test]
    fn page_is_at_least_one() {
        let mut store = SearchStore::new();
        store.set_current_page(0);
        assert_eq!(store.state().current_page, 1);
    }

    #[test]
    fn phase_follows_flags() {
        let mut store = SearchStore::new();
        assert_eq!(store.state().phase(), SearchPhase::Idle);
        store.set_is_searching(true);
        assert_eq!(store.state().phase(), SearchPhase::Searching);
        store.set_is_searching(false);
        store.set_error(Some("boom".into()));
        assert_eq!(store.state().phase(), SearchPhase::Errored);
    }

    #[test]
    fn filter_queries() {
        let mut store = SearchStore::new();
        store.add_filter(text_filter("nr_processo", "1"));
        store.add_filter(AppliedFilter::new("dt_juntada", FilterValue::DateRange(DateRange::new("2024-01-01", ""))).unwrap());

        let state = store.state();
        assert!(state.is_filter_applied("nr_processo", None));
        assert!(!state.is_filter_applied("nr_processo", Some(&FilterValue::Text("2".into()))));

        let count = state.filter_count();
        assert_eq!(count.total, 2);
        assert_eq!(count.by_type.get(&FilterValueType::Text), Some(&1));
    }

    #[test]
    fn reset_keeps_history() {
        let mut store = SearchStore::new();
        store.set_query("x");
        store.set_current_page(4);
        store.push_history("x".into(), vec![], at(0));
        store.reset();
        assert_eq!(store.state().query, "");
        assert_eq!(store.state().current_page, 1);
        assert_eq!(store.state().search_history.len(), 1);
    }
}
