//! Mapping between the search state and the page's query-string parameters.

use serde::{Deserialize, Serialize};

use crate::{
    applied_filter::{self, AppliedFilter},
    error::FilterError,
    filter_catalog, filter_codec,
    search_state::SearchState,
};

pub const QUERY_PARAM: &str = "q";
pub const PAGE_PARAM: &str = "page";


/// Ordered multimap of query-string parameters, in the order they appear in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParamMap(Vec<(String, String)>);

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, String)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}


/// The part of the search state that lives in the URL. Also used as the identity of
/// an executed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlSearchState {
    pub query: String,
    pub filters: Vec<AppliedFilter>,
    pub page: u64,
}

impl Default for UrlSearchState {
    fn default() -> Self {
        Self { query: String::new(), filters: Vec::new(), page: 1 }
    }
}

impl UrlSearchState {
    pub fn from_state(state: &SearchState) -> Self {
        Self {
            query: state.query.clone(),
            filters: state.applied_filters.clone(),
            page: state.current_page,
        }
    }

    /// Nothing to search for: blank query and no filters.
    pub fn is_empty_intent(&self) -> bool {
        self.query.trim().is_empty() && self.filters.is_empty()
    }
}


pub fn to_url_params(state: &UrlSearchState) -> ParamMap {
    let mut params = ParamMap::new();
    if !state.query.is_empty() {
        params.append(QUERY_PARAM, state.query.clone());
    }
    for filter in &state.filters {
        if filter_catalog::lookup(&filter.id).is_none() {
            continue;
        }
        params.append(filter.id.clone(), filter_codec::encode(filter));
    }
    // page 1 is implicit
    if state.page > 1 {
        params.append(PAGE_PARAM, state.page.to_string());
    }
    params
}

pub fn from_url_params(params: &ParamMap) -> UrlSearchState {
    restore_from_params(params).0
}

/// Like [`from_url_params`], also reporting the filters that were dropped because their
/// value could not be decoded. Keys that are neither `q`, `page` nor a catalog id are
/// ignored without a report.
pub fn restore_from_params(params: &ParamMap) -> (UrlSearchState, Vec<FilterError>) {
    let query = params.get(QUERY_PARAM).unwrap_or_default().to_string();
    let page = params
        .get(PAGE_PARAM)
        .and_then(|p| p.trim().parse::<u64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1);

    let mut filters: Vec<AppliedFilter> = Vec::new();
    let mut dropped = Vec::new();
    for (key, raw) in params.iter() {
        if key == QUERY_PARAM || key == PAGE_PARAM {
            continue;
        }
        let Some(definition) = filter_catalog::lookup(key) else {
            continue;
        };
        let filter = match filter_codec::decode(definition, raw).and_then(|value| AppliedFilter::from_definition(definition, value)) {
            Ok(filter) => filter,
            Err(e) => {
                dropped.push(e);
                continue;
            }
        };
        if filter_codec::is_filter_valid(&filter) {
            applied_filter::merge_filter(&mut filters, filter);
        }
    }

    (UrlSearchState { query, filters, page }, dropped)
}
