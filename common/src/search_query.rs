//! Shared search request model.

use serde::{Deserialize, Serialize};

use crate::{applied_filter::AppliedFilter, search_const::PAGE_SIZE};


/// Everything the backend needs to run one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub filters: Vec<AppliedFilter>,
    /// 1-based page number.
    pub page: u64,
    pub page_size: u64,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            filters: Vec::new(),
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

impl SearchRequest {
    /// Row offset of the first document on the requested page.
    pub fn offset(&self) -> u64 {
        (self.page.max(1) - 1) * self.page_size
    }
}
