//! Search execution: the orchestrator state machine and the seams it runs against.

use std::{future::Future, time::Duration};

use chrono::{DateTime, Utc};
use common::{
    search_query::SearchRequest,
    search_result::SearchResultDocuments,
    url_state::ParamMap,
};

pub mod browser;
pub mod orchestrator;

pub use orchestrator::{SearchOrchestrator, SearchOutcome};


/// The index behind the search page.
pub trait SearchBackend {
    fn search(&self, request: SearchRequest) -> impl Future<Output = anyhow::Result<SearchResultDocuments>>;
}

/// The page address bar.
pub trait UrlLocation {
    fn current_params(&self) -> ParamMap;
    /// Navigate to the given parameters, adding a history entry.
    fn push_params(&self, params: ParamMap);
}

pub trait SearchClock {
    fn now(&self) -> DateTime<Utc>;
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}
