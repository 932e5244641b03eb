//! Coordinates search execution, URL synchronization and state updates.
//!
//! Single-threaded: every method takes `&self` and the store lives in a `RefCell`.
//! No borrow is held across an `.await`, so overlapping calls on one executor are fine.

use std::{
    cell::{Cell, RefCell},
    time::Duration,
};

use common::{
    applied_filter::{AppliedFilter, FilterValue},
    filter_codec::is_filter_valid,
    search_const::DEBOUNCE_MS,
    search_query::SearchRequest,
    search_state::{SearchState, SearchStore},
    url_state::{UrlSearchState, from_url_params, restore_from_params, to_url_params},
};
use dioxus::logger::tracing::{debug, error, info, warn};

use super::{SearchBackend, SearchClock, UrlLocation};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results were applied to the state.
    Completed,
    /// The backend failed; previous results are kept and the error is recorded.
    Failed,
    /// Blank query and no filters.
    SkippedEmpty,
    /// Same query, filters and page as the last executed search.
    SkippedDuplicate,
    /// A newer search or debounce call took over before this one finished.
    Superseded,
    AlreadyRestored,
    /// The URL held nothing to search for.
    NothingRestored,
}

type Listener = Box<dyn Fn(&SearchState)>;

pub struct SearchOrchestrator<B, L, C> {
    backend: B,
    location: L,
    clock: C,
    store: RefCell<SearchStore>,
    /// Parameters of the last dispatched search that has not failed.
    last_executed: RefCell<Option<UrlSearchState>>,
    /// Key of the one request whose response may still be applied.
    current_request: Cell<u64>,
    debounce_generation: Cell<u64>,
    restored: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
}

impl<B: SearchBackend, L: UrlLocation, C: SearchClock> SearchOrchestrator<B, L, C> {
    pub fn new(backend: B, location: L, clock: C) -> Self {
        Self {
            backend,
            location,
            clock,
            store: RefCell::new(SearchStore::new()),
            last_executed: RefCell::new(None),
            current_request: Cell::new(0),
            debounce_generation: Cell::new(0),
            restored: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn state(&self) -> SearchState {
        self.store.borrow().state().clone()
    }

    /// Called with a snapshot after every state change. Listeners must not subscribe from inside a callback.
    pub fn subscribe(&self, listener: impl Fn(&SearchState) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    fn update<R>(&self, f: impl FnOnce(&mut SearchStore) -> R) -> R {
        let result = f(&mut self.store.borrow_mut());
        self.notify();
        result
    }

    fn notify(&self) {
        let snapshot = self.state();
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
    }

    // intents

    /// A new query starts again from page 1.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.update(|store| {
            if store.state().query != query {
                store.set_current_page(1);
            }
            store.set_query(query);
        });
    }

    /// Incomplete or unknown filters are refused. Returns whether the filter was added.
    pub fn add_filter(&self, filter: AppliedFilter) -> bool {
        if !is_filter_valid(&filter) {
            warn!("refusing incomplete filter {}", filter.id);
            return false;
        }
        self.update(|store| {
            let added = store.add_filter(filter);
            if added {
                store.set_current_page(1);
            }
            added
        })
    }

    pub fn remove_filter(&self, id: &str, value: Option<&FilterValue>) -> usize {
        self.update(|store| {
            let removed = store.remove_filter(id, value);
            if removed > 0 {
                store.set_current_page(1);
            }
            removed
        })
    }

    pub fn clear_filters(&self) {
        self.update(|store| {
            store.clear_filters();
            store.set_current_page(1);
        });
    }

    pub fn set_filter_editor_open(&self, open: bool) {
        self.update(|store| store.set_filter_editor_open(open));
    }

    pub fn apply_history_item(&self, index: usize) -> bool {
        self.update(|store| {
            let applied = store.apply_history_item(index);
            if applied {
                store.set_current_page(1);
            }
            applied
        })
    }

    pub fn remove_history_item(&self, index: usize) -> bool {
        self.update(|store| store.remove_history_item(index).is_some())
    }

    pub fn clear_history(&self) {
        self.update(|store| store.clear_history());
    }

    /// Fresh page. Any response still in flight is discarded when it arrives.
    pub fn reset(&self) {
        self.cancel_debounce();
        self.current_request.set(self.current_request.get() + 1);
        self.last_executed.borrow_mut().take();
        self.update(|store| store.reset());
    }

    pub async fn go_to_page(&self, page: u64) -> SearchOutcome {
        self.update(|store| store.set_current_page(page));
        self.execute_search().await
    }

    /// Explicit submission: drops any pending debounced search and runs now.
    pub async fn submit_search(&self) -> SearchOutcome {
        self.cancel_debounce();
        self.execute_search().await
    }

    pub fn cancel_debounce(&self) {
        self.debounce_generation.set(self.debounce_generation.get() + 1);
    }

    /// Live-input variant. Each call restarts the quiet window; only the last call
    /// in a burst reaches [`Self::execute_search`].
    pub async fn debounced_search(&self) -> SearchOutcome {
        let generation = self.debounce_generation.get() + 1;
        self.debounce_generation.set(generation);
        self.clock.sleep(Duration::from_millis(DEBOUNCE_MS)).await;
        if self.debounce_generation.get() != generation {
            return SearchOutcome::Superseded;
        }
        self.execute_search().await
    }

    /// Load query, filters and page from the URL once per page load and search if
    /// there is anything to search for.
    pub async fn restore_from_url(&self) -> SearchOutcome {
        if self.restored.replace(true) {
            return SearchOutcome::AlreadyRestored;
        }
        let (restored, dropped) = restore_from_params(&self.location.current_params());
        for e in dropped {
            warn!("ignoring filter from URL: {e}");
        }
        if restored.is_empty_intent() {
            return SearchOutcome::NothingRestored;
        }
        info!("restoring search from URL: q={:?} filters={} page={}", restored.query, restored.filters.len(), restored.page);
        self.update(|store| {
            store.set_query(restored.query);
            for filter in restored.filters {
                store.add_filter(filter);
            }
            store.set_current_page(restored.page);
        });
        self.execute_search().await
    }

    pub async fn execute_search(&self) -> SearchOutcome {
        let resolved = UrlSearchState::from_state(self.store.borrow().state());
        if resolved.is_empty_intent() {
            debug!("nothing to search for");
            return SearchOutcome::SkippedEmpty;
        }
        if self.last_executed.borrow().as_ref() == Some(&resolved) {
            debug!("search unchanged since last execution, skipping");
            return SearchOutcome::SkippedDuplicate;
        }
        *self.last_executed.borrow_mut() = Some(resolved.clone());

        let request_key = self.current_request.get() + 1;
        self.current_request.set(request_key);

        let request = SearchRequest {
            query: resolved.query.clone(),
            filters: resolved.filters.clone(),
            page: resolved.page,
            page_size: self.store.borrow().state().page_size,
        };
        self.update(|store| {
            store.set_is_searching(true);
            store.set_filter_editor_open(false);
            store.set_error(None);
        });
        info!("search #{request_key}: q={:?} filters={} page={}", request.query, request.filters.len(), request.page);

        let result = self.backend.search(request).await;

        if self.current_request.get() != request_key {
            debug!("discarding response of superseded search #{request_key}");
            return SearchOutcome::Superseded;
        }

        match result {
            Ok(results) => {
                let timestamp = self.clock.now();
                self.update(|store| {
                    store.set_documents(results.documents, results.total_documents);
                    store.set_group_counts(results.group_counts);
                    store.push_history(resolved.query.clone(), resolved.filters.clone(), timestamp);
                });
                self.sync_url(&resolved);
                self.update(|store| {
                    store.set_has_searched(true);
                    store.set_is_searching(false);
                });
                SearchOutcome::Completed
            }
            Err(e) => {
                error!("search #{request_key} failed: {e:#}");
                // allow an identical retry
                self.last_executed.borrow_mut().take();
                self.update(|store| {
                    store.set_error(Some(e.to_string()));
                    store.set_has_searched(true);
                    store.set_is_searching(false);
                });
                SearchOutcome::Failed
            }
        }
    }

    /// Push only when the address bar does not already describe this search.
    fn sync_url(&self, resolved: &UrlSearchState) {
        let current = from_url_params(&self.location.current_params());
        if &current == resolved {
            return;
        }
        self.location.push_params(to_url_params(resolved));
    }
}


#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap, future::Future, rc::Rc, time::Duration};

    use chrono::{DateTime, TimeZone, Utc};
    use common::{
        applied_filter::{AppliedFilter, DateRange, FilterValue},
        search_query::SearchRequest,
        search_result::{Document, FacetCount, GroupCounts, SearchResultDocuments},
        search_state::SearchPhase,
        url_state::ParamMap,
    };
    use futures_util::future::{join, join3};
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct FakeBackend {
        calls: RefCell<Vec<SearchRequest>>,
        delay_ms_by_page: RefCell<HashMap<u64, u64>>,
        failing: Cell<bool>,
    }

    impl FakeBackend {
        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    fn page_of(page: u64) -> SearchResultDocuments {
        let documents = (0..3)
            .map(|i| {
                let mut doc = Document::default();
                doc.fields.insert("id".into(), serde_json::Value::String(format!("p{page}-{i}")));
                doc
            })
            .collect();
        SearchResultDocuments {
            documents,
            total_documents: 57,
            group_counts: GroupCounts {
                grupo_processo: vec![FacetCount { name: "G".into(), count: 57 }],
                tipo_processo: vec![],
            },
            page,
        }
    }

    impl SearchBackend for FakeBackend {
        fn search(&self, request: SearchRequest) -> impl Future<Output = anyhow::Result<SearchResultDocuments>> {
            self.calls.borrow_mut().push(request.clone());
            let delay = self.delay_ms_by_page.borrow().get(&request.page).copied().unwrap_or(10);
            let failing = self.failing.get();
            async move {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                if failing {
                    anyhow::bail!("Erro na busca: 503 Service Unavailable");
                }
                Ok(page_of(request.page))
            }
        }
    }

    #[derive(Default)]
    struct FakeLocation {
        params: RefCell<ParamMap>,
        pushes: RefCell<Vec<ParamMap>>,
    }

    impl FakeLocation {
        fn with(pairs: &[(&str, &str)]) -> Self {
            let location = Self::default();
            *location.params.borrow_mut() = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
            location
        }
    }

    impl UrlLocation for FakeLocation {
        fn current_params(&self) -> ParamMap {
            self.params.borrow().clone()
        }

        fn push_params(&self, params: ParamMap) {
            *self.params.borrow_mut() = params.clone();
            self.pushes.borrow_mut().push(params);
        }
    }

    struct FakeClock;

    impl SearchClock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        }

        fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
            tokio::time::sleep(duration)
        }
    }

    type TestOrchestrator = SearchOrchestrator<FakeBackend, FakeLocation, FakeClock>;

    fn orchestrator() -> TestOrchestrator {
        SearchOrchestrator::new(FakeBackend::default(), FakeLocation::default(), FakeClock)
    }

    fn orchestrator_at(pairs: &[(&str, &str)]) -> TestOrchestrator {
        SearchOrchestrator::new(FakeBackend::default(), FakeLocation::with(pairs), FakeClock)
    }

    fn doc_ids(state: &SearchState) -> Vec<String> {
        state.documents.iter().filter_map(|d| d.id().map(str::to_string)).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn empty_search_is_a_noop() {
        let orch = orchestrator();
        assert_eq!(orch.execute_search().await, SearchOutcome::SkippedEmpty);
        assert_eq!(orch.backend().call_count(), 0);
        assert!(!orch.state().has_searched);
        assert!(orch.state().filter_editor_open);
    }

    #[tokio::test(start_paused = true)]
    async fn identical_searches_call_backend_once() {
        let orch = orchestrator();
        orch.set_query("nota fiscal");
        assert_eq!(orch.execute_search().await, SearchOutcome::Completed);
        assert_eq!(orch.execute_search().await, SearchOutcome::SkippedDuplicate);
        assert_eq!(orch.backend().call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_identical_searches_call_backend_once() {
        let orch = orchestrator();
        orch.set_query("x");
        let (a, b) = join(orch.execute_search(), orch.execute_search()).await;
        assert_eq!((a, b), (SearchOutcome::Completed, SearchOutcome::SkippedDuplicate));
        assert_eq!(orch.backend().call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn successful_search_updates_state_history_and_url() {
        let orch = orchestrator();
        orch.set_query("nota fiscal");
        orch.add_filter(AppliedFilter::new("dt_juntada", FilterValue::DateRange(DateRange::new("2024-01-01", ""))).unwrap());

        assert_eq!(orch.execute_search().await, SearchOutcome::Completed);

        let request = orch.backend().calls.borrow()[0].clone();
        assert_eq!(request.query, "nota fiscal");
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 20);

        let state = orch.state();
        assert_eq!(doc_ids(&state), vec!["p1-0", "p1-1", "p1-2"]);
        assert_eq!(state.total_documents, 57);
        assert_eq!(state.group_counts.grupo_processo.len(), 1);
        assert!(state.has_searched);
        assert!(!state.is_searching);
        assert!(!state.filter_editor_open);
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert_eq!(state.search_history.len(), 1);
        assert_eq!(state.search_history[0].query, "nota fiscal");

        let pushes = orch.location().pushes.borrow();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].get("q"), Some("nota fiscal"));
        assert_eq!(pushes[0].get("dt_juntada"), Some(r#"{"from":"2024-01-01","to":""}"#));
        assert_eq!(pushes[0].get("page"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn pagination_searches_with_offset_page() {
        let orch = orchestrator();
        orch.set_query("x");
        orch.execute_search().await;
        assert_eq!(orch.go_to_page(3).await, SearchOutcome::Completed);
        assert_eq!(orch.backend().calls.borrow()[1].page, 3);
        assert_eq!(orch.location().current_params().get("page"), Some("3"));
        assert_eq!(doc_ids(&orch.state())[0], "p3-0");
    }

    #[tokio::test(start_paused = true)]
    async fn changing_query_returns_to_first_page() {
        let orch = orchestrator();
        orch.set_query("x");
        orch.go_to_page(4).await;
        orch.set_query("y");
        assert_eq!(orch.state().current_page, 1);
        orch.set_query("y");
        assert_eq!(orch.state().current_page, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_keeps_previous_results_and_allows_retry() {
        let orch = orchestrator();
        orch.set_query("x");
        orch.execute_search().await;
        let before = orch.state();

        orch.backend().failing.set(true);
        orch.set_query("y");
        assert_eq!(orch.execute_search().await, SearchOutcome::Failed);

        let state = orch.state();
        assert_eq!(state.documents, before.documents);
        assert_eq!(state.total_documents, before.total_documents);
        assert_eq!(state.error.as_deref(), Some("Erro na busca: 503 Service Unavailable"));
        assert!(!state.is_searching);
        assert_eq!(state.phase(), SearchPhase::Errored);
        assert_eq!(orch.location().pushes.borrow().len(), 1);

        orch.backend().failing.set(false);
        assert_eq!(orch.execute_search().await, SearchOutcome::Completed);
        assert_eq!(orch.state().error, None);
        assert_eq!(orch.backend().call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_is_discarded() {
        let orch = orchestrator();
        orch.backend().delay_ms_by_page.borrow_mut().insert(1, 300);
        orch.backend().delay_ms_by_page.borrow_mut().insert(2, 50);
        orch.set_query("x");

        let (first, second) = join(orch.execute_search(), orch.go_to_page(2)).await;

        assert_eq!(first, SearchOutcome::Superseded);
        assert_eq!(second, SearchOutcome::Completed);
        assert_eq!(orch.backend().call_count(), 2);
        let state = orch.state();
        assert_eq!(doc_ids(&state)[0], "p2-0");
        assert_eq!(state.current_page, 2);
        assert!(!state.is_searching);
        assert_eq!(state.search_history.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_coalesces_a_burst() {
        let orch = orchestrator();
        let start = tokio::time::Instant::now();
        orch.set_query("a");

        let (a, b, c) = join3(
            orch.debounced_search(),
            async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                orch.set_query("ab");
                orch.debounced_search().await
            },
            async {
                tokio::time::sleep(Duration::from_millis(400)).await;
                orch.set_query("abc");
                orch.debounced_search().await
            },
        )
        .await;

        assert_eq!((a, b, c), (SearchOutcome::Superseded, SearchOutcome::Superseded, SearchOutcome::Completed));
        assert_eq!(orch.backend().call_count(), 1);
        assert_eq!(orch.backend().calls.borrow()[0].query, "abc");
        assert!(start.elapsed() >= Duration::from_millis(900));
    }

    #[tokio::test(start_paused = true)]
    async fn submit_cancels_pending_debounce() {
        let orch = orchestrator();
        orch.set_query("a");
        let (debounced, submitted) = join(orch.debounced_search(), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            orch.submit_search().await
        })
        .await;
        assert_eq!(debounced, SearchOutcome::Superseded);
        assert_eq!(submitted, SearchOutcome::Completed);
        assert_eq!(orch.backend().call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn restore_runs_once_and_does_not_push_same_url() {
        let orch = orchestrator_at(&[
            ("q", "x"),
            ("nome_contribuinte", "Maria"),
            ("dt_protocolo", r#"{"from":"2024-01-01","to":"2024-06-30"}"#),
            ("page", "3"),
        ]);

        assert_eq!(orch.restore_from_url().await, SearchOutcome::Completed);
        assert_eq!(orch.restore_from_url().await, SearchOutcome::AlreadyRestored);

        let request = orch.backend().calls.borrow()[0].clone();
        assert_eq!(request.query, "x");
        assert_eq!(request.page, 3);
        assert_eq!(request.filters.len(), 2);
        assert_eq!(request.filters[1].field, "dt_protocolo_tdt");
        assert_eq!(orch.backend().call_count(), 1);
        assert!(orch.location().pushes.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn restore_skips_bad_filters() {
        let orch = orchestrator_at(&[("dt_juntada", "{broken"), ("old_filter", "1"), ("nr_processo", "123")]);
        assert_eq!(orch.restore_from_url().await, SearchOutcome::Completed);
        let filters = orch.state().applied_filters;
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].id, "nr_processo");
    }

    #[tokio::test(start_paused = true)]
    async fn restore_with_empty_url_does_not_search() {
        let orch = orchestrator_at(&[("page", "2"), ("utm_source", "mail")]);
        assert_eq!(orch.restore_from_url().await, SearchOutcome::NothingRestored);
        assert_eq!(orch.backend().call_count(), 0);
        assert!(!orch.state().has_searched);
    }

    #[tokio::test(start_paused = true)]
    async fn history_stays_bounded() {
        let orch = orchestrator();
        for i in 0..12 {
            orch.set_query(format!("q{i}"));
            orch.execute_search().await;
        }
        let history = orch.state().search_history;
        assert_eq!(history.len(), 10);
        assert_eq!(history[0].query, "q11");
    }

    #[tokio::test(start_paused = true)]
    async fn incomplete_filters_are_refused() {
        let orch = orchestrator();
        assert!(!orch.add_filter(AppliedFilter::new("dt_juntada", FilterValue::DateRange(DateRange::default())).unwrap()));
        assert!(orch.add_filter(AppliedFilter::new("nr_processo", FilterValue::Text("1".into())).unwrap()));
        assert!(!orch.add_filter(AppliedFilter::new("nr_processo", FilterValue::Text("1".into())).unwrap()));
        assert_eq!(orch.state().applied_filters.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_discards_in_flight_response() {
        let orch = orchestrator();
        orch.set_query("x");
        let (outcome, ()) = join(orch.execute_search(), async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            orch.reset();
        })
        .await;
        assert_eq!(outcome, SearchOutcome::Superseded);
        let state = orch.state();
        assert!(state.documents.is_empty());
        assert!(!state.is_searching);
        assert_eq!(state.query, "");
    }

    #[tokio::test(start_paused = true)]
    async fn listeners_see_every_transition() {
        let orch = orchestrator();
        let phases = Rc::new(RefCell::new(Vec::new()));
        let seen = phases.clone();
        orch.subscribe(move |state| seen.borrow_mut().push(state.phase()));

        orch.set_query("x");
        orch.execute_search().await;

        let phases = phases.borrow();
        assert!(phases.contains(&SearchPhase::Searching));
        assert_eq!(phases.last(), Some(&SearchPhase::Idle));
    }
}
