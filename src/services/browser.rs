use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::{
    models::{page_count, FilterCriteria, FilterPatch, ListQuery, Movie},
    services::{
        debounce::Debouncer,
        filters::FilterController,
        listing::{FetchState, ListFetcher, PageLoader},
    },
};

/// Movie listing session: filter edits in, listing state out
///
/// Filter edits update the controller at once (so the inputs reflect them) but
/// only reach the fetcher once they settle for the debounce interval. Page
/// changes skip the debounce.
///
/// Must be created from within a Tokio runtime.
pub struct MovieBrowser {
    filters: FilterController,
    debouncer: Debouncer<(u64, ListQuery<FilterCriteria>)>,
    dispatch: Arc<Dispatch>,
    page_size: u32,
    forwarder: JoinHandle<()>,
}

/// Single entry point to the fetcher for direct and debounced queries
///
/// Every filter edit and every direct request bumps the generation. A debounced
/// query is only issued if its generation is still current, checked under the
/// same lock that direct requests take, so a value the debounce timer released
/// before a page change can never be issued after it.
struct Dispatch {
    fetcher: ListFetcher<FilterCriteria, Movie>,
    generation: Mutex<u64>,
}

impl Dispatch {
    fn new(fetcher: ListFetcher<FilterCriteria, Movie>) -> Self {
        Self {
            fetcher,
            generation: Mutex::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, u64> {
        self.generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Invalidate every outstanding debounced query; returns the new generation
    fn advance(&self) -> u64 {
        let mut generation = self.lock();
        *generation += 1;
        *generation
    }

    /// Issue `query` now, superseding any debounced one still in flight
    fn issue_now(&self, query: ListQuery<FilterCriteria>) {
        let mut generation = self.lock();
        *generation += 1;
        self.fetcher.trigger(query);
    }

    /// Issue a settled query unless something newer happened since it was pushed
    fn issue_settled(&self, generation: u64, query: ListQuery<FilterCriteria>) -> bool {
        let current = self.lock();
        if *current != generation {
            return false;
        }
        self.fetcher.trigger(query);
        true
    }
}

impl MovieBrowser {
    /// Starts a session and immediately requests page 1
    ///
    /// `seed_genre` comes from the link that opened the listing, if any.
    pub fn new(
        loader: Arc<dyn PageLoader<FilterCriteria, Movie>>,
        debounce: Duration,
        page_size: u32,
        seed_genre: Option<&str>,
    ) -> Self {
        let filters = FilterController::seeded(seed_genre);
        let dispatch = Arc::new(Dispatch::new(ListFetcher::new(loader)));
        let (debouncer, settled) = Debouncer::channel(debounce);
        let forwarder = tokio::spawn(Self::forward_settled(settled, dispatch.clone()));

        tracing::info!(
            genre = ?filters.criteria().genre,
            debounce = ?debounce,
            "Movie browser started"
        );
        dispatch.issue_now(filters.query());

        Self {
            filters,
            debouncer,
            dispatch,
            page_size,
            forwarder,
        }
    }

    /// Hands settled filter queries to the fetcher until the debouncer goes away
    async fn forward_settled(
        mut settled: mpsc::UnboundedReceiver<(u64, ListQuery<FilterCriteria>)>,
        dispatch: Arc<Dispatch>,
    ) {
        while let Some((generation, query)) = settled.recv().await {
            if dispatch.issue_settled(generation, query) {
                tracing::debug!(generation, "Filter settled");
            } else {
                tracing::debug!(generation, "Dropping settled filter overtaken by a newer request");
            }
        }
    }

    /// Apply a filter edit; the listing follows once edits pause
    pub fn edit_filter(&mut self, patch: FilterPatch) -> FilterCriteria {
        let criteria = self.filters.set_filter(patch);
        self.push_settling();
        criteria
    }

    /// Drop every constraint; goes through the same debounce as edits
    pub fn clear_filters(&mut self) -> FilterCriteria {
        let criteria = self.filters.clear();
        self.push_settling();
        criteria
    }

    fn push_settling(&mut self) {
        let generation = self.dispatch.advance();
        self.debouncer.push((generation, self.filters.query()));
    }

    /// Show `page` of the current criteria right away
    ///
    /// A filter edit still waiting out the debounce, or already released by it
    /// but not yet issued, is folded into this request.
    pub fn go_to_page(&mut self, page: u32) {
        self.debouncer.cancel();
        self.filters.set_page(page);
        self.dispatch.issue_now(self.filters.query());
    }

    /// Re-issue the current query, e.g. after an error
    pub fn refresh(&mut self) {
        self.debouncer.cancel();
        self.dispatch.issue_now(self.filters.query());
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.filters.criteria()
    }

    pub fn page(&self) -> u32 {
        self.filters.page()
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.has_active_filters()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<Movie>> {
        self.dispatch.fetcher.subscribe()
    }

    pub fn state(&self) -> FetchState<Movie> {
        self.dispatch.fetcher.state()
    }

    /// Page count of the latest loaded page, zero until one has loaded
    pub fn page_count(&self) -> u64 {
        self.dispatch
            .fetcher
            .state()
            .page()
            .map(|page| page_count(page.total_count, self.page_size))
            .unwrap_or(0)
    }
}

impl Drop for MovieBrowser {
    fn drop(&mut self) {
        self.debouncer.cancel();
        self.forwarder.abort();
    }
}
