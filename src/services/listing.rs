use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::{
    error::AppResult,
    models::{FilterCriteria, ListQuery, Movie, NameSearch, PageResult, Person},
    services::providers::CatalogApi,
    services::request_id::{make_span_with_request_id, RequestId},
};

/// Source of listing pages for one kind of criteria
#[async_trait::async_trait]
pub trait PageLoader<C, T>: Send + Sync {
    /// Load page `page` (1-based) of the listing narrowed by `criteria`
    async fn load_page(&self, criteria: &C, page: u32) -> AppResult<PageResult<T>>;

    /// Listing name for logging
    fn listing(&self) -> &'static str;
}

/// Movie listing backed by `GET /movies/`
pub struct MovieListing {
    api: Arc<dyn CatalogApi>,
}

impl MovieListing {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl PageLoader<FilterCriteria, Movie> for MovieListing {
    async fn load_page(&self, criteria: &FilterCriteria, page: u32) -> AppResult<PageResult<Movie>> {
        self.api.list_movies(criteria, page).await
    }

    fn listing(&self) -> &'static str {
        "movies"
    }
}

/// Actor listing backed by `GET /actors/`
pub struct ActorListing {
    api: Arc<dyn CatalogApi>,
}

impl ActorListing {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl PageLoader<NameSearch, Person> for ActorListing {
    async fn load_page(&self, search: &NameSearch, page: u32) -> AppResult<PageResult<Person>> {
        self.api.list_actors(search, page).await
    }

    fn listing(&self) -> &'static str {
        "actors"
    }
}

/// Director listing backed by `GET /directors/`
pub struct DirectorListing {
    api: Arc<dyn CatalogApi>,
}

impl DirectorListing {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl PageLoader<NameSearch, Person> for DirectorListing {
    async fn load_page(&self, search: &NameSearch, page: u32) -> AppResult<PageResult<Person>> {
        self.api.list_directors(search, page).await
    }

    fn listing(&self) -> &'static str {
        "directors"
    }
}

/// What the view layer renders for a listing
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet
    Idle,
    Loading,
    Success(PageResult<T>),
    /// Human-readable message; details are only in the logs
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// The loaded page, if the latest request succeeded
    pub fn page(&self) -> Option<&PageResult<T>> {
        match self {
            FetchState::Success(page) => Some(page),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Success or Error, i.e. the latest request has been answered
    pub fn is_settled(&self) -> bool {
        matches!(self, FetchState::Success(_) | FetchState::Error(_))
    }
}

/// Result of one [`ListFetcher::fetch`] call, as seen by its caller
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// This request was still the latest; its page is now the visible state
    Applied(PageResult<T>),
    /// This request was still the latest and failed
    Failed(String),
    /// A newer request was issued before this one was answered
    Superseded,
}

/// Issues listing requests and publishes the state of the most recent one
///
/// Every request takes a sequence number. A response only reaches the published
/// state if no newer request was issued in the meantime, so the listing always
/// reflects the request issued last, whatever order responses arrive in.
/// Superseded requests are not aborted; their responses are ignored.
pub struct ListFetcher<C, T> {
    loader: Arc<dyn PageLoader<C, T>>,
    latest: Arc<AtomicU64>,
    state: Arc<watch::Sender<FetchState<T>>>,
}

impl<C, T> Clone for ListFetcher<C, T> {
    fn clone(&self) -> Self {
        Self {
            loader: self.loader.clone(),
            latest: self.latest.clone(),
            state: self.state.clone(),
        }
    }
}

impl<C, T> ListFetcher<C, T>
where
    C: Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new(loader: Arc<dyn PageLoader<C, T>>) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        Self {
            loader,
            latest: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
        }
    }

    /// Receiver for state transitions of this listing
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    /// Request `query` and wait for its answer
    pub async fn fetch(&self, query: ListQuery<C>) -> FetchOutcome<T> {
        let sequence = self.begin();
        self.load(sequence, query).await
    }

    /// Spawn the request on the runtime, like a UI event would
    ///
    /// The request counts as issued when this returns, not when the task runs.
    pub fn trigger(&self, query: ListQuery<C>) -> JoinHandle<FetchOutcome<T>> {
        let sequence = self.begin();
        let fetcher = self.clone();
        tokio::spawn(async move { fetcher.load(sequence, query).await })
    }

    /// Take the next sequence number and publish Loading
    ///
    /// Both happen under the state lock, so an older request can never overwrite
    /// a newer Loading.
    fn begin(&self) -> u64 {
        let mut sequence = 0;
        self.state.send_modify(|state| {
            sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *state = FetchState::Loading;
        });
        sequence
    }

    async fn load(&self, sequence: u64, query: ListQuery<C>) -> FetchOutcome<T> {
        let request_id = RequestId::new();
        let span =
            make_span_with_request_id(&request_id, self.loader.listing(), query.page, sequence);

        async move {
            tracing::debug!("Listing requested");
            let result = self.loader.load_page(&query.criteria, query.page).await;
            self.settle(sequence, result)
        }
        .instrument(span)
        .await
    }

    fn settle(&self, sequence: u64, result: AppResult<PageResult<T>>) -> FetchOutcome<T> {
        let outcome = match result {
            Ok(page) => FetchOutcome::Applied(page),
            Err(e) => {
                tracing::warn!(error = %e, "Listing fetch failed");
                FetchOutcome::Failed(e.user_message())
            }
        };

        let applied = self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != sequence {
                return false;
            }
            *state = match &outcome {
                FetchOutcome::Applied(page) => FetchState::Success(page.clone()),
                FetchOutcome::Failed(message) => FetchState::Error(message.clone()),
                FetchOutcome::Superseded => return false,
            };
            true
        });

        if !applied {
            tracing::debug!("Discarding response of superseded request");
            return FetchOutcome::Superseded;
        }

        if let FetchOutcome::Applied(page) = &outcome {
            tracing::info!(
                results = page.items.len(),
                total = page.total_count,
                "Listing updated"
            );
        }
        outcome
    }
}
