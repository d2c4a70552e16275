pub mod browser;
pub mod debounce;
pub mod favorites;
pub mod filters;
pub mod listing;
pub mod providers;
pub mod request_id;

pub use browser::MovieBrowser;
pub use debounce::Debouncer;
pub use favorites::FavoritesStore;
pub use filters::{FilterController, SearchController};
pub use listing::{
    ActorListing, DirectorListing, FetchOutcome, FetchState, ListFetcher, MovieListing, PageLoader,
};
pub use providers::{CatalogApi, HttpCatalogClient};
pub use request_id::RequestId;
