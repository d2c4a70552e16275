//! Catalog data provider abstraction
//!
//! The browser never talks HTTP directly; listings and detail views go through
//! [`CatalogApi`], which keeps the REST client swappable for tests and for other
//! catalog backends.

use crate::{
    error::AppResult,
    models::{
        FilterCriteria, Genre, Movie, MovieDetail, NameSearch, PageResult, Person, PersonDetail,
        Review,
    },
};

pub mod catalog;

pub use catalog::HttpCatalogClient;

/// Trait for movie catalog backends
///
/// Paginated endpoints take a 1-based page number, which is passed through as-is;
/// asking for a page past the end is the backend's call to answer.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    /// One page of movies matching `criteria`
    async fn list_movies(&self, criteria: &FilterCriteria, page: u32)
        -> AppResult<PageResult<Movie>>;

    /// Full record for a single movie
    async fn get_movie(&self, id: i64) -> AppResult<MovieDetail>;

    /// One page of movies tagged with the named genre
    async fn movies_by_genre(&self, name: &str, page: u32) -> AppResult<PageResult<Movie>>;

    /// One page of movies by the named director
    async fn movies_by_director(&self, name: &str, page: u32) -> AppResult<PageResult<Movie>>;

    /// Highest rated movies, unpaginated
    async fn top_rated_movies(&self) -> AppResult<Vec<Movie>>;

    async fn list_actors(&self, search: &NameSearch, page: u32) -> AppResult<PageResult<Person>>;

    async fn get_actor(&self, id: i64) -> AppResult<PersonDetail>;

    async fn list_directors(&self, search: &NameSearch, page: u32)
        -> AppResult<PageResult<Person>>;

    async fn get_director(&self, id: i64) -> AppResult<PersonDetail>;

    /// First page of genres; the catalog keeps the genre list short
    async fn list_genres(&self) -> AppResult<PageResult<Genre>>;

    async fn get_genre(&self, id: i64) -> AppResult<Genre>;

    /// Reviews, optionally narrowed to one movie
    async fn list_reviews(&self, movie_id: Option<i64>, page: u32)
        -> AppResult<PageResult<Review>>;

    async fn featured_reviews(&self) -> AppResult<PageResult<Review>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
