//! Catalog REST API client
//!
//! Talks to the catalog's JSON endpoints (`/movies/`, `/actors/`, `/directors/`,
//! `/genres/`, `/reviews/`). List endpoints answer with a paginated envelope
//! (`count`, `next`, `previous`, `results`) that is turned into a [`PageResult`].

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        FilterCriteria, Genre, Movie, MovieDetail, NameSearch, PageResult, Paginated, Person,
        PersonDetail, Review,
    },
    services::providers::CatalogApi,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client as HttpClient, StatusCode,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

type QueryParams = Vec<(&'static str, String)>;

#[derive(Clone)]
pub struct HttpCatalogClient {
    http_client: HttpClient,
    api_url: String,
}

impl HttpCatalogClient {
    /// Creates a client for the catalog rooted at `api_url`
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(config.api_base_url.clone(), config.request_timeout())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn page_param(params: &mut QueryParams, page: u32) {
        params.push(("page", page.to_string()));
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &QueryParams) -> AppResult<T> {
        let url = self.url(path);

        let response = self.http_client.get(&url).query(params).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(path = %path, bytes = response_text.len(), "Catalog response received");

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                response = %response_text,
                "Failed to deserialize catalog response"
            );
            AppError::ExternalApi(format!("Failed to parse catalog response: {}", e))
        })
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> AppResult<PageResult<T>> {
        let raw: Paginated<T> = self.get_json(path, params).await?;
        let page = PageResult::from(raw);

        tracing::info!(
            path = %path,
            results = page.items.len(),
            total = page.total_count,
            provider = "catalog",
            "Page fetched"
        );

        Ok(page)
    }

    /// Fetch a single record, naming it in the not-found error
    async fn get_one<T: DeserializeOwned>(&self, kind: &str, path: &str, id: i64) -> AppResult<T> {
        match self.get_json(path, &Vec::new()).await {
            Err(AppError::NotFound(_)) => Err(AppError::NotFound(format!("{} {}", kind, id))),
            other => other,
        }
    }
}

#[async_trait::async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_movies(
        &self,
        criteria: &FilterCriteria,
        page: u32,
    ) -> AppResult<PageResult<Movie>> {
        let mut params = criteria.to_query_params();
        Self::page_param(&mut params, page);
        self.get_page("/movies/", &params).await
    }

    async fn get_movie(&self, id: i64) -> AppResult<MovieDetail> {
        self.get_one("Movie", &format!("/movies/{}/", id), id).await
    }

    async fn movies_by_genre(&self, name: &str, page: u32) -> AppResult<PageResult<Movie>> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidInput("Genre name cannot be empty".to_string()));
        }
        let mut params = vec![("name", name.to_string())];
        Self::page_param(&mut params, page);
        self.get_page("/movies/by_genre/", &params).await
    }

    async fn movies_by_director(&self, name: &str, page: u32) -> AppResult<PageResult<Movie>> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Director name cannot be empty".to_string(),
            ));
        }
        let mut params = vec![("name", name.to_string())];
        Self::page_param(&mut params, page);
        self.get_page("/movies/by_director/", &params).await
    }

    async fn top_rated_movies(&self) -> AppResult<Vec<Movie>> {
        self.get_json("/movies/top_rated/", &Vec::new()).await
    }

    async fn list_actors(&self, search: &NameSearch, page: u32) -> AppResult<PageResult<Person>> {
        let mut params = search.to_query_params();
        Self::page_param(&mut params, page);
        self.get_page("/actors/", &params).await
    }

    async fn get_actor(&self, id: i64) -> AppResult<PersonDetail> {
        self.get_one("Actor", &format!("/actors/{}/", id), id).await
    }

    async fn list_directors(
        &self,
        search: &NameSearch,
        page: u32,
    ) -> AppResult<PageResult<Person>> {
        let mut params = search.to_query_params();
        Self::page_param(&mut params, page);
        self.get_page("/directors/", &params).await
    }

    async fn get_director(&self, id: i64) -> AppResult<PersonDetail> {
        self.get_one("Director", &format!("/directors/{}/", id), id).await
    }

    async fn list_genres(&self) -> AppResult<PageResult<Genre>> {
        self.get_page("/genres/", &Vec::new()).await
    }

    async fn get_genre(&self, id: i64) -> AppResult<Genre> {
        self.get_one("Genre", &format!("/genres/{}/", id), id).await
    }

    async fn list_reviews(
        &self,
        movie_id: Option<i64>,
        page: u32,
    ) -> AppResult<PageResult<Review>> {
        let mut params = QueryParams::new();
        if let Some(movie_id) = movie_id {
            params.push(("movie_id", movie_id.to_string()));
        }
        Self::page_param(&mut params, page);
        self.get_page("/reviews/", &params).await
    }

    async fn featured_reviews(&self) -> AppResult<PageResult<Review>> {
        self.get_page("/reviews/featured/", &Vec::new()).await
    }

    fn name(&self) -> &'static str {
        "catalog"
    }
}
