use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_explorer::{
    config::Config,
    db::open_slot,
    models::genre_from_location,
    services::{FavoritesStore, FetchState, HttpCatalogClient, MovieBrowser, MovieListing},
};

/// Loads the first page of the movie listing and logs it
///
/// An optional argument is the location the listing was opened from, e.g.
/// `/movies?genre=Drama`, and seeds the genre filter.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_explorer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let location = std::env::args().nth(1).unwrap_or_default();
    let genre = genre_from_location(&location);

    let catalog = Arc::new(HttpCatalogClient::from_config(&config)?);
    let slot = open_slot(&config)?;
    let favorites = FavoritesStore::load(slot).await;

    let browser = MovieBrowser::new(
        Arc::new(MovieListing::new(catalog)),
        config.filter_debounce(),
        config.page_size,
        genre.as_deref(),
    );

    let mut updates = browser.subscribe();
    let state = updates
        .wait_for(FetchState::is_settled)
        .await
        .context("Listing closed before the first page arrived")?
        .clone();

    match state {
        FetchState::Success(page) if page.is_empty() => {
            tracing::info!(filtered = browser.has_active_filters(), "No movies found");
        }
        FetchState::Success(page) => {
            for movie in &page.items {
                tracing::info!(
                    id = movie.id,
                    title = %movie.title,
                    year = movie.release_year,
                    rating = ?movie.rating_label(),
                    favorite = favorites.is_favorite(movie.id),
                    "Movie"
                );
            }
            tracing::info!(
                page = browser.page(),
                pages = browser.page_count(),
                total = page.total_count,
                "Listing loaded"
            );
        }
        FetchState::Error(message) => anyhow::bail!(message),
        FetchState::Idle | FetchState::Loading => {}
    }

    Ok(())
}
