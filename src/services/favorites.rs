use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    db::{KeyValueSlot, StorageKey},
    error::AppResult,
    models::FavoriteMovie,
};

/// Locally persisted list of favorite movies
///
/// The store owns the list; every mutation writes the whole list back to the
/// slot before returning. Observers get a fresh snapshot through [`subscribe`]
/// after each mutation.
///
/// [`subscribe`]: FavoritesStore::subscribe
pub struct FavoritesStore {
    slot: Arc<dyn KeyValueSlot>,
    favorites: Vec<FavoriteMovie>,
    notify: watch::Sender<Vec<FavoriteMovie>>,
}

impl FavoritesStore {
    /// Loads the persisted favorites
    ///
    /// A missing value is an empty list. An unreadable or corrupt value is logged
    /// and also treated as empty; it will be replaced on the next mutation.
    pub async fn load(slot: Arc<dyn KeyValueSlot>) -> Self {
        let favorites = match slot.get(&StorageKey::Favorites).await {
            Ok(Some(json)) => Self::decode(&json),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    backend = slot.name(),
                    "Failed to read favorites, starting empty"
                );
                Vec::new()
            }
        };

        tracing::info!(
            count = favorites.len(),
            backend = slot.name(),
            "Favorites loaded"
        );

        let (notify, _) = watch::channel(favorites.clone());
        Self {
            slot,
            favorites,
            notify,
        }
    }

    fn decode(json: &str) -> Vec<FavoriteMovie> {
        let parsed: Vec<FavoriteMovie> = match serde_json::from_str(json) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Error parsing stored favorites, starting empty");
                return Vec::new();
            }
        };

        // Hand-edited or legacy data may repeat an id; keep the first entry
        let mut favorites: Vec<FavoriteMovie> = Vec::with_capacity(parsed.len());
        for movie in parsed {
            if favorites.iter().any(|f| f.id == movie.id) {
                tracing::warn!(movie_id = movie.id, "Dropping duplicate stored favorite");
                continue;
            }
            favorites.push(movie);
        }
        favorites
    }

    /// Current favorites in insertion order
    pub fn list(&self) -> &[FavoriteMovie] {
        &self.favorites
    }

    pub fn is_favorite(&self, movie_id: i64) -> bool {
        self.favorites.iter().any(|movie| movie.id == movie_id)
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Receiver that sees the list after every successful mutation
    pub fn subscribe(&self) -> watch::Receiver<Vec<FavoriteMovie>> {
        self.notify.subscribe()
    }

    /// Appends `movie` unless its id is already a favorite
    pub async fn add(&mut self, movie: FavoriteMovie) -> AppResult<()> {
        if self.is_favorite(movie.id) {
            return Ok(());
        }

        let movie_id = movie.id;
        let mut next = self.favorites.clone();
        next.push(movie);
        self.commit(next).await?;

        tracing::info!(movie_id, count = self.favorites.len(), "Added favorite");
        Ok(())
    }

    /// Removes the favorite with `movie_id`, if any
    pub async fn remove(&mut self, movie_id: i64) -> AppResult<()> {
        if !self.is_favorite(movie_id) {
            return Ok(());
        }

        let next: Vec<FavoriteMovie> = self
            .favorites
            .iter()
            .filter(|movie| movie.id != movie_id)
            .cloned()
            .collect();
        self.commit(next).await?;

        tracing::info!(movie_id, count = self.favorites.len(), "Removed favorite");
        Ok(())
    }

    /// Removes `movie` if it is a favorite, adds it otherwise
    ///
    /// Returns whether the movie is a favorite afterwards.
    pub async fn toggle(&mut self, movie: FavoriteMovie) -> AppResult<bool> {
        if self.is_favorite(movie.id) {
            self.remove(movie.id).await?;
            Ok(false)
        } else {
            self.add(movie).await?;
            Ok(true)
        }
    }

    /// Persists `next` and only then makes it the current list
    async fn commit(&mut self, next: Vec<FavoriteMovie>) -> AppResult<()> {
        let json = serde_json::to_string(&next)?;
        if let Err(e) = self.slot.set(&StorageKey::Favorites, json).await {
            tracing::error!(error = %e, backend = self.slot.name(), "Failed to persist favorites");
            return Err(e);
        }

        self.favorites = next;
        self.notify.send_replace(self.favorites.clone());
        Ok(())
    }
}
