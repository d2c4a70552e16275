use serde::{Deserialize, Serialize};

use super::{Person, Review};

/// A movie as listed by the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub release_year: i32,
    #[serde(default)]
    pub director_name: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    /// Running time in minutes
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub review_count: u32,
}

impl Movie {
    /// Running time as "2h 28m", or `None` when the catalog has no duration
    pub fn duration_label(&self) -> Option<String> {
        self.duration.map(|minutes| match (minutes / 60, minutes % 60) {
            (0, m) => format!("{}m", m),
            (h, 0) => format!("{}h", h),
            (h, m) => format!("{}h {}m", h, m),
        })
    }

    /// Average rating with one decimal, e.g. "8.4"
    pub fn rating_label(&self) -> Option<String> {
        self.average_rating.map(|rating| format!("{:.1}", rating))
    }
}

/// Full movie record from `GET /movies/{id}/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub actors: Vec<Person>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Movie genre
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Summary of a movie the user marked as favorite
///
/// This is the exact shape persisted by the favorites store, so field names are
/// part of the on-disk format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    pub release_year: i32,
    pub director_name: String,
}

impl From<&Movie> for FavoriteMovie {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: movie.poster_url.clone(),
            release_year: movie.release_year,
            director_name: movie.director_name.clone(),
        }
    }
}
