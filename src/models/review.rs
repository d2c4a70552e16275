use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user review of a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: i64,
    /// Id of the reviewed movie
    pub movie: i64,
    pub reviewer_name: String,
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_featured: bool,
}
