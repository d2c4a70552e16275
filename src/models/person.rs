use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Movie;

/// An actor or a director; the catalog uses the same record for both
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub movies_count: u32,
}

pub type Actor = Person;
pub type Director = Person;

/// Person record from `GET /actors/{id}/` or `GET /directors/{id}/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonDetail {
    #[serde(flatten)]
    pub person: Person,
    #[serde(default)]
    pub movies: Vec<Movie>,
}
