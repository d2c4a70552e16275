//! Shared test utilities and fixtures.

#![allow(dead_code)]

pub mod mock_catalog;

use serde_json::{json, Value};

/// A movie record the way the catalog lists it
pub fn movie_json(id: i64, title: &str, year: i32) -> Value {
    json!({
        "id": id,
        "title": title,
        "release_year": year,
        "director_name": "Akira Kurosawa",
        "poster_url": format!("https://img.example/{}.jpg", id),
        "average_rating": 8.2,
        "duration": 143,
        "genres": ["Drama"],
        "review_count": 4
    })
}

/// A paginated envelope around `results`
pub fn page_json(count: u64, results: Vec<Value>, next: bool, previous: bool) -> Value {
    json!({
        "count": count,
        "next": next.then(|| "http://catalog/api/movies/?page=next"),
        "previous": previous.then(|| "http://catalog/api/movies/?page=prev"),
        "results": results
    })
}
