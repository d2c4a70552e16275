use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Constraints narrowing the movie listing
///
/// Every field is optional and `None` means "no constraint". Values only get in
/// here through [`FilterCriteria::apply`], which normalizes empty input away, so
/// a text field never holds an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year_gte: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year_lte: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_gte: Option<f64>,
}

/// Field of [`FilterCriteria`], named as in the catalog's query string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Title,
    Director,
    Actor,
    Genre,
    ReleaseYearGte,
    ReleaseYearLte,
    RatingGte,
}

impl FilterField {
    pub const ALL: [FilterField; 7] = [
        FilterField::Title,
        FilterField::Director,
        FilterField::Actor,
        FilterField::Genre,
        FilterField::ReleaseYearGte,
        FilterField::ReleaseYearLte,
        FilterField::RatingGte,
    ];

    /// Query parameter name understood by the catalog API
    pub fn as_param(&self) -> &'static str {
        match self {
            FilterField::Title => "title",
            FilterField::Director => "director",
            FilterField::Actor => "actor",
            FilterField::Genre => "genre",
            FilterField::ReleaseYearGte => "release_year_gte",
            FilterField::ReleaseYearLte => "release_year_lte",
            FilterField::RatingGte => "rating_gte",
        }
    }
}

impl Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

/// A partial update to [`FilterCriteria`]
///
/// Holds raw user input per field. A field missing from the patch is left alone;
/// a field present with empty (or unparsable) input clears that constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    edits: Vec<(FilterField, String)>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record raw input for `field`; a later edit of the same field wins
    pub fn set(mut self, field: FilterField, raw: impl Into<String>) -> Self {
        self.edits.retain(|(f, _)| *f != field);
        self.edits.push((field, raw.into()));
        self
    }

    /// Explicitly remove the constraint on `field`
    pub fn clear(self, field: FilterField) -> Self {
        self.set(field, String::new())
    }

    pub fn title(self, raw: impl Into<String>) -> Self {
        self.set(FilterField::Title, raw)
    }

    pub fn director(self, raw: impl Into<String>) -> Self {
        self.set(FilterField::Director, raw)
    }

    pub fn actor(self, raw: impl Into<String>) -> Self {
        self.set(FilterField::Actor, raw)
    }

    pub fn genre(self, raw: impl Into<String>) -> Self {
        self.set(FilterField::Genre, raw)
    }

    pub fn release_year_gte(self, raw: impl Into<String>) -> Self {
        self.set(FilterField::ReleaseYearGte, raw)
    }

    pub fn release_year_lte(self, raw: impl Into<String>) -> Self {
        self.set(FilterField::ReleaseYearLte, raw)
    }

    pub fn rating_gte(self, raw: impl Into<String>) -> Self {
        self.set(FilterField::RatingGte, raw)
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = FilterField> + '_ {
        self.edits.iter().map(|(field, _)| *field)
    }
}

fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn normalize_year(field: FilterField, raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<i32>() {
        // Zero reads as "no year", same as an empty input
        Ok(0) => None,
        Ok(year) => Some(year),
        Err(_) => {
            tracing::debug!(field = %field, input = %raw, "Ignoring non-numeric year filter");
            None
        }
    }
}

fn normalize_rating(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(rating) if rating == 0.0 => None,
        Ok(rating) if rating.is_finite() => Some(rating),
        _ => {
            tracing::debug!(input = %raw, "Ignoring malformed rating filter");
            None
        }
    }
}

impl FilterCriteria {
    /// Merge a patch into these criteria and return the normalized result
    pub fn apply(&mut self, patch: FilterPatch) -> &Self {
        for (field, raw) in patch.edits {
            match field {
                FilterField::Title => self.title = normalize_text(&raw),
                FilterField::Director => self.director = normalize_text(&raw),
                FilterField::Actor => self.actor = normalize_text(&raw),
                FilterField::Genre => self.genre = normalize_text(&raw),
                FilterField::ReleaseYearGte => {
                    self.release_year_gte = normalize_year(field, &raw)
                }
                FilterField::ReleaseYearLte => {
                    self.release_year_lte = normalize_year(field, &raw)
                }
                FilterField::RatingGte => self.rating_gte = normalize_rating(&raw),
            }
        }
        self
    }

    /// Criteria constrained only by genre, as seeded from a `?genre=` link
    pub fn with_genre(genre: Option<&str>) -> Self {
        Self {
            genre: genre.and_then(normalize_text),
            ..Self::default()
        }
    }

    /// Whether `field` currently constrains the listing
    pub fn is_set(&self, field: FilterField) -> bool {
        match field {
            FilterField::Title => self.title.is_some(),
            FilterField::Director => self.director.is_some(),
            FilterField::Actor => self.actor.is_some(),
            FilterField::Genre => self.genre.is_some(),
            FilterField::ReleaseYearGte => self.release_year_gte.is_some(),
            FilterField::ReleaseYearLte => self.release_year_lte.is_some(),
            FilterField::RatingGte => self.rating_gte.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !FilterField::ALL.iter().any(|field| self.is_set(*field))
    }

    /// Query parameters for `GET /movies/`, in a stable order, constraints only
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let text = [
            (FilterField::Title, &self.title),
            (FilterField::Director, &self.director),
            (FilterField::Actor, &self.actor),
            (FilterField::Genre, &self.genre),
        ];

        let mut params: Vec<(&'static str, String)> = text
            .into_iter()
            .filter_map(|(field, value)| value.as_ref().map(|v| (field.as_param(), v.clone())))
            .collect();

        if let Some(year) = self.release_year_gte {
            params.push((FilterField::ReleaseYearGte.as_param(), year.to_string()));
        }
        if let Some(year) = self.release_year_lte {
            params.push((FilterField::ReleaseYearLte.as_param(), year.to_string()));
        }
        if let Some(rating) = self.rating_gte {
            params.push((FilterField::RatingGte.as_param(), rating.to_string()));
        }

        params
    }
}

/// Name search used by the actor and director listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NameSearch {
    pub fn new(raw: &str) -> Self {
        Self {
            name: normalize_text(raw),
        }
    }

    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        self.name
            .as_ref()
            .map(|name| vec![("name", name.clone())])
            .unwrap_or_default()
    }
}

/// One logical listing request: criteria plus 1-based page number
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<C> {
    pub criteria: C,
    pub page: u32,
}

impl<C> ListQuery<C> {
    pub fn new(criteria: C, page: u32) -> Self {
        Self { criteria, page }
    }
}

/// Read the `genre` query parameter out of a location such as `/movies?genre=Drama`
///
/// Accepts absolute URLs, paths with a query string, or a bare query string.
pub fn genre_from_location(location: &str) -> Option<String> {
    let query = match location.split_once('?') {
        Some((_, query)) => query,
        None if location.contains('=') => location,
        None => return None,
    };
    let query = query.split('#').next().unwrap_or_default();

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "genre")
        .and_then(|(_, value)| normalize_text(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_clears_field() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(FilterPatch::new().director("Nolan"));
        assert_eq!(criteria.director.as_deref(), Some("Nolan"));

        criteria.apply(FilterPatch::new().director(""));
        assert_eq!(criteria.director, None);
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_whitespace_only_is_no_constraint() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(FilterPatch::new().title("   "));
        assert_eq!(criteria.title, None);
    }

    #[test]
    fn test_text_is_trimmed() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(FilterPatch::new().actor("  Tilda Swinton "));
        assert_eq!(criteria.actor.as_deref(), Some("Tilda Swinton"));
    }

    #[test]
    fn test_patch_leaves_untouched_fields_alone() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(FilterPatch::new().genre("Drama").release_year_gte("1990"));
        criteria.apply(FilterPatch::new().title("heat"));

        assert_eq!(criteria.genre.as_deref(), Some("Drama"));
        assert_eq!(criteria.release_year_gte, Some(1990));
        assert_eq!(criteria.title.as_deref(), Some("heat"));
    }

    #[test]
    fn test_non_numeric_year_is_no_constraint() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(FilterPatch::new().release_year_gte("1990"));
        criteria.apply(FilterPatch::new().release_year_gte("nineteen ninety"));
        assert_eq!(criteria.release_year_gte, None);
    }

    #[test]
    fn test_malformed_rating_is_no_constraint() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(FilterPatch::new().rating_gte("7.5"));
        assert_eq!(criteria.rating_gte, Some(7.5));

        criteria.apply(FilterPatch::new().rating_gte("NaN"));
        assert_eq!(criteria.rating_gte, None);

        criteria.apply(FilterPatch::new().rating_gte("high"));
        assert_eq!(criteria.rating_gte, None);
    }

    #[test]
    fn test_zero_year_or_rating_clears_constraint() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(
            FilterPatch::new()
                .release_year_lte("2001")
                .rating_gte("6"),
        );
        criteria.apply(FilterPatch::new().release_year_lte("0").rating_gte("0.0"));

        assert_eq!(criteria.release_year_lte, None);
        assert_eq!(criteria.rating_gte, None);
        assert!(criteria.to_query_params().is_empty());
    }

    #[test]
    fn test_later_edit_of_same_field_wins() {
        let patch = FilterPatch::new().title("a").title("b");
        assert_eq!(patch.fields().count(), 1);

        let mut criteria = FilterCriteria::default();
        criteria.apply(patch);
        assert_eq!(criteria.title.as_deref(), Some("b"));
    }

    #[test]
    fn test_explicit_clear() {
        let mut criteria = FilterCriteria::with_genre(Some("Horror"));
        criteria.apply(FilterPatch::new().clear(FilterField::Genre));
        assert_eq!(criteria.genre, None);
    }

    #[test]
    fn test_serialized_criteria_omit_absent_fields() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(FilterPatch::new().title("").director("Varda"));
        let value = serde_json::to_value(&criteria).unwrap();
        assert_eq!(value, serde_json::json!({ "director": "Varda" }));
    }

    #[test]
    fn test_query_params_only_contain_constraints() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(
            FilterPatch::new()
                .genre("Sci-Fi")
                .release_year_lte("2000")
                .rating_gte("8"),
        );

        assert_eq!(
            criteria.to_query_params(),
            vec![
                ("genre", "Sci-Fi".to_string()),
                ("release_year_lte", "2000".to_string()),
                ("rating_gte", "8".to_string()),
            ]
        );
    }

    #[test]
    fn test_name_search_normalizes_empty() {
        assert_eq!(NameSearch::new("").name, None);
        assert!(NameSearch::new(" ").to_query_params().is_empty());
        assert_eq!(
            NameSearch::new("Kurosawa").to_query_params(),
            vec![("name", "Kurosawa".to_string())]
        );
    }

    #[test]
    fn test_genre_from_location() {
        assert_eq!(
            genre_from_location("/movies?genre=Drama").as_deref(),
            Some("Drama")
        );
        assert_eq!(
            genre_from_location("http://localhost:5173/movies?page=2&genre=Science%20Fiction")
                .as_deref(),
            Some("Science Fiction")
        );
        assert_eq!(genre_from_location("genre=Comedy").as_deref(), Some("Comedy"));
        assert_eq!(genre_from_location("/movies?genre=Noir#top").as_deref(), Some("Noir"));
    }

    #[test]
    fn test_genre_from_location_absent_or_empty() {
        assert_eq!(genre_from_location("/movies"), None);
        assert_eq!(genre_from_location("/movies?page=2"), None);
        assert_eq!(genre_from_location("/movies?genre="), None);
        assert_eq!(genre_from_location(""), None);
    }
}
