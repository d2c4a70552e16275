use crate::models::{FilterCriteria, FilterPatch, ListQuery, NameSearch};

/// Current movie filter and page
///
/// Any change to the criteria sends the listing back to page 1; the next query
/// taken from the controller reflects that.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterController {
    criteria: FilterCriteria,
    page: u32,
}

impl Default for FilterController {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterController {
    pub fn new() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page: 1,
        }
    }

    /// Controller whose criteria start out with a genre from the current link
    pub fn seeded(genre: Option<&str>) -> Self {
        Self {
            criteria: FilterCriteria::with_genre(genre),
            page: 1,
        }
    }

    /// Merge `patch` into the criteria, reset to page 1 and return the result
    pub fn set_filter(&mut self, patch: FilterPatch) -> FilterCriteria {
        self.criteria.apply(patch);
        self.page = 1;

        tracing::debug!(criteria = ?self.criteria, "Filter updated");
        self.criteria.clone()
    }

    /// Drop every constraint and reset to page 1
    pub fn clear(&mut self) -> FilterCriteria {
        self.criteria = FilterCriteria::default();
        self.page = 1;
        self.criteria.clone()
    }

    /// Jump to `page`; range checking is left to the caller
    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_active_filters(&self) -> bool {
        !self.criteria.is_empty()
    }

    /// Request for the current criteria and page
    pub fn query(&self) -> ListQuery<FilterCriteria> {
        ListQuery::new(self.criteria.clone(), self.page)
    }
}

/// Name search and page for the actor and director listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchController {
    search: NameSearch,
    page: u32,
}

impl Default for SearchController {
    fn default() -> Self {
        Self {
            search: NameSearch::default(),
            page: 1,
        }
    }
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the search term and reset to page 1
    pub fn search(&mut self, raw: &str) -> NameSearch {
        self.search = NameSearch::new(raw);
        self.page = 1;
        self.search.clone()
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn query(&self) -> ListQuery<NameSearch> {
        ListQuery::new(self.search.clone(), self.page)
    }
}
