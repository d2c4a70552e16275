use serde::{Deserialize, Serialize};

/// Paginated envelope returned by the catalog's list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// One page of a listing, as exposed to the view layer
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PageResult<T> {
    /// True when the listing matched nothing; drives the "no results" view
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of pages for this listing at the given page size
    pub fn page_count(&self, page_size: u32) -> u64 {
        page_count(self.total_count, page_size)
    }
}

impl<T> From<Paginated<T>> for PageResult<T> {
    fn from(page: Paginated<T>) -> Self {
        Self {
            items: page.results,
            total_count: page.count,
            has_next: page.next.is_some(),
            has_previous: page.previous.is_some(),
        }
    }
}

/// `ceil(total_count / page_size)`; a zero page size yields zero pages
pub fn page_count(total_count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(u64::from(page_size))
}
