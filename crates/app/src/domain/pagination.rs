//! Pagination

/// Default page size.
pub const DEFAULT_LIMIT: u32 = 12;

/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 100;

/// A validated page request: page `>= 1`, limit in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validates a page request, returning `None` when either value is out of range.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Option<Self> {
        (page >= 1 && (1..=MAX_LIMIT).contains(&limit)).then_some(Self { page, limit })
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the figures needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(u64::from(request.limit));

        Self {
            items,
            page: request.page,
            limit: request.limit,
            total_pages,
            total_items,
            has_next: u64::from(request.page) < total_pages,
            has_prev: request.page > 1,
        }
    }
}
