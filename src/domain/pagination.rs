use serde::Serialize;

use crate::domain::validation::ValidationErrors;
use crate::utils::errors::ApiError;

/// Every paginated listing in the clinic uses the same page size.
pub const PAGE_SIZE: u64 = 5;

/// A 1-based page of a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    /// Validates a 1-based page number coming from a query string.
    pub fn new(page: i64) -> Result<Self, ApiError> {
        if page < 1 {
            return Err(ApiError::Validation(ValidationErrors::single(
                "page",
                "min",
                "page must be at least 1",
            )));
        }
        let page = page as u64;
        // Offsets are handed to the store as a signed 64-bit skip.
        let fits = (page - 1)
            .checked_mul(PAGE_SIZE)
            .is_some_and(|offset| offset <= i64::MAX as u64);
        if !fits {
            return Err(ApiError::Validation(ValidationErrors::single(
                "page",
                "max",
                "page is out of range",
            )));
        }
        Ok(PageRequest { page, size: PAGE_SIZE })
    }

    pub fn first() -> Self {
        PageRequest { page: 1, size: PAGE_SIZE }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of records preceding this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Page {
            items,
            current_page: request.page(),
            page_size: request.size(),
            total_items,
            total_pages: total_pages(total_items, request.size()),
        }
    }

    /// Slices an already ordered, complete result set.
    pub fn from_sorted(all: Vec<T>, request: PageRequest) -> Self {
        let total_items = all.len() as u64;
        let items = all
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size() as usize)
            .collect();
        Page::new(items, request, total_items)
    }

    /// True when this page carries no content, either because nothing matched
    /// or because the requested page lies past the last one.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

pub fn total_pages(total_items: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}
