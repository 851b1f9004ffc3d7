//! Offset-based pagination over ordered task collections.

use super::TaskDomainError;
use serde::Serialize;

/// Page size used when a caller does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Validated pagination parameters.
///
/// `page` is zero-based; `size` is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: usize,
    size: usize,
}

impl PageRequest {
    /// Creates pagination parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ZeroPageSize`] when `size` is zero.
    pub const fn new(page: usize, size: usize) -> Result<Self, TaskDomainError> {
        if size == 0 {
            return Err(TaskDomainError::ZeroPageSize);
        }
        Ok(Self { page, size })
    }

    /// Parses raw query parameters, defaulting missing values to page `0` and
    /// [`DEFAULT_PAGE_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPageNumber`] or
    /// [`TaskDomainError::InvalidPageSize`] when a value is not a
    /// non-negative integer, and [`TaskDomainError::ZeroPageSize`] for a
    /// size of zero.
    pub fn from_query(page: Option<&str>, size: Option<&str>) -> Result<Self, TaskDomainError> {
        let parsed_page = match page {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| TaskDomainError::InvalidPageNumber(raw.to_owned()))?,
            None => 0,
        };
        let parsed_size = match size {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| TaskDomainError::InvalidPageSize(raw.to_owned()))?,
            None => DEFAULT_PAGE_SIZE,
        };
        Self::new(parsed_page, parsed_size)
    }

    /// Returns the zero-based page number.
    #[must_use]
    pub const fn page(self) -> usize {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(self) -> usize {
        self.size
    }

    /// Returns the index of the first element on this page.
    #[must_use]
    pub const fn offset(self) -> usize {
        self.page.saturating_mul(self.size)
    }

    /// Slices an already ordered collection into this page.
    #[must_use]
    pub fn paginate<T>(self, ordered: Vec<T>) -> PagedResult<T> {
        let total_elements = ordered.len();
        let total_pages = total_elements.div_ceil(self.size);
        let content = ordered
            .into_iter()
            .skip(self.offset())
            .take(self.size)
            .collect();

        PagedResult {
            content,
            page: self.page,
            size: self.size,
            total_elements,
            total_pages,
            has_next: self.page.saturating_add(1) < total_pages,
            has_previous: self.page > 0,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of an ordered collection plus its position within the whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    /// Elements on this page, at most `size` of them.
    pub content: Vec<T>,
    /// Echoed zero-based page number.
    pub page: usize,
    /// Echoed page size.
    pub size: usize,
    /// Number of elements across all pages.
    pub total_elements: usize,
    /// `ceil(total_elements / size)`; zero for an empty collection.
    pub total_pages: usize,
    /// Whether a later page holds elements.
    pub has_next: bool,
    /// Whether this is not the first page.
    pub has_previous: bool,
}

impl<T> PagedResult<T> {
    /// Returns `true` when the page holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Maps page content while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}
