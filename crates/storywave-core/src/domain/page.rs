//! Offset pagination primitives.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A request for one 0-based page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    /// Build a request from untrusted integers.
    ///
    /// Rejects a negative page index, a size below one, or a pair whose
    /// row offset does not fit in an `i64`.
    pub fn of(page: i64, size: i64) -> Result<Self, DomainError> {
        if page < 0 {
            return Err(DomainError::invalid_argument(
                "page index must not be less than zero",
            ));
        }
        if size < 1 {
            return Err(DomainError::invalid_argument(
                "page size must not be less than one",
            ));
        }
        if page.checked_mul(size).is_none() {
            return Err(DomainError::invalid_argument("page offset is out of range"));
        }
        Ok(Self {
            page: page as u64,
            size: size as u64,
        })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        self.page * self.size
    }
}

/// One page of results plus totals for the whole listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 0-based index of this page.
    pub page: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page(),
            size: request.size(),
            total_items,
            total_pages: total_items.div_ceil(request.size()),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
