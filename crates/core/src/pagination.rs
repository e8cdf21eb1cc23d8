//! Page-number pagination shared by the live backends and the fixture set.

use serde::{Deserialize, Serialize};

/// Number of records per page when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on records per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Pages below 1 clamp to 1; the size clamps to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// One page of results plus the total number of matching records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub count: i64,
}

impl<T> Paginated<T> {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            count: 0,
        }
    }
}

/// Total number of pages for `count` records. Never less than 1.
pub fn total_pages(count: i64, page_size: i64) -> i64 {
    let page_size = page_size.max(1);
    ((count.max(0) + page_size - 1) / page_size).max(1)
}

/// Slice one page out of an in-memory list.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Paginated<T> {
    let data = items
        .iter()
        .skip(request.offset() as usize)
        .take(request.limit() as usize)
        .cloned()
        .collect();

    Paginated {
        data,
        count: items.len() as i64,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
