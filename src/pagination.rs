//! Page windows over ordered collections.
//!
//! Pages are 1-indexed. Asking for a page outside the available range is not
//! an error: the window is empty but still reports the real total.

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: i64, page_size: u64) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
        }
    }

    /// Number of items to skip, or `None` when `page < 1` addresses nothing.
    pub fn offset(&self) -> Option<u64> {
        if self.page < 1 {
            return None;
        }
        (self.page as u64 - 1).checked_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.page_size).unwrap_or(i64::MAX)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total,
        }
    }

    pub fn has_next(&self) -> bool {
        let seen = (self.page.max(0) as u128) * self.page_size as u128;
        seen < self.total as u128
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn next_num(&self) -> Option<i64> {
        self.has_next().then(|| (self.page + 1).max(1))
    }

    pub fn prev_num(&self) -> Option<i64> {
        self.has_prev().then(|| self.page - 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
        }
    }
}

/// Cuts the requested window out of an already ordered collection.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let window = match request.offset() {
        Some(offset) if offset < total => items
            .into_iter()
            .skip(offset as usize)
            .take(request.page_size as usize)
            .collect(),
        _ => Vec::new(),
    };
    Page::new(window, request, total)
}

/// `?page=` query parameter. Anything that is not an integer falls back to 1.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }

    pub fn request(&self, page_size: u64) -> PageRequest {
        PageRequest::new(self.page(), page_size)
    }
}
