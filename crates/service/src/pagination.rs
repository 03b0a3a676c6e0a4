//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and the `Page` result wrapper used
//! by owner listings.

use serde::Serialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane defaults and return `(page_index, per_page)`
    pub fn normalize(self) -> (usize, usize) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as usize, per_page as usize)
    }

    /// Cut one page out of an already ordered result set.
    pub fn slice<T>(self, items: Vec<T>) -> Vec<T> {
        let (idx, per_page) = self.normalize();
        items.into_iter().skip(idx.saturating_mul(per_page)).take(per_page).collect()
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// One page of results plus the total across all pages.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize, pagination: Pagination) -> Self {
        let (idx, per_page) = pagination.normalize();
        Self { items, total, page: idx as u32 + 1, per_page: per_page as u32 }
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 100);
    }

    #[test]
    fn slice_takes_requested_window() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(Pagination { page: 2, per_page: 3 }.slice(items.clone()), vec![4, 5, 6]);
        assert_eq!(Pagination { page: 3, per_page: 3 }.slice(items.clone()), vec![7]);
        assert!(Pagination { page: 9, per_page: 3 }.slice(items).is_empty());
    }
}
