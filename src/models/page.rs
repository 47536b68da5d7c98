//! Pagination types shared by every paged listing

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters accepted by the paged listing endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct PageFilter {
    /// Free-text term matched case-insensitively across the listing's
    /// searchable columns
    pub filter: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<i64>,
    /// Page size (default 20)
    pub per_page: Option<i64>,
}

impl PageFilter {
    pub fn page_number(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> i64 {
        self.per_page.unwrap_or(20).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page_number() - 1) * self.page_size()
    }
}

/// One page of results together with the overall totals
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub items: Vec<T>,
    pub total: i64,
    pub total_pages: i64,
    pub page: i64,
    pub per_page: i64,
}

impl<T> Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(items: Vec<T>, total: i64, filter: &PageFilter) -> Self {
        let per_page = filter.page_size();
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            items,
            total,
            total_pages,
            page: filter.page_number(),
            per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, ToSchema)]
    struct Row {
        id: i32,
    }

    fn filter(page: Option<i64>, per_page: Option<i64>) -> PageFilter {
        PageFilter {
            filter: None,
            page,
            per_page,
        }
    }

    #[test]
    fn defaults_apply_when_params_missing() {
        let f = filter(None, None);
        assert_eq!(f.page_number(), 1);
        assert_eq!(f.page_size(), 20);
        assert_eq!(f.offset(), 0);
    }

    #[test]
    fn offset_advances_with_page() {
        let f = filter(Some(3), Some(10));
        assert_eq!(f.offset(), 20);
    }

    #[test]
    fn nonsense_params_clamp_to_first_page() {
        let f = filter(Some(0), Some(-5));
        assert_eq!(f.page_number(), 1);
        assert_eq!(f.page_size(), 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Page<Row> = Page::new(vec![], 21, &filter(Some(1), Some(10)));
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Page<Row> = Page::new(vec![], 0, &filter(None, None));
        assert_eq!(page.total_pages, 0);
    }
}
