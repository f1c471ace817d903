/// TableView Pagination Engine
///
/// Pages are 1-indexed. Given the rows that survived sorting and filtering,
/// pagination picks the visible slice for the current page and the sliding
/// window of page numbers to offer as controls.

use crate::error::ViewError;
use crate::record::{Dataset, Record};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 4;
pub const DEFAULT_MAX_PAGE_NUMBERS: usize = 5;

/// Page size and page-number window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: usize,
    pub max_page_numbers: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        PaginationConfig {
            page_size: DEFAULT_PAGE_SIZE,
            max_page_numbers: DEFAULT_MAX_PAGE_NUMBERS,
        }
    }
}

impl PaginationConfig {
    pub fn new(page_size: usize, max_page_numbers: usize) -> Result<Self, ViewError> {
        let config = PaginationConfig {
            page_size,
            max_page_numbers,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ViewError> {
        if self.page_size == 0 {
            return Err(ViewError::InvalidConfig("page_size must be at least 1".to_string()));
        }
        if self.max_page_numbers == 0 {
            return Err(ViewError::InvalidConfig(
                "max_page_numbers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of pages needed for `total_rows`.
    pub fn total_pages(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.page_size.max(1))
    }
}

/// What the renderer needs to draw the pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    /// Consecutive page numbers to expose as controls
    pub page_numbers: Vec<usize>,
    /// True when the window stops short of the last page
    pub truncated: bool,
}

impl PageDescriptor {
    pub fn is_first(&self) -> bool {
        self.current_page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }

    /// True when the current page lies past the last page.
    pub fn is_out_of_range(&self) -> bool {
        self.current_page > self.total_pages
    }
}

/// Sliding window of page numbers starting two pages before `current_page`.
pub fn page_window(current_page: usize, total_pages: usize, max_page_numbers: usize) -> (Vec<usize>, bool) {
    let start = current_page.saturating_sub(2).max(1);
    let end = total_pages.min(start.saturating_add(max_page_numbers.max(1) - 1));

    let numbers: Vec<usize> = (start..=end).collect();
    (numbers, end < total_pages)
}

/// Splits out the visible page of `dataset`.
///
/// Out-of-range pages yield no rows rather than an error.
///
/// # Examples
///
/// ```
/// use tableview::{paginate, Dataset, PaginationConfig, Record};
///
/// let dataset: Dataset = (1..=10i64).map(|i| Record::new().with("id", i)).collect();
/// let (rows, page) = paginate(&dataset, 3, &PaginationConfig::default());
///
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].get("id").as_i64(), Some(9));
/// assert_eq!(page.total_pages, 3);
/// assert_eq!(page.page_numbers, vec![1, 2, 3]);
/// assert!(!page.truncated);
/// ```
pub fn paginate(dataset: &Dataset, current_page: usize, config: &PaginationConfig) -> (Vec<Record>, PageDescriptor) {
    let page_size = config.page_size.max(1);
    let total_rows = dataset.len();
    let total_pages = config.total_pages(total_rows);

    let start = current_page.saturating_sub(1).saturating_mul(page_size);
    let rows = if start < total_rows {
        let end = start.saturating_add(page_size).min(total_rows);
        dataset.records()[start..end].to_vec()
    } else {
        Vec::new()
    };

    let (page_numbers, truncated) = page_window(current_page, total_pages, config.max_page_numbers);

    let descriptor = PageDescriptor {
        current_page,
        total_pages,
        total_rows,
        page_numbers,
        truncated,
    };

    (rows, descriptor)
}

/// The page before `current`, never below 1.
pub fn previous_page(current: usize) -> usize {
    current.saturating_sub(1).max(1)
}

/// The page after `current`, never past the last page (and never below 1).
pub fn next_page(current: usize, total_pages: usize) -> usize {
    current.saturating_add(1).min(total_pages).max(1)
}

/// Direct page selection; bounds are the caller's concern.
pub fn go_to_page(page: usize) -> usize {
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: i64) -> Dataset {
        (0..n).map(|i| Record::new().with("id", i)).collect()
    }

    fn ids(rows: &[Record]) -> Vec<i64> {
        rows.iter().filter_map(|r| r.get("id").as_i64()).collect()
    }

    #[test]
    fn test_first_page_starts_at_zero() {
        let (visible, page) = paginate(&rows(10), 1, &PaginationConfig::default());
        assert_eq!(ids(&visible), vec![0, 1, 2, 3]);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_rows, 10);
        assert!(page.is_first());
    }

    #[test]
    fn test_last_partial_page() {
        let (visible, page) = paginate(&rows(10), 3, &PaginationConfig::default());
        assert_eq!(ids(&visible), vec![8, 9]);
        assert!(page.is_last());
    }

    #[test]
    fn test_empty_dataset() {
        let (visible, page) = paginate(&Dataset::empty(), 1, &PaginationConfig::default());
        assert!(visible.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(page.page_numbers.is_empty());
        assert!(!page.truncated);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let (visible, page) = paginate(&rows(10), 7, &PaginationConfig::default());
        assert!(visible.is_empty());
        assert!(page.is_out_of_range());
        assert!(page.page_numbers.is_empty());
    }

    #[test]
    fn test_page_counts() {
        for total in 0..40i64 {
            for size in 1..7usize {
                let config = PaginationConfig::new(size, 5).unwrap();
                let data = rows(total);
                let expected = (total as usize + size - 1) / size;
                for current in 1..=expected.max(1) + 1 {
                    let (visible, page) = paginate(&data, current, &config);
                    assert_eq!(page.total_pages, expected);
                    assert!(visible.len() <= size);
                }
            }
        }
    }

    #[test]
    fn test_window_slides_with_current_page() {
        let config = PaginationConfig::default();
        let data = rows(60); // 15 pages

        let (_, page) = paginate(&data, 1, &config);
        assert_eq!(page.page_numbers, vec![1, 2, 3, 4, 5]);
        assert!(page.truncated);

        let (_, page) = paginate(&data, 7, &config);
        assert_eq!(page.page_numbers, vec![5, 6, 7, 8, 9]);
        assert!(page.truncated);

        let (_, page) = paginate(&data, 14, &config);
        assert_eq!(page.page_numbers, vec![12, 13, 14, 15]);
        assert!(!page.truncated);
    }

    #[test]
    fn test_window_reaching_last_page_is_not_truncated() {
        let (numbers, truncated) = page_window(3, 5, 5);
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert!(!truncated);
    }

    #[test]
    fn test_window_at_extreme_values() {
        let (numbers, truncated) = page_window(usize::MAX, 3, 5);
        assert!(numbers.is_empty());
        assert!(!truncated);

        let (numbers, truncated) = page_window(1, 3, usize::MAX);
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(!truncated);

        let config = PaginationConfig::new(4, usize::MAX).unwrap();
        let (visible, page) = paginate(&rows(10), usize::MAX, &config);
        assert!(visible.is_empty());
        assert_eq!(page.total_pages, 3);
        assert!(!page.truncated);
    }

    #[test]
    fn test_navigation_helpers() {
        assert_eq!(previous_page(1), 1);
        assert_eq!(previous_page(4), 3);
        assert_eq!(next_page(2, 3), 3);
        assert_eq!(next_page(3, 3), 3);
        assert_eq!(next_page(1, 0), 1);
        assert_eq!(go_to_page(42), 42);
    }

    #[test]
    fn test_invalid_config() {
        assert!(PaginationConfig::new(0, 5).is_err());
        assert!(PaginationConfig::new(4, 0).is_err());
        assert_eq!(PaginationConfig::new(4, 5).unwrap(), PaginationConfig::default());
    }
}
