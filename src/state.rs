//! View configuration and mutable view state.
//!
//! `ColumnConfig` fixes which columns can be sorted and filtered; it is set
//! once at construction. `ViewState` holds everything the user can change
//! and is only mutated through the reducer.

use crate::error::ViewError;
use crate::filter::FilterValues;
use crate::paginate::PaginationConfig;
use crate::sort::SortDirectives;
use serde::{Deserialize, Serialize};

/// Sortable and filterable column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub sortable: Vec<String>,
    pub filterable: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            sortable: vec!["name".to_string()],
            filterable: vec!["region".to_string()],
        }
    }
}

impl ColumnConfig {
    pub fn new<S, F>(sortable: S, filterable: F) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        ColumnConfig {
            sortable: sortable.into_iter().map(Into::into).collect(),
            filterable: filterable.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_sortable(&self, column: &str) -> bool {
        self.sortable.iter().any(|c| c == column)
    }

    pub fn is_filterable(&self, column: &str) -> bool {
        self.filterable.iter().any(|c| c == column)
    }
}

/// Full configuration of a table view.
///
/// # Examples
///
/// ```
/// use tableview::ViewConfig;
///
/// let config = ViewConfig::from_json(r#"{
///     "columns": {"sortable": ["name", "population"], "filterable": ["region"]},
///     "pagination": {"page_size": 10}
/// }"#).unwrap();
///
/// assert!(config.columns.is_sortable("population"));
/// assert_eq!(config.pagination.page_size, 10);
/// assert_eq!(config.pagination.max_page_numbers, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub columns: ColumnConfig,
    pub pagination: PaginationConfig,
}

impl ViewConfig {
    pub fn new(columns: ColumnConfig, pagination: PaginationConfig) -> Result<Self, ViewError> {
        pagination.validate()?;
        Ok(ViewConfig { columns, pagination })
    }

    /// Parses and validates a JSON configuration; missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, ViewError> {
        let config: ViewConfig = serde_json::from_str(json)
            .map_err(|e| ViewError::InvalidConfig(e.to_string()))?;
        config.pagination.validate()?;
        Ok(config)
    }
}

/// The user-controlled part of a table view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub(crate) sorting: SortDirectives,
    pub(crate) filters: FilterValues,
    pub(crate) current_page: usize,
    pub(crate) loading: bool,
}

impl ViewState {
    /// Initial state: every directive Unset, no filters, first page, not loading.
    pub fn new(columns: &ColumnConfig) -> Self {
        ViewState {
            sorting: SortDirectives::new(columns.sortable.iter().cloned()),
            filters: FilterValues::new(columns.filterable.iter().cloned()),
            current_page: 1,
            loading: false,
        }
    }

    pub fn sorting(&self) -> &SortDirectives {
        &self.sorting
    }

    pub fn filters(&self) -> &FilterValues {
        &self.filters
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
