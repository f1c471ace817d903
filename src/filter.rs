//! Per-column substring filtering.
//!
//! Filter strings are normalized (trimmed and lower-cased) before they are
//! stored. Normalized input of one or two characters is treated as still
//! being typed and never reaches the stored filter, so the engine only ever
//! sees strings that are empty or at least [`MIN_FILTER_LEN`] characters long.

use crate::record::{Dataset, Record};
use serde::Serialize;

/// Minimum normalized length at which a filter becomes active
pub const MIN_FILTER_LEN: usize = 3;

/// Trims and lower-cases raw filter input.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Classification of raw filter input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterInput {
    /// Empty after normalization: clears the column's filter
    Clear,
    /// Too short to apply yet; the stored filter must not change
    Pending,
    /// Long enough to apply
    Active(String),
}

impl FilterInput {
    pub fn classify(raw: &str) -> Self {
        let normalized = normalize(raw);
        match normalized.chars().count() {
            0 => FilterInput::Clear,
            n if n < MIN_FILTER_LEN => FilterInput::Pending,
            _ => FilterInput::Active(normalized),
        }
    }
}

/// Per-column normalized filter strings, in registration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FilterValues {
    entries: Vec<(String, Option<String>)>,
}

impl FilterValues {
    /// Creates an empty filter slot for each column.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValues {
            entries: columns.into_iter().map(|c| (c.into(), None)).collect(),
        }
    }

    /// Returns the stored filter of a column; `None` when unset or unknown.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == column)
    }

    /// Stores a normalized value; an empty string clears the filter.
    /// Returns false for unknown columns.
    pub fn set(&mut self, column: &str, value: Option<String>) -> bool {
        match self.entries.iter_mut().find(|(name, _)| name == column) {
            Some((_, slot)) => {
                *slot = value.filter(|v| !v.is_empty());
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Columns with a non-empty filter.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (name.as_str(), v)))
            .filter(|(_, v)| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

fn matches(record: &Record, column: &str, needle: &str) -> bool {
    record
        .get(column)
        .filter_text()
        .map(|text| text.contains(needle))
        .unwrap_or(false)
}

/// Keeps the records matching every active filter.
///
/// # Examples
///
/// ```
/// use tableview::{filter, Dataset, FilterValues, Record};
///
/// let dataset = Dataset::new(vec![
///     Record::new().with("region", "Europe"),
///     Record::new().with("region", "Asia"),
/// ]);
///
/// let mut filters = FilterValues::new(["region"]);
/// filters.set("region", Some("eur".to_string()));
///
/// let kept = filter(&dataset, &filters);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept.records()[0].get("region").as_string(), Some("Europe"));
/// ```
pub fn filter(dataset: &Dataset, filters: &FilterValues) -> Dataset {
    let active: Vec<(&str, &str)> = filters.active().collect();

    dataset
        .iter()
        .filter(|record| active.iter().all(|(column, needle)| matches(record, column, needle)))
        .cloned()
        .collect()
}
