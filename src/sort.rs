/// TableView Sort Engine
///
/// Every sortable column carries a tri-state directive. Sorting applies one
/// stable sort per column with a non-Unset directive, in the iteration order of
/// the directive map, so the column applied last decides the final order and
/// earlier columns only break its ties.

use crate::record::{Dataset, Record};
use crate::value::ColumnValue;
use serde::Serialize;
use std::cmp::Ordering;

/// Sort state of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirective {
    /// No sorting on this column
    #[default]
    Unset,
    /// Ascending order (smallest first)
    Ascending,
    /// Descending order (largest first)
    Descending,
}

impl SortDirective {
    /// Next state in the toggle cycle Unset → Ascending → Descending → Unset.
    pub fn next(self) -> Self {
        match self {
            SortDirective::Unset => SortDirective::Ascending,
            SortDirective::Ascending => SortDirective::Descending,
            SortDirective::Descending => SortDirective::Unset,
        }
    }

    pub fn is_set(self) -> bool {
        self != SortDirective::Unset
    }

    /// Header glyph for the directive.
    pub fn icon(self) -> &'static str {
        match self {
            SortDirective::Unset => "↕",
            SortDirective::Ascending => "↑",
            SortDirective::Descending => "↓",
        }
    }
}

/// Per-column sort directives, iterated in the order columns were registered.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct SortDirectives {
    entries: Vec<(String, SortDirective)>,
}

impl SortDirectives {
    /// Creates an Unset directive for each column.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SortDirectives {
            entries: columns
                .into_iter()
                .map(|c| (c.into(), SortDirective::Unset))
                .collect(),
        }
    }

    /// Returns the directive of a column, or None if the column is not registered.
    pub fn get(&self, column: &str) -> Option<SortDirective> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, d)| *d)
    }

    /// Sets a registered column's directive. Returns false for unknown columns.
    pub fn set(&mut self, column: &str, directive: SortDirective) -> bool {
        match self.entries.iter_mut().find(|(name, _)| name == column) {
            Some((_, slot)) => {
                *slot = directive;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SortDirective)> {
        self.entries.iter().map(|(name, d)| (name.as_str(), *d))
    }

    /// Columns with a non-Unset directive, in application order.
    pub fn active(&self) -> impl Iterator<Item = (&str, SortDirective)> {
        self.iter().filter(|(_, d)| d.is_set())
    }
}

/// Compare two column values under a directive.
///
/// Null values sort last in both directions.
fn compare_values(a: &ColumnValue, b: &ColumnValue, directive: SortDirective) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let base_cmp = a.compare(b);

    match directive {
        SortDirective::Ascending => base_cmp,
        SortDirective::Descending => base_cmp.reverse(),
        SortDirective::Unset => Ordering::Equal,
    }
}

/// Returns a reordered copy of `dataset`; the input is never modified.
///
/// # Examples
///
/// ```
/// use tableview::{sort, Dataset, Record, SortDirective, SortDirectives};
///
/// let dataset = Dataset::new(vec![
///     Record::new().with("name", "Chile"),
///     Record::new().with("name", "Angola"),
///     Record::new().with("name", "Benin"),
/// ]);
///
/// let mut directives = SortDirectives::new(["name"]);
/// directives.set("name", SortDirective::Descending);
///
/// let sorted = sort(&dataset, &directives);
/// assert_eq!(sorted.records()[0].get("name").as_string(), Some("Chile"));
/// assert_eq!(sorted.records()[2].get("name").as_string(), Some("Angola"));
/// ```
pub fn sort(dataset: &Dataset, directives: &SortDirectives) -> Dataset {
    let mut rows: Vec<Record> = dataset.records().to_vec();

    for (column, directive) in directives.active() {
        // slice::sort_by is stable, so equal keys keep the order left by earlier passes
        rows.sort_by(|a, b| compare_values(a.get(column), b.get(column), directive));
    }

    Dataset::new(rows)
}
