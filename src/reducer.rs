//! The view-state reducer.
//!
//! [`ViewReducer`] owns the base dataset, the configuration and the
//! [`ViewState`]. User intents are the only way to change the state; after
//! every accepted intent the derived view is rebuilt by running
//! sort → filter → paginate over the base dataset, always in that order.
//!
//! ```
//! use tableview::{Dataset, Record, SortDirective, ViewConfig, ViewReducer};
//!
//! let dataset: Dataset = ["Peru", "Chad", "Oman", "Fiji", "Cuba"]
//!     .into_iter()
//!     .map(|name| Record::new().with("name", name).with("region", "somewhere"))
//!     .collect();
//!
//! let mut reducer = ViewReducer::with_dataset(ViewConfig::default(), dataset);
//! assert_eq!(reducer.toggle_sort("name").unwrap(), SortDirective::Ascending);
//!
//! let first: Vec<_> = reducer.view().rows.iter().map(|r| r.get("name").to_string()).collect();
//! assert_eq!(first, vec!["Chad", "Cuba", "Fiji", "Oman"]);
//! assert_eq!(reducer.view().pagination.total_pages, 2);
//! ```

use crate::error::ViewError;
use crate::filter::{filter, FilterInput};
use crate::paginate::{self, paginate, PageDescriptor};
use crate::record::{Dataset, Record};
use crate::sort::{sort, SortDirective};
use crate::state::{ColumnConfig, ViewConfig, ViewState};
use log::{debug, warn};
use serde::Serialize;

/// What the renderer should show in place of (or alongside) the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    /// A fetch is in flight and there is nothing to show yet
    Loading,
    /// No rows survived (or none were ever loaded)
    NoData,
    /// Rows exist, but the current page lies past the last one
    EmptyPage,
    Rows,
}

/// The recomputed output handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView {
    /// Column names of the base dataset
    pub columns: Vec<String>,
    /// Records on the current page
    pub rows: Vec<Record>,
    pub pagination: PageDescriptor,
    pub loading: bool,
}

impl DerivedView {
    pub fn status(&self) -> ViewStatus {
        if !self.rows.is_empty() {
            ViewStatus::Rows
        } else if self.loading {
            ViewStatus::Loading
        } else if self.pagination.total_rows == 0 {
            ViewStatus::NoData
        } else {
            ViewStatus::EmptyPage
        }
    }
}

/// Entry points through which user input reaches the view state.
pub trait IntentSink {
    /// Advances the column's sort directive and returns the new one.
    fn toggle_sort(&mut self, column: &str) -> Result<SortDirective, ViewError>;

    /// Returns true if the input was applied, false if it was too short to apply.
    fn set_filter(&mut self, column: &str, text: &str) -> Result<bool, ViewError>;

    /// Returns the new current page.
    fn previous_page(&mut self) -> usize;

    /// Returns the new current page.
    fn next_page(&mut self) -> usize;

    fn go_to_page(&mut self, page: usize) -> Result<(), ViewError>;
}

/// A single user intent, for hosts that queue or transport them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ToggleSort { column: String },
    SetFilter { column: String, text: String },
    PreviousPage,
    NextPage,
    GoToPage { page: usize },
}

impl Intent {
    pub fn apply<S: IntentSink + ?Sized>(&self, sink: &mut S) -> Result<(), ViewError> {
        match self {
            Intent::ToggleSort { column } => sink.toggle_sort(column).map(|_| ()),
            Intent::SetFilter { column, text } => sink.set_filter(column, text).map(|_| ()),
            Intent::PreviousPage => {
                sink.previous_page();
                Ok(())
            }
            Intent::NextPage => {
                sink.next_page();
                Ok(())
            }
            Intent::GoToPage { page } => sink.go_to_page(*page),
        }
    }
}

/// Single owner and mutation point of a table view's state.
#[derive(Debug, Clone)]
pub struct ViewReducer {
    config: ViewConfig,
    base: Dataset,
    state: ViewState,
    view: DerivedView,
}

impl ViewReducer {
    /// Creates a reducer over an empty dataset.
    pub fn new(config: ViewConfig) -> Self {
        Self::with_dataset(config, Dataset::empty())
    }

    pub fn with_dataset(config: ViewConfig, base: Dataset) -> Self {
        let state = ViewState::new(&config.columns);
        let mut reducer = ViewReducer {
            config,
            base,
            state,
            view: DerivedView {
                columns: Vec::new(),
                rows: Vec::new(),
                pagination: PageDescriptor {
                    current_page: 1,
                    total_pages: 0,
                    total_rows: 0,
                    page_numbers: Vec::new(),
                    truncated: false,
                },
                loading: false,
            },
        };
        reducer.recompute();
        reducer
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn column_config(&self) -> &ColumnConfig {
        &self.config.columns
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> &DerivedView {
        &self.view
    }

    pub fn dataset(&self) -> &Dataset {
        &self.base
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    /// Current directive of a sortable column.
    pub fn sort_directive(&self, column: &str) -> Option<SortDirective> {
        self.state.sorting.get(column)
    }

    /// Stored filter of a filterable column, for pre-filling its input.
    pub fn filter_value(&self, column: &str) -> Option<&str> {
        self.state.filters.get(column)
    }

    pub fn toggle_sort(&mut self, column: &str) -> Result<SortDirective, ViewError> {
        let current = match self.state.sorting.get(column) {
            Some(directive) if self.config.columns.is_sortable(column) => directive,
            _ => {
                warn!("Rejected sort toggle on column '{}'", column);
                return Err(ViewError::not_sortable(column));
            }
        };

        let next = current.next();
        self.state.sorting.set(column, next);
        self.state.current_page = 1;
        debug!("Sort on '{}' is now {:?}", column, next);

        self.recompute();
        Ok(next)
    }

    pub fn set_filter(&mut self, column: &str, raw: &str) -> Result<bool, ViewError> {
        if !self.config.columns.is_filterable(column) || !self.state.filters.contains(column) {
            warn!("Rejected filter on column '{}'", column);
            return Err(ViewError::not_filterable(column));
        }

        let value = match FilterInput::classify(raw) {
            FilterInput::Pending => {
                debug!("Filter input on '{}' too short, keeping previous filter", column);
                return Ok(false);
            }
            FilterInput::Clear => None,
            FilterInput::Active(normalized) => Some(normalized),
        };

        debug!("Filter on '{}' is now {:?}", column, value);
        self.state.filters.set(column, value);
        self.state.current_page = 1;

        self.recompute();
        Ok(true)
    }

    /// Sets the current page. Pages past the end are accepted and show no rows.
    pub fn change_page(&mut self, page: usize) -> Result<(), ViewError> {
        if page == 0 {
            warn!("Rejected page change to page 0");
            return Err(ViewError::InvalidPage(page));
        }

        self.state.current_page = page;
        self.recompute();
        Ok(())
    }

    pub fn previous_page(&mut self) -> usize {
        let page = paginate::previous_page(self.state.current_page);
        self.state.current_page = page;
        self.recompute();
        page
    }

    pub fn next_page(&mut self) -> usize {
        let page = paginate::next_page(self.state.current_page, self.view.pagination.total_pages);
        self.state.current_page = page;
        self.recompute();
        page
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<(), ViewError> {
        self.change_page(paginate::go_to_page(page))
    }

    /// Updates the loading flag only; rows and pagination are left as they are.
    pub fn set_loading(&mut self, loading: bool) {
        self.state.loading = loading;
        self.view.loading = loading;
    }

    /// Replaces the base dataset and recomputes the view.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        debug!("Replacing dataset with {} records", dataset.len());
        self.base = dataset;
        self.recompute();
    }

    /// Marks a fetch as in flight.
    pub fn begin_fetch(&mut self) {
        self.set_loading(true);
    }

    /// Completes a fetch: the dataset is replaced on success and kept on
    /// failure; either way loading ends and the view is recomputed once.
    pub fn finish_fetch(&mut self, result: Result<Dataset, ViewError>) {
        self.state.loading = false;
        match result {
            Ok(dataset) => self.replace_dataset(dataset),
            Err(e) => {
                warn!("Fetch failed, keeping {} existing records: {}", self.base.len(), e);
                self.recompute();
            }
        }
    }

    pub fn apply(&mut self, intent: &Intent) -> Result<(), ViewError> {
        intent.apply(self)
    }

    fn recompute(&mut self) {
        let sorted = sort(&self.base, &self.state.sorting);
        let filtered = filter(&sorted, &self.state.filters);
        let (rows, pagination) = paginate(&filtered, self.state.current_page, &self.config.pagination);

        self.view = DerivedView {
            columns: self.base.columns().into_iter().map(String::from).collect(),
            rows,
            pagination,
            loading: self.state.loading,
        };
    }
}

impl IntentSink for ViewReducer {
    fn toggle_sort(&mut self, column: &str) -> Result<SortDirective, ViewError> {
        ViewReducer::toggle_sort(self, column)
    }

    fn set_filter(&mut self, column: &str, text: &str) -> Result<bool, ViewError> {
        ViewReducer::set_filter(self, column, text)
    }

    fn previous_page(&mut self) -> usize {
        ViewReducer::previous_page(self)
    }

    fn next_page(&mut self) -> usize {
        ViewReducer::next_page(self)
    }

    fn go_to_page(&mut self, page: usize) -> Result<(), ViewError> {
        ViewReducer::go_to_page(self, page)
    }
}
