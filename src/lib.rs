//! TableView - View-State Engine for Data Tables
//!
//! Given a base dataset and the user's view state (sort directives, column
//! filters, current page), TableView derives the rows to display and the
//! pagination controls to render. All state changes go through a single
//! reducer, which recomputes sort → filter → paginate after every intent.

pub mod error;
pub mod value;
pub mod record;
pub mod sort;
pub mod filter;
pub mod paginate;
pub mod state;
pub mod reducer;
pub mod source;
pub mod render;
pub mod messages;

pub use error::ViewError;
pub use value::ColumnValue;
pub use record::{Dataset, Record, COUNTRY_FIELDS};
pub use sort::{sort, SortDirective, SortDirectives};
pub use filter::{filter, normalize, FilterInput, FilterValues, MIN_FILTER_LEN};
pub use paginate::{paginate, PageDescriptor, PaginationConfig};
pub use state::{ColumnConfig, ViewConfig, ViewState};
pub use reducer::{DerivedView, Intent, IntentSink, ViewReducer, ViewStatus};
pub use source::{load, DataSource, StaticSource};
pub use render::{Renderer, TextRenderer};

#[cfg(feature = "http")]
pub use source::HttpSource;

// WebSocket server modules - only when server feature is enabled
#[cfg(feature = "server")]
pub mod websocket;
#[cfg(feature = "server")]
pub mod server;
