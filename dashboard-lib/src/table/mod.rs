//! Tabular data engine: search → sort → paginate over in-memory rows.
//!
//! The engine provides:
//! - Case-insensitive substring search over searchable columns
//! - Stable, numeric-aware sorting with optional custom accessors
//! - Client-side or caller-delegated pagination
//! - [`TableState`] tying the pieces to user interaction
//!
//! # Example
//!
//! ```
//! use dashboard_lib::table::{Column, TableState};
//! use dashboard_lib::value::JsonRow;
//! use serde_json::json;
//!
//! let rows: Vec<JsonRow> = serde_json::from_value(json!([
//!     { "id": 1, "name": "Bob", "score": 10 },
//!     { "id": 2, "name": "al", "score": 30 },
//! ]))
//! .unwrap();
//!
//! let mut table = TableState::new(
//!     vec![Column::new("name", "Name"), Column::new("score", "Score")],
//!     rows,
//! );
//! table.set_search("al");
//! assert_eq!(table.view().visible_rows().len(), 1);
//! ```

mod column;
mod config;
mod export;
mod filter;
mod page;
mod render;
mod search;
mod sort;
mod state;
mod view;

pub use column::{Accessor, Alignment, CellRenderer, Column, duplicate_keys};
pub use config::TableConfig;
pub use export::export_csv;
pub use filter::{FilterSet, FilterValue};
pub use page::{
    DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS, PageSizeMenu, Pagination, PaginationMode,
    clamp_page, total_pages,
};
pub use render::{EMPTY_STATE, RenderOptions, render_table};
pub use search::{filter_rows, normalize_term, row_matches, searchable_keys};
pub use sort::{SortDirection, SortDirective, SortIndicator, compare_values};
pub use state::{TableEvent, TableState};
pub use view::{TableView, ViewQuery, compute_view};
