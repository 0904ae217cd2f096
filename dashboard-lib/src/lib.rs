//! Dashboard building blocks: a client-side tabular data engine and a
//! responsive grid layout manager with local persistence.

pub mod error;
pub mod grid;
pub mod preferences;
pub mod store;
pub mod table;
pub mod value;

pub mod prelude {
    pub use crate::error::{ExportError, StoreError};
    pub use crate::grid::{
        Breakpoint, Breakpoints, GridConfig, GridItem, GridOptions, GridState, Interaction,
        LayoutHints, LayoutItem, LayoutManager, LayoutOrigin, LayoutSet, MountPass,
        PersistedReconcile, SizeEvents, SizeObserver, build_default_layouts,
    };
    pub use crate::preferences::ZoomPreference;
    pub use crate::store::{KeyValueStore, MemoryStore, SqliteStore};
    pub use crate::table::{
        Alignment, Column, FilterSet, FilterValue, PageSizeMenu, Pagination, PaginationMode,
        SortDirection, SortDirective, SortIndicator, TableConfig, TableEvent, TableState,
        TableView, ViewQuery, compute_view,
    };
    pub use crate::value::{CellValue, JsonRow, RowId, TableRow};
}
