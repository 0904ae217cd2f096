//! Responsive grid layouts.
//!
//! A grid is an ordered list of [`GridItem`]s placed on a column grid whose
//! column count depends on the viewport [`Breakpoint`]. The
//! [`LayoutManager`] keeps the current [`LayoutSet`] of every grid, persists
//! it through a [`KeyValueStore`](crate::store::KeyValueStore), and grows or
//! shrinks items to fit their content.
//!
//! # Example
//!
//! ```
//! use dashboard_lib::grid::{
//!     GridConfig, GridItem, LayoutHints, LayoutManager, build_default_layouts,
//! };
//!
//! let config = GridConfig::default();
//! let items = vec![
//!     GridItem::new("revenue"),
//!     GridItem::new("orders").layout(LayoutHints::default().width(8)),
//! ];
//! let defaults = build_default_layouts(&items, &config.breakpoints);
//!
//! let mut manager = LayoutManager::new();
//! manager.register_grid("overview", defaults, config.options());
//! assert!(manager.adjust_item_height("overview", "revenue", 500.0));
//! assert_eq!(manager.current_layout("overview").unwrap()["lg"][0].h, 7);
//! ```

mod config;
mod defaults;
mod item;
mod layout;
mod manager;
mod observer;
mod persist;

pub use config::{
    DEFAULT_MARGIN, DEFAULT_ROW_HEIGHT, GridConfig, GridOptions, PersistedReconcile,
};
pub use defaults::{DEFAULT_ITEM_HEIGHT, DEFAULT_ITEM_WIDTH, build_default_layouts, clamp_to_cols};
pub use item::{GridItem, LayoutHints};
pub use layout::{Breakpoint, Breakpoints, FALLBACK_COLUMNS, LayoutItem, LayoutSet};
pub use manager::{GridState, Interaction, LayoutManager, LayoutOrigin};
pub use observer::{ContentResized, MountPass, Observation, SizeEvents, SizeObserver, channel};
pub use persist::{LAYOUT_KEY_PREFIX, layout_key, parse_layouts, read_layouts, write_layouts};
