//! Grid configuration

use serde::{Deserialize, Serialize};

use super::layout::Breakpoints;

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: u32 = 60;

/// Default `[horizontal, vertical]` margin between items in pixels.
pub const DEFAULT_MARGIN: [u32; 2] = [16, 16];

/// How a persisted layout set is reconciled with the current item set on
/// registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistedReconcile {
    /// Adopt the persisted set as-is, even if it names items that no
    /// longer exist or lacks entries for new items.
    #[default]
    Verbatim,
    /// Drop entries for unknown items and append default entries for items
    /// missing from the persisted set.
    MatchItems,
}

/// Configuration shared by the grids of a dashboard.
///
/// # Example
///
/// ```
/// use dashboard_lib::grid::GridConfig;
///
/// let config = GridConfig::default()
///     .with_row_height(40)
///     .with_margin([8, 8]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Breakpoints and their column counts.
    ///
    /// Default: `lg=1200/12, md=996/10, sm=768/8, xs=480/6, xxs=0/4`
    pub breakpoints: Breakpoints,

    /// Height of one grid row in pixels.
    ///
    /// Default: 60
    pub row_height: u32,

    /// `[horizontal, vertical]` margin in pixels.
    ///
    /// Default: `[16, 16]`
    pub margin: [u32; 2],

    /// Whether item heights follow their rendered content.
    ///
    /// Default: true
    pub auto_height: bool,

    /// Persisted-layout reconciliation policy.
    ///
    /// Default: verbatim
    pub reconcile: PersistedReconcile,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            row_height: DEFAULT_ROW_HEIGHT,
            margin: DEFAULT_MARGIN,
            auto_height: true,
            reconcile: PersistedReconcile::Verbatim,
        }
    }
}

impl GridConfig {
    /// Creates a new grid config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_margin(mut self, margin: [u32; 2]) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_auto_height(mut self, auto_height: bool) -> Self {
        self.auto_height = auto_height;
        self
    }

    pub fn with_reconcile(mut self, reconcile: PersistedReconcile) -> Self {
        self.reconcile = reconcile;
        self
    }

    /// Registration options for a grid using this configuration.
    pub fn options(&self) -> GridOptions {
        GridOptions {
            persistence_key: None,
            persist: true,
            row_height: self.row_height,
            vertical_margin: self.margin[1],
            auto_height: self.auto_height,
            reconcile: self.reconcile,
        }
    }
}

/// Per-grid registration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridOptions {
    /// Key under which the layout set is persisted; `None` uses the grid id.
    pub persistence_key: Option<String>,
    /// Whether the grid reads and writes the store at all.
    pub persist: bool,
    pub row_height: u32,
    pub vertical_margin: u32,
    pub auto_height: bool,
    pub reconcile: PersistedReconcile,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridConfig::default().options()
    }
}

impl GridOptions {
    pub fn persistence_key(mut self, key: impl Into<String>) -> Self {
        self.persistence_key = Some(key.into());
        self
    }

    /// Keep the grid's layout in memory only.
    pub fn without_persistence(mut self) -> Self {
        self.persist = false;
        self
    }

    /// Key the grid `grid_id` is persisted under, if it persists.
    pub fn storage_key(&self, grid_id: &str) -> Option<String> {
        self.persist
            .then(|| self.persistence_key.clone().unwrap_or_else(|| grid_id.to_string()))
    }

    pub fn row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn vertical_margin(mut self, margin: u32) -> Self {
        self.vertical_margin = margin;
        self
    }

    pub fn auto_height(mut self, auto_height: bool) -> Self {
        self.auto_height = auto_height;
        self
    }

    pub fn reconcile(mut self, reconcile: PersistedReconcile) -> Self {
        self.reconcile = reconcile;
        self
    }

    /// Rows needed to show `content_height` pixels of content:
    /// `ceil((height + margin) / (row_height + margin))`.
    pub fn required_rows(&self, content_height: f64) -> u32 {
        let margin = f64::from(self.vertical_margin);
        let unit = f64::from(self.row_height) + margin;
        let unit = if unit > 0.0 { unit } else { 1.0 };
        let rows = ((content_height + margin) / unit).ceil();
        if rows.is_nan() || rows <= 0.0 {
            0
        } else {
            rows.min(f64::from(u32::MAX)) as u32
        }
    }
}
