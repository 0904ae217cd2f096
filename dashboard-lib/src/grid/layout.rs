//! Layout entries, layout sets and breakpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placement of one item at one breakpoint, in grid units.
///
/// Serialized with the field names used by responsive grid layout
/// libraries (`i`, `minW`, `static`, `isDraggable`, ...), so persisted
/// records stay readable by other front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    /// Item id.
    pub i: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<u32>,
    #[serde(rename = "static", default)]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draggable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_resizable: Option<bool>,
}

impl LayoutItem {
    /// A plain entry with no constraints.
    pub fn new(id: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            i: id.into(),
            x,
            y,
            w,
            h,
            min_w: None,
            max_w: None,
            min_h: None,
            max_h: None,
            is_static: false,
            is_draggable: None,
            is_resizable: None,
        }
    }

    /// Rightmost column covered (exclusive).
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }
}

/// The complete per-breakpoint collection of placements for one grid.
pub type LayoutSet = BTreeMap<String, Vec<LayoutItem>>;

/// A viewport-width tier with its own column count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub name: String,
    /// Smallest viewport width (px) using this tier.
    pub min_width: u32,
    pub columns: u32,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, min_width: u32, columns: u32) -> Self {
        Self {
            name: name.into(),
            min_width,
            columns,
        }
    }
}

/// Column count used for a breakpoint missing from a column map.
pub const FALLBACK_COLUMNS: u32 = 12;

/// An ordered set of breakpoints, widest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Breakpoint>", into = "Vec<Breakpoint>")]
pub struct Breakpoints(Vec<Breakpoint>);

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new([
            Breakpoint::new("lg", 1200, 12),
            Breakpoint::new("md", 996, 10),
            Breakpoint::new("sm", 768, 8),
            Breakpoint::new("xs", 480, 6),
            Breakpoint::new("xxs", 0, 4),
        ])
    }
}

impl Breakpoints {
    /// Create from any order; stored widest first.
    pub fn new(breakpoints: impl IntoIterator<Item = Breakpoint>) -> Self {
        let mut list: Vec<Breakpoint> = breakpoints.into_iter().collect();
        list.sort_by(|a, b| b.min_width.cmp(&a.min_width));
        Self(list)
    }

    /// Build from separate width and column maps. Breakpoints missing from
    /// `columns` get [`FALLBACK_COLUMNS`].
    pub fn from_maps(widths: &BTreeMap<String, u32>, columns: &BTreeMap<String, u32>) -> Self {
        Self::new(widths.iter().map(|(name, min_width)| {
            let cols = columns.get(name).copied().unwrap_or(FALLBACK_COLUMNS);
            Breakpoint::new(name.clone(), *min_width, cols)
        }))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Breakpoint> {
        self.0.iter().find(|bp| bp.name == name)
    }

    /// Column count for `name`, or [`FALLBACK_COLUMNS`] if unknown.
    pub fn columns(&self, name: &str) -> u32 {
        self.get(name).map(|bp| bp.columns).unwrap_or(FALLBACK_COLUMNS)
    }

    /// The widest breakpoint whose minimum width fits `width`.
    pub fn breakpoint_for_width(&self, width: u32) -> Option<&Breakpoint> {
        self.0
            .iter()
            .find(|bp| bp.min_width <= width)
            .or_else(|| self.0.last())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Breakpoint>> for Breakpoints {
    fn from(list: Vec<Breakpoint>) -> Self {
        Self::new(list)
    }
}

impl From<Breakpoints> for Vec<Breakpoint> {
    fn from(breakpoints: Breakpoints) -> Self {
        breakpoints.0
    }
}
