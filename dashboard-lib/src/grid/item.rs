//! Grid items and their layout hints.

use serde::{Deserialize, Serialize};

/// Optional placement hints declared by an item.
///
/// Unset fields fall back to the computed defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutHints {
    pub x: Option<u32>,
    pub y: Option<u32>,
    pub w: Option<u32>,
    pub h: Option<u32>,
    pub min_w: Option<u32>,
    pub max_w: Option<u32>,
    pub min_h: Option<u32>,
    pub max_h: Option<u32>,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub is_draggable: Option<bool>,
    pub is_resizable: Option<bool>,
}

impl LayoutHints {
    pub fn width(mut self, w: u32) -> Self {
        self.w = Some(w);
        self
    }

    pub fn height(mut self, h: u32) -> Self {
        self.h = Some(h);
        self
    }

    pub fn position(mut self, x: u32, y: u32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn width_bounds(mut self, min_w: Option<u32>, max_w: Option<u32>) -> Self {
        self.min_w = min_w;
        self.max_w = max_w;
        self
    }

    pub fn height_bounds(mut self, min_h: Option<u32>, max_h: Option<u32>) -> Self {
        self.min_h = min_h;
        self.max_h = max_h;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A placeable unit of dashboard content.
///
/// `C` is whatever the surrounding page renders for the item; the layout
/// manager only looks at `id` and `layout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridItem<C = ()> {
    /// Unique within a grid.
    pub id: String,
    #[serde(default)]
    pub layout: LayoutHints,
    #[serde(skip)]
    pub content: C,
}

impl GridItem<()> {
    /// An item without content.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            layout: LayoutHints::default(),
            content: (),
        }
    }
}

impl<C> GridItem<C> {
    /// An item carrying `content`.
    pub fn with_content(id: impl Into<String>, content: C) -> Self {
        Self {
            id: id.into(),
            layout: LayoutHints::default(),
            content,
        }
    }

    pub fn layout(mut self, layout: LayoutHints) -> Self {
        self.layout = layout;
        self
    }
}
