//! Default placement of grid items.

use super::item::GridItem;
use super::layout::{Breakpoints, LayoutItem, LayoutSet};

/// Default item width in columns.
pub const DEFAULT_ITEM_WIDTH: u32 = 4;

/// Default item height in rows.
pub const DEFAULT_ITEM_HEIGHT: u32 = 4;

/// Clamps a width-like value into `[1, cols]`.
pub fn clamp_to_cols(value: u32, cols: u32) -> u32 {
    if value > cols {
        cols.max(1)
    } else {
        value.max(1)
    }
}

/// Computes default placements for every breakpoint.
///
/// Items are laid out in declaration order on a 4-column stride that wraps
/// at the breakpoint's column count, stacking wrapped rows 4 units apart.
/// Widths (and declared width bounds) are clamped to the column count and
/// `x` is pulled left so no item overflows the grid.
pub fn build_default_layouts<C>(items: &[GridItem<C>], breakpoints: &Breakpoints) -> LayoutSet {
    breakpoints
        .iter()
        .map(|bp| {
            let layout = items
                .iter()
                .enumerate()
                .map(|(index, item)| place_item(index as u32, item, bp.columns))
                .collect();
            (bp.name.clone(), layout)
        })
        .collect()
}

fn place_item<C>(index: u32, item: &GridItem<C>, cols: u32) -> LayoutItem {
    let hints = &item.layout;
    let stride = index.saturating_mul(DEFAULT_ITEM_WIDTH);
    let wrap = cols.max(1);

    let w = clamp_to_cols(hints.w.unwrap_or(DEFAULT_ITEM_WIDTH), cols);
    let x = hints.x.unwrap_or(stride % wrap);
    let y = hints.y.unwrap_or((stride / wrap) * DEFAULT_ITEM_HEIGHT);

    LayoutItem {
        i: item.id.clone(),
        x: x.min(cols.saturating_sub(w)),
        y,
        w,
        h: hints.h.unwrap_or(DEFAULT_ITEM_HEIGHT),
        min_w: hints.min_w.map(|v| clamp_to_cols(v, cols)),
        max_w: hints.max_w.map(|v| clamp_to_cols(v, cols)),
        min_h: hints.min_h,
        max_h: hints.max_h,
        is_static: hints.is_static,
        is_draggable: hints.is_draggable,
        is_resizable: hints.is_resizable,
    }
}
