use dashboard_lib::grid::{
    Breakpoint, Breakpoints, GridItem, LayoutHints, LayoutItem, build_default_layouts,
};
use std::collections::BTreeMap;

fn single(name: &str, cols: u32) -> Breakpoints {
    Breakpoints::new([Breakpoint::new(name, 0, cols)])
}

fn entry<'a>(items: &'a [LayoutItem], id: &str) -> &'a LayoutItem {
    items.iter().find(|item| item.i == id).unwrap()
}

// =============================================================================
// Placement
// =============================================================================

#[test]
fn test_oversized_width_is_clamped() {
    let items = vec![GridItem::new("a").layout(LayoutHints::default().width(20))];
    let layouts = build_default_layouts(&items, &single("lg", 12));

    let a = entry(&layouts["lg"], "a");
    assert_eq!(a.w, 12);
    assert_eq!(a.x, 0);
}

#[test]
fn test_default_stride_wraps_at_column_count() {
    let items: Vec<GridItem> = (0..5).map(|i| GridItem::new(format!("item-{}", i))).collect();
    let layouts = build_default_layouts(&items, &single("md", 10));

    let placed: Vec<(u32, u32, u32, u32)> = layouts["md"]
        .iter()
        .map(|item| (item.x, item.y, item.w, item.h))
        .collect();
    // stride = index * 4: 0, 4, 8, 12, 16 on 10 columns
    assert_eq!(
        placed,
        vec![(0, 0, 4, 4), (4, 0, 4, 4), (6, 0, 4, 4), (2, 4, 4, 4), (6, 4, 4, 4)]
    );
}

#[test]
fn test_every_breakpoint_gets_every_item() {
    let items = vec![GridItem::new("a"), GridItem::new("b"), GridItem::new("c")];
    let breakpoints = Breakpoints::default();
    let layouts = build_default_layouts(&items, &breakpoints);

    assert_eq!(layouts.len(), breakpoints.len());
    for bp in breakpoints.iter() {
        let ids: Vec<&str> = layouts[&bp.name].iter().map(|item| item.i.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}

#[test]
fn test_width_never_exceeds_columns() {
    let breakpoints = Breakpoints::default();
    for declared in [1, 3, 4, 7, 12, 13, 40] {
        let items: Vec<GridItem> = (0..6)
            .map(|i| GridItem::new(format!("i{}", i)).layout(LayoutHints::default().width(declared)))
            .collect();
        let layouts = build_default_layouts(&items, &breakpoints);

        for bp in breakpoints.iter() {
            for item in &layouts[&bp.name] {
                assert!(item.w <= bp.columns, "{} w={} cols={}", bp.name, item.w, bp.columns);
                assert!(item.right() <= bp.columns, "{} x+w={}", bp.name, item.right());
            }
        }
    }
}

#[test]
fn test_width_bounds_are_clamped() {
    let items = vec![GridItem::new("a").layout(LayoutHints::default().width_bounds(Some(0), Some(30)))];
    let layouts = build_default_layouts(&items, &single("xxs", 4));

    let a = entry(&layouts["xxs"], "a");
    assert_eq!(a.min_w, Some(1));
    assert_eq!(a.max_w, Some(4));
}

#[test]
fn test_explicit_position_and_height() {
    let items = vec![
        GridItem::new("a"),
        GridItem::new("b").layout(LayoutHints::default().position(2, 9).height(3)),
    ];
    let layouts = build_default_layouts(&items, &single("lg", 12));

    let b = entry(&layouts["lg"], "b");
    assert_eq!((b.x, b.y, b.w, b.h), (2, 9, 4, 3));
}

#[test]
fn test_explicit_x_is_pulled_left_to_fit() {
    let items = vec![GridItem::new("a").layout(LayoutHints::default().position(10, 0).width(6))];
    let layouts = build_default_layouts(&items, &single("lg", 12));

    let a = entry(&layouts["lg"], "a");
    assert_eq!((a.x, a.w), (6, 6));
}

#[test]
fn test_static_and_height_bounds_carry_over() {
    let items = vec![GridItem::new("a").layout(
        LayoutHints::default()
            .fixed()
            .height_bounds(Some(2), Some(8)),
    )];
    let layouts = build_default_layouts(&items, &single("lg", 12));

    let a = entry(&layouts["lg"], "a");
    assert!(a.is_static);
    assert_eq!((a.min_h, a.max_h), (Some(2), Some(8)));
}

// =============================================================================
// Breakpoints
// =============================================================================

#[test]
fn test_breakpoint_for_width() {
    let breakpoints = Breakpoints::default();
    assert_eq!(breakpoints.breakpoint_for_width(1400).unwrap().name, "lg");
    assert_eq!(breakpoints.breakpoint_for_width(1000).unwrap().name, "md");
    assert_eq!(breakpoints.breakpoint_for_width(768).unwrap().name, "sm");
    assert_eq!(breakpoints.breakpoint_for_width(300).unwrap().name, "xxs");
}

#[test]
fn test_from_maps_defaults_missing_columns() {
    let widths = BTreeMap::from([("wide".to_string(), 1000), ("narrow".to_string(), 0)]);
    let columns = BTreeMap::from([("narrow".to_string(), 2)]);
    let breakpoints = Breakpoints::from_maps(&widths, &columns);

    let names: Vec<&str> = breakpoints.iter().map(|bp| bp.name.as_str()).collect();
    assert_eq!(names, vec!["wide", "narrow"]);
    assert_eq!(breakpoints.columns("wide"), 12);
    assert_eq!(breakpoints.columns("narrow"), 2);
}

#[test]
fn test_breakpoints_deserialize_sorted() {
    let breakpoints: Breakpoints = serde_json::from_str(
        r#"[{"name":"sm","min_width":0,"columns":4},{"name":"lg","min_width":900,"columns":12}]"#,
    )
    .unwrap();
    assert_eq!(breakpoints.iter().next().unwrap().name, "lg");
}
