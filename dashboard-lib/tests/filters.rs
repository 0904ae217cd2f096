use dashboard_lib::table::{FilterSet, FilterValue};
use dashboard_lib::value::{CellValue, JsonRow, TableRow};
use serde_json::json;

fn orders() -> Vec<JsonRow> {
    serde_json::from_value(json!([
        { "id": 1, "status": "open", "region": "north", "qty": 2 },
        { "id": 2, "status": "closed", "region": "south", "qty": 5 },
        { "id": 3, "status": "open", "region": "south", "qty": 5.0 },
    ]))
    .unwrap()
}

fn ids(rows: &[&JsonRow]) -> Vec<String> {
    rows.iter().map(|row| row.id().to_string()).collect()
}

#[test]
fn test_empty_filters_keep_everything() {
    let filters = FilterSet::default();
    let data = orders();
    assert_eq!(filters.apply(&data).len(), 3);
    assert!(!filters.has_filters());
}

#[test]
fn test_value_filters_combine_with_and() {
    let mut filters = FilterSet::default();
    filters.set("status", "open");
    filters.set("region", "south");

    let data = orders();
    assert_eq!(ids(&filters.apply(&data)), vec!["3"]);
    assert!(filters.has_filters());
}

#[test]
fn test_list_filter_accepts_any_member() {
    let mut filters = FilterSet::default();
    filters.set(
        "region",
        vec![CellValue::from("north"), CellValue::from("east")],
    );

    let data = orders();
    assert_eq!(ids(&filters.apply(&data)), vec!["1"]);
}

#[test]
fn test_numbers_match_across_int_and_float() {
    let mut filters = FilterSet::default();
    filters.set("qty", 5_i64);

    let data = orders();
    assert_eq!(ids(&filters.apply(&data)), vec!["2", "3"]);
}

#[test]
fn test_empty_values_do_not_constrain() {
    let mut filters = FilterSet::default();
    filters.set("status", FilterValue::Empty);
    filters.set("region", FilterValue::List(Vec::new()));
    filters.set("qty", CellValue::Null);

    let data = orders();
    assert_eq!(filters.apply(&data).len(), 3);
}

#[test]
fn test_remove_returns_to_initial_value() {
    let mut filters = FilterSet::new([("status", FilterValue::from("open"))]);
    filters.set("status", "closed");
    filters.set("region", "north");

    filters.remove("status");
    assert_eq!(filters.get("status"), &FilterValue::from("open"));

    filters.remove("region");
    assert_eq!(filters.get("region"), &FilterValue::Empty);
}

#[test]
fn test_reset_all_and_has_filters() {
    let mut filters = FilterSet::new([("status", FilterValue::from("open"))]);
    assert!(!filters.has_filters());

    filters.update([
        ("status", FilterValue::from("closed")),
        ("region", FilterValue::from("south")),
    ]);
    assert!(filters.has_filters());

    filters.clear();
    assert!(!filters.has_filters());
    assert_eq!(filters.get("status"), &FilterValue::from("open"));
}

#[test]
fn test_missing_key_equals_empty_initial() {
    let mut filters = FilterSet::default();
    filters.set("status", FilterValue::Empty);
    assert!(!filters.has_filters());
}

#[test]
fn test_replace_initial_resets_only_on_change() {
    let mut filters = FilterSet::new([("status", FilterValue::from("open"))]);
    filters.set("region", "north");
    let before = filters.revision();

    assert!(!filters.replace_initial([("status", FilterValue::from("open"))]));
    assert_eq!(filters.revision(), before);
    assert_eq!(filters.get("region"), &FilterValue::from("north"));

    assert!(filters.replace_initial([("status", FilterValue::from("closed"))]));
    assert_eq!(filters.get("status"), &FilterValue::from("closed"));
    assert_eq!(filters.get("region"), &FilterValue::Empty);
    assert!(filters.revision() > before);
}
