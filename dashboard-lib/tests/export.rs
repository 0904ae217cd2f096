use dashboard_lib::table::{Column, TableState, export_csv};
use dashboard_lib::value::{JsonRow, TableRow};
use serde_json::json;

fn rows() -> Vec<JsonRow> {
    serde_json::from_value(json!([
        { "id": 1, "name": "Bob", "city": "Porto, PT", "score": 10 },
        { "id": 2, "name": "al", "city": "Lyon", "score": 30 },
        { "id": 3, "name": "Cy", "score": 20 },
    ]))
    .unwrap()
}

fn columns() -> Vec<Column<JsonRow>> {
    vec![
        Column::new("name", "Name"),
        Column::new("city", "City"),
        Column::new("score", "Score").render(|row: &JsonRow| format!("{}%", row.field("score"))),
    ]
}

#[test]
fn test_export_writes_header_and_rendered_cells() {
    let data = rows();
    let refs: Vec<&JsonRow> = data.iter().collect();
    let mut out = Vec::new();

    let written = export_csv(&refs, &columns(), &mut out).unwrap();
    assert_eq!(written, 3);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Name,City,Score\nBob,\"Porto, PT\",10%\nal,Lyon,30%\nCy,,20%\n"
    );
}

#[test]
fn test_export_empty_dataset_writes_nothing() {
    let refs: Vec<&JsonRow> = Vec::new();
    let mut out = Vec::new();

    let written = export_csv(&refs, &columns(), &mut out).unwrap();
    assert_eq!(written, 0);
    assert!(out.is_empty());
}

#[test]
fn test_state_exports_filtered_sorted_rows_across_pages() {
    let mut table = TableState::new(columns(), rows());
    table.set_page_size(1);
    table.set_search("o");
    table.toggle_sort("score");
    table.toggle_sort("score");

    let mut out = Vec::new();
    let written = table.export_csv(&mut out).unwrap();
    assert_eq!(written, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Name,City,Score\nal,Lyon,30%\nBob,\"Porto, PT\",10%\n"
    );
}
