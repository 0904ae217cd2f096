use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;

use anyhow::{Context, Result, bail};
use dashboard_lib::table::{
    Alignment, Column, FilterSet, FilterValue, RenderOptions, SortDirection, TableState,
};
use dashboard_lib::value::{CellValue, JsonRow, TableRow};
use log::{debug, info};

use crate::args::TableArgs;
use crate::config::CliConfig;

pub fn run(config: &CliConfig, args: TableArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.data)
        .with_context(|| format!("Failed to read {}", args.data.display()))?;
    let rows: Vec<JsonRow> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of objects", args.data.display()))?;
    debug!("Loaded {} rows from {}", rows.len(), args.data.display());

    let columns = if args.columns.is_empty() {
        infer_columns(&rows)
    } else {
        parse_columns(&args.columns, &rows)?
    };

    let filters = parse_filters(&args.filters)?;
    let rows: Vec<JsonRow> = filters.apply(&rows).into_iter().cloned().collect();

    let mut table_config = config.table.clone();
    if let Some(size) = args.page_size {
        table_config = table_config.with_page_size(size);
    }
    let mut table = TableState::with_config(columns, rows, table_config);

    if let Some(term) = &args.search {
        table.set_search(term.as_str());
    }

    if let Some(spec) = &args.sort {
        let (key, direction) = parse_sort(spec)?;
        let mut applied = table.toggle_sort(key).map(|sort| sort.direction);
        if applied == Some(SortDirection::Ascending) && direction == SortDirection::Descending {
            applied = table.toggle_sort(key).map(|sort| sort.direction);
        }
        if applied.is_none() {
            bail!("Column '{}' does not exist or cannot be sorted", key);
        }
    }

    if let Some(page) = args.page {
        table.go_to_page(page.saturating_sub(1));
    }

    let title = args
        .data
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let options = RenderOptions::default()
        .title(title)
        .max_cell_width(args.max_cell_width);
    print!("{}", table.render(&options));

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let written = table.export_csv(BufWriter::new(file))?;
        info!("Exported {} rows to {}", written, path.display());
        println!("Exported {} rows to {}", written, path.display());
    }

    Ok(())
}

/// Every field seen in the rows, in first-seen order.
fn infer_columns(rows: &[JsonRow]) -> Vec<Column<JsonRow>> {
    let mut keys: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.0.keys() {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
    }
    keys.into_iter()
        .map(|key| column_for(key, key, rows))
        .collect()
}

/// Parse `key[:Header]` column specs.
fn parse_columns(specs: &[String], rows: &[JsonRow]) -> Result<Vec<Column<JsonRow>>> {
    specs
        .iter()
        .map(|spec| {
            let spec = spec.as_str();
            let (key, header) = spec.split_once(':').unwrap_or((spec, spec));
            let key = key.trim();
            if key.is_empty() {
                bail!("Empty column key in '{}'", spec);
            }
            Ok(column_for(key, header.trim(), rows))
        })
        .collect()
}

/// Numeric columns are right-aligned.
fn column_for(key: &str, header: &str, rows: &[JsonRow]) -> Column<JsonRow> {
    let numeric = rows
        .iter()
        .map(|row| row.field(key))
        .find(|value| !value.is_null())
        .is_some_and(|value| matches!(value, CellValue::Int(_) | CellValue::Float(_)));

    let column = Column::new(key, header);
    if numeric {
        column.align(Alignment::Right)
    } else {
        column
    }
}

/// Parse `key` or `key:asc|desc`.
fn parse_sort(spec: &str) -> Result<(&str, SortDirection)> {
    match spec.split_once(':') {
        None => Ok((spec, SortDirection::Ascending)),
        Some((key, "asc")) => Ok((key, SortDirection::Ascending)),
        Some((key, "desc")) => Ok((key, SortDirection::Descending)),
        Some((_, other)) => bail!("Unknown sort direction '{}' (expected asc or desc)", other),
    }
}

/// Parse `key=value` filters. Values are read as JSON when possible so
/// `qty=5` matches numbers; repeated keys accept any of their values.
fn parse_filters(specs: &[String]) -> Result<FilterSet> {
    let mut grouped: BTreeMap<&str, Vec<CellValue>> = BTreeMap::new();
    for spec in specs {
        let Some((key, value)) = spec.split_once('=') else {
            bail!("Filter '{}' must look like key=value", spec);
        };
        let value = match serde_json::from_str::<serde_json::Value>(value) {
            Ok(json) => CellValue::from(&json),
            Err(_) => CellValue::from(value),
        };
        grouped.entry(key.trim()).or_default().push(value);
    }

    let mut filters = FilterSet::default();
    filters.update(grouped.into_iter().map(|(key, mut values)| {
        let value = if values.len() == 1 {
            FilterValue::Value(values.remove(0))
        } else {
            FilterValue::List(values)
        };
        (key, value)
    }));
    Ok(filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<JsonRow> {
        serde_json::from_value(json!([
            { "id": 1, "name": "Bob", "qty": 5 },
            { "id": 2, "name": "al", "qty": 7 },
        ]))
        .unwrap()
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort("name").unwrap(), ("name", SortDirection::Ascending));
        assert_eq!(parse_sort("qty:desc").unwrap(), ("qty", SortDirection::Descending));
        assert!(parse_sort("qty:sideways").is_err());
    }

    #[test]
    fn test_parse_columns() {
        let columns = parse_columns(&["name:Customer".into(), "qty".into()], &rows()).unwrap();
        assert_eq!(columns[0].header, "Customer");
        assert_eq!(columns[0].align, Alignment::Left);
        assert_eq!(columns[1].header, "qty");
        assert_eq!(columns[1].align, Alignment::Right);
        assert!(parse_columns(&[":Nothing".into()], &rows()).is_err());
    }

    #[test]
    fn test_parse_filters_reads_json_values() {
        let filters = parse_filters(&["qty=5".into(), "name=al".into(), "name=Bob".into()]).unwrap();
        assert_eq!(filters.get("qty"), &FilterValue::Value(CellValue::Int(5)));
        assert_eq!(
            filters.get("name"),
            &FilterValue::List(vec![CellValue::from("al"), CellValue::from("Bob")])
        );

        let data = rows();
        assert_eq!(filters.apply(&data).len(), 1);
        assert!(parse_filters(&["broken".into()]).is_err());
    }
}
