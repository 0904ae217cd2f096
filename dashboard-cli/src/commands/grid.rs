use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use dashboard_lib::grid::{
    Breakpoint, GridItem, GridState, LayoutItem, LayoutManager, LayoutOrigin, build_default_layouts,
    parse_layouts,
};
use dashboard_lib::store::KeyValueStore;
use dashboard_lib::table::{Alignment, Column, RenderOptions, TableConfig, TableState};
use dashboard_lib::value::{CellValue, RowId, TableRow};
use log::info;

use crate::args::{GridCommand, GridTarget};
use crate::config::CliConfig;

/// A layout entry shown as a table row.
struct EntryRow {
    entry: LayoutItem,
    draggable: bool,
    resizable: bool,
}

impl TableRow for EntryRow {
    fn id(&self) -> RowId {
        RowId::Text(self.entry.i.clone())
    }

    fn field(&self, key: &str) -> CellValue {
        let entry = &self.entry;
        match key {
            "i" => entry.i.as_str().into(),
            "x" => entry.x.into(),
            "y" => entry.y.into(),
            "w" => entry.w.into(),
            "h" => entry.h.into(),
            "minH" => entry.min_h.into(),
            "maxH" => entry.max_h.into(),
            "static" => entry.is_static.into(),
            "draggable" => self.draggable.into(),
            "resizable" => self.resizable.into(),
            _ => CellValue::Null,
        }
    }
}

pub fn run(config: &CliConfig, store: Arc<dyn KeyValueStore>, command: GridCommand) -> Result<()> {
    let mut manager = LayoutManager::with_store(store);

    match command {
        GridCommand::Show { target, width } => {
            register(&mut manager, config, &target)?;
            print_origin(&manager, &target.grid);
            print_layouts(&manager, config, &target.grid, width, false)
        }
        GridCommand::Update { target, layout } => {
            register(&mut manager, config, &target)?;
            let raw = fs::read_to_string(&layout)
                .with_context(|| format!("Failed to read {}", layout.display()))?;
            let layouts = parse_layouts(&raw)
                .with_context(|| format!("{} is not a layout set", layout.display()))?;
            manager.update_layout(&target.grid, layouts);
            info!("Updated layout of grid {}", target.grid);
            println!("Saved layout for grid '{}'", target.grid);
            Ok(())
        }
        GridCommand::Reset { target } => {
            register(&mut manager, config, &target)?;
            if !manager.reset_layout(&target.grid) {
                bail!("Grid '{}' has no default layout", target.grid);
            }
            println!("Grid '{}' reset to its default layout", target.grid);
            Ok(())
        }
        GridCommand::Resize {
            target,
            item,
            height,
        } => {
            register(&mut manager, config, &target)?;
            if manager.adjust_item_height(&target.grid, &item, height) {
                println!("Adjusted '{}' for {}px of content", item, height);
                print_layouts(&manager, config, &target.grid, None, false)
            } else {
                println!("'{}' already fits {}px of content", item, height);
                Ok(())
            }
        }
        GridCommand::Customize { target, width } => {
            register(&mut manager, config, &target)?;
            manager.start_customization();
            print_layouts(&manager, config, &target.grid, width, true)
        }
    }
}

/// Register the target grid. It persists under its id.
fn register(manager: &mut LayoutManager, config: &CliConfig, target: &GridTarget) -> Result<()> {
    let items = load_items(target)?;
    let defaults = build_default_layouts(&items, &config.grid.breakpoints);
    manager.register_grid(&target.grid, defaults, config.grid.options());
    Ok(())
}

fn load_items(target: &GridTarget) -> Result<Vec<GridItem>> {
    let mut items: Vec<GridItem> = match &target.items_file {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a list of grid items", path.display()))?
        }
        None => Vec::new(),
    };
    items.extend(target.items.iter().map(GridItem::new));

    let mut seen = std::collections::HashSet::new();
    if let Some(duplicate) = items.iter().find(|item| !seen.insert(item.id.as_str())) {
        bail!("Item '{}' is declared twice", duplicate.id);
    }
    Ok(items)
}

fn print_origin(manager: &LayoutManager, grid_id: &str) {
    if let GridState::Registered { origin, .. } = manager.grid_state(grid_id) {
        let source = match origin {
            LayoutOrigin::Persisted => "saved",
            LayoutOrigin::Default => "default",
        };
        println!("Grid '{}' ({} layout)", grid_id, source);
    }
}

fn print_layouts(
    manager: &LayoutManager,
    config: &CliConfig,
    grid_id: &str,
    width: Option<u32>,
    interactions: bool,
) -> Result<()> {
    let Some(layouts) = manager.current_layout(grid_id) else {
        bail!("Grid '{}' is not registered", grid_id);
    };

    let selected: Vec<&Breakpoint> = match width {
        Some(width) => config
            .grid
            .breakpoints
            .breakpoint_for_width(width)
            .into_iter()
            .collect(),
        None => config.grid.breakpoints.iter().collect(),
    };

    for breakpoint in selected {
        let entries = layouts.get(&breakpoint.name).cloned().unwrap_or_default();
        let rows: Vec<EntryRow> = entries
            .into_iter()
            .map(|entry| {
                let interaction = manager.interaction(&entry);
                EntryRow {
                    entry,
                    draggable: interaction.draggable,
                    resizable: interaction.resizable,
                }
            })
            .collect();

        let page_size = rows.len().max(1);
        let table = TableState::with_config(
            entry_columns(interactions),
            rows,
            TableConfig::default().with_page_size(page_size),
        );
        let title = format!(
            "{} (≥{}px, {} columns)",
            breakpoint.name, breakpoint.min_width, breakpoint.columns
        );
        print!("{}", table.render(&RenderOptions::default().title(title)));
        println!();
    }
    Ok(())
}

fn entry_columns(interactions: bool) -> Vec<Column<EntryRow>> {
    let mut columns = vec![Column::new("i", "Item")];
    if interactions {
        columns.push(Column::new("draggable", "Draggable"));
        columns.push(Column::new("resizable", "Resizable"));
        return columns;
    }

    for (key, header) in [("x", "X"), ("y", "Y"), ("w", "W"), ("h", "H"), ("minH", "Min H"), ("maxH", "Max H")] {
        columns.push(Column::new(key, header).align(Alignment::Right));
    }
    columns.push(Column::new("static", "Static"));
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn target(items: &[&str]) -> GridTarget {
        GridTarget {
            grid: "main".into(),
            items: items.iter().map(|id| id.to_string()).collect(),
            items_file: None,
        }
    }

    #[test]
    fn test_duplicate_items_are_rejected() {
        assert!(load_items(&target(&["a", "b"])).is_ok());
        assert!(load_items(&target(&["a", "a"])).is_err());
    }

    #[test]
    fn test_missing_items_file() {
        let mut target = target(&[]);
        target.items_file = Some(PathBuf::from("/nonexistent/items.json"));
        assert!(load_items(&target).is_err());
    }

    #[test]
    fn test_entry_row_fields() {
        let mut entry = LayoutItem::new("a", 1, 2, 3, 4);
        entry.max_h = Some(9);
        let row = EntryRow {
            entry,
            draggable: true,
            resizable: false,
        };
        assert_eq!(row.field("w"), CellValue::Int(3));
        assert_eq!(row.field("maxH"), CellValue::Int(9));
        assert_eq!(row.field("minH"), CellValue::Null);
        assert_eq!(row.field("draggable"), CellValue::Bool(true));
    }
}
