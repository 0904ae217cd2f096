use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use simplelog::LevelFilter;

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Inspect tables and manage dashboard grid layouts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Settings database holding layouts and preferences
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Search, sort and page through a JSON row file")]
    Table(TableArgs),

    #[command(about = "Manage a grid's persisted layout")]
    Grid {
        #[command(subcommand)]
        command: GridCommand,
    },

    #[command(about = "Adjust the dashboard zoom level")]
    Zoom {
        #[command(subcommand)]
        command: ZoomCommand,
    },
}

#[derive(Debug, Args)]
pub struct TableArgs {
    /// JSON file containing an array of row objects
    #[arg(long)]
    pub data: PathBuf,

    /// Columns as `key[:Header]`, comma separated (defaults to every field)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    #[arg(long)]
    pub search: Option<String>,

    /// Sort as `key` or `key:desc`
    #[arg(long)]
    pub sort: Option<String>,

    /// One-based page number
    #[arg(long)]
    pub page: Option<usize>,

    #[arg(long)]
    pub page_size: Option<usize>,

    /// Exact-match filter `key=value`; repeat a key to accept several values
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Write every matching row (all pages) to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,

    #[arg(long, default_value = "40")]
    pub max_cell_width: usize,
}

/// Which grid to operate on and which items it contains.
#[derive(Debug, Args)]
pub struct GridTarget {
    /// Grid id, also used as its persistence key
    #[arg(long, default_value = "main")]
    pub grid: String,

    /// Item id, in declaration order
    #[arg(long = "item")]
    pub items: Vec<String>,

    /// JSON file with an array of `{ "id": ..., "layout": { ... } }` items
    #[arg(long)]
    pub items_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum GridCommand {
    #[command(about = "Print the current layout")]
    Show {
        #[command(flatten)]
        target: GridTarget,

        /// Viewport width in pixels; shows only the matching breakpoint
        #[arg(long)]
        width: Option<u32>,
    },

    #[command(about = "Replace the layout with a JSON layout set")]
    Update {
        #[command(flatten)]
        target: GridTarget,

        #[arg(long)]
        layout: PathBuf,
    },

    #[command(about = "Restore the default layout")]
    Reset {
        #[command(flatten)]
        target: GridTarget,
    },

    #[command(about = "Fit an item's height to measured content")]
    Resize {
        #[command(flatten)]
        target: GridTarget,

        /// Item to adjust
        item: String,

        /// Content height in pixels
        height: f64,
    },

    #[command(about = "Show which items can be dragged or resized while customizing")]
    Customize {
        #[command(flatten)]
        target: GridTarget,

        #[arg(long)]
        width: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum ZoomCommand {
    #[command(about = "Zoom in one step")]
    In,
    #[command(about = "Zoom out one step")]
    Out,
    #[command(about = "Return to 100%")]
    Reset,
    #[command(about = "Print the current level")]
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
