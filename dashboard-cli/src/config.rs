//! CLI configuration file.
//!
//! ```toml
//! [table]
//! page_size = 20
//! page_size_options = [10, 20, 50]
//!
//! [grid]
//! row_height = 40
//! margin = [8, 8]
//! reconcile = "match_items"
//!
//! [[grid.breakpoints]]
//! name = "wide"
//! min_width = 1000
//! columns = 12
//!
//! [storage]
//! path = "/tmp/dashboard.db"
//! ```
//!
//! Every section and key is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dashboard_lib::grid::GridConfig;
use dashboard_lib::table::TableConfig;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub table: TableConfig,
    pub grid: GridConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Settings database; the platform data directory when unset.
    pub path: Option<PathBuf>,
}

impl CliConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
