//! Reading and writing persisted layout sets.

use log::{debug, warn};

use crate::store::KeyValueStore;

use super::layout::LayoutSet;

/// Namespace prefix for persisted layouts.
pub const LAYOUT_KEY_PREFIX: &str = "dashboard-layout";

/// Store key for a grid's persistence key.
pub fn layout_key(persistence_key: &str) -> String {
    format!("{}:{}", LAYOUT_KEY_PREFIX, persistence_key)
}

/// Parse a persisted layout record.
pub fn parse_layouts(raw: &str) -> Result<LayoutSet, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Load the layout set persisted under `persistence_key`.
///
/// Missing, unreadable and unparsable records all yield `None`.
pub fn read_layouts(store: &dyn KeyValueStore, persistence_key: &str) -> Option<LayoutSet> {
    let key = layout_key(persistence_key);
    let raw = match store.get(&key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to read layout {}: {}", key, e);
            return None;
        }
    };

    match parse_layouts(&raw) {
        Ok(layouts) => Some(layouts),
        Err(e) => {
            debug!("Discarding unparsable layout {}: {}", key, e);
            None
        }
    }
}

/// Persist `layouts` under `persistence_key`. Failures are logged and
/// reported as `false`.
pub fn write_layouts(store: &dyn KeyValueStore, persistence_key: &str, layouts: &LayoutSet) -> bool {
    let key = layout_key(persistence_key);
    let raw = match serde_json::to_string(layouts) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Failed to serialize layout {}: {}", key, e);
            return false;
        }
    };

    match store.set(&key, &raw) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to persist layout {}: {}", key, e);
            false
        }
    }
}
