//! Persisted user preferences.

use std::sync::Arc;

use log::warn;

use crate::store::KeyValueStore;

/// Store key of the zoom level.
pub const ZOOM_STORAGE_KEY: &str = "dashboard-zoom-level";
pub const DEFAULT_ZOOM: u32 = 100;
pub const MIN_ZOOM: u32 = 50;
pub const MAX_ZOOM: u32 = 200;
pub const ZOOM_STEP: u32 = 10;

/// Dashboard zoom level in percent, persisted on every change.
pub struct ZoomPreference {
    store: Arc<dyn KeyValueStore>,
    level: u32,
}

impl std::fmt::Debug for ZoomPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoomPreference")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl ZoomPreference {
    /// Load the stored level. Missing, unreadable or out-of-range values
    /// yield [`DEFAULT_ZOOM`].
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let level = match store.get(ZOOM_STORAGE_KEY) {
            Ok(Some(raw)) => parse_zoom(&raw).unwrap_or(DEFAULT_ZOOM),
            Ok(None) => DEFAULT_ZOOM,
            Err(e) => {
                warn!("Failed to read zoom level: {}", e);
                DEFAULT_ZOOM
            }
        };
        Self { store, level }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Font scale factor for the current level (`1.0` at 100%).
    pub fn scale(&self) -> f64 {
        f64::from(self.level) / 100.0
    }

    pub fn increase(&mut self) -> u32 {
        self.apply((self.level + ZOOM_STEP).min(MAX_ZOOM))
    }

    pub fn decrease(&mut self) -> u32 {
        self.apply(self.level.saturating_sub(ZOOM_STEP).max(MIN_ZOOM))
    }

    pub fn reset(&mut self) -> u32 {
        self.apply(DEFAULT_ZOOM)
    }

    fn apply(&mut self, level: u32) -> u32 {
        self.level = level;
        if let Err(e) = self.store.set(ZOOM_STORAGE_KEY, &level.to_string()) {
            warn!("Failed to save zoom level: {}", e);
        }
        level
    }
}

/// Parse a stored level, reading its leading digits (`"120%"` is 120).
fn parse_zoom(raw: &str) -> Option<u32> {
    let raw = raw.trim_start();
    let end = raw
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(raw.len(), |(i, _)| i);
    raw[..end]
        .parse::<u32>()
        .ok()
        .filter(|level| (MIN_ZOOM..=MAX_ZOOM).contains(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zoom() {
        assert_eq!(parse_zoom("120"), Some(120));
        assert_eq!(parse_zoom(" 90%"), Some(90));
        assert_eq!(parse_zoom("300"), None);
        assert_eq!(parse_zoom("40"), None);
        assert_eq!(parse_zoom("-100"), None);
        assert_eq!(parse_zoom("abc"), None);
        assert_eq!(parse_zoom(""), None);
    }
}
