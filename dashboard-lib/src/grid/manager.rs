//! Registry of grid layouts with persistence and auto-height adjustment.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::store::KeyValueStore;

use super::config::{GridOptions, PersistedReconcile};
use super::layout::{LayoutItem, LayoutSet};
use super::persist::{read_layouts, write_layouts};

/// Where a grid's layout came from when it was registered (or last reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOrigin {
    Persisted,
    Default,
}

/// Lifecycle of a grid id within a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridState {
    Unregistered,
    Registered {
        origin: LayoutOrigin,
        /// Mirrors the manager-wide customization flag.
        customizing: bool,
    },
}

/// Whether an item may currently be dragged or resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interaction {
    pub draggable: bool,
    pub resizable: bool,
}

#[derive(Debug, Clone)]
struct GridEntry {
    current: LayoutSet,
    /// `None` for grids only ever touched through `update_layout`.
    defaults: Option<LayoutSet>,
    options: GridOptions,
    /// Resolved from the options at registration.
    storage_key: Option<String>,
    origin: LayoutOrigin,
}

/// Owns the current layout set of every grid in a dashboard.
///
/// The manager tracks:
/// - The current and default layout set per grid id
/// - Each grid's persistence key and row metrics
/// - A dashboard-wide customization flag gating drag and resize
///
/// Entries are created on first registration and live as long as the
/// manager. Store failures are logged and never surfaced.
pub struct LayoutManager {
    store: Option<Arc<dyn KeyValueStore>>,
    grids: HashMap<String, GridEntry>,
    customizing: bool,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LayoutManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutManager")
            .field("store", &self.store.is_some())
            .field("grids", &self.grids)
            .field("customizing", &self.customizing)
            .finish()
    }
}

impl LayoutManager {
    /// A manager without persistence.
    pub fn new() -> Self {
        Self {
            store: None,
            grids: HashMap::new(),
            customizing: false,
        }
    }

    /// A manager persisting layouts to `store`.
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::new()
        }
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Register a grid, or refresh the registration of a known one.
    ///
    /// On first registration the persisted layout set (if the grid
    /// persists and a readable record exists) becomes current;
    /// otherwise `defaults` does. Later calls keep the current layout set
    /// but record the new defaults and options, so a reset uses the latest
    /// defaults. Without an explicit persistence key the grid id is used.
    pub fn register_grid(
        &mut self,
        grid_id: impl Into<String>,
        defaults: LayoutSet,
        options: GridOptions,
    ) -> &LayoutSet {
        match self.grids.entry(grid_id.into()) {
            Entry::Occupied(occupied) => {
                let storage_key = options.storage_key(occupied.key());
                let entry = occupied.into_mut();
                entry.defaults = Some(defaults);
                entry.options = options;
                entry.storage_key = storage_key;
                &entry.current
            }
            Entry::Vacant(vacant) => {
                let storage_key = options.storage_key(vacant.key());
                let persisted = match (self.store.as_deref(), storage_key.as_deref()) {
                    (Some(store), Some(key)) => read_layouts(store, key),
                    _ => None,
                };

                let (current, origin) = match persisted {
                    Some(saved) => (
                        reconcile(saved, &defaults, options.reconcile),
                        LayoutOrigin::Persisted,
                    ),
                    None => (defaults.clone(), LayoutOrigin::Default),
                };
                debug!("Registered grid {} using {:?} layout", vacant.key(), origin);

                let entry = vacant.insert(GridEntry {
                    current,
                    defaults: Some(defaults),
                    options,
                    storage_key,
                    origin,
                });
                &entry.current
            }
        }
    }

    /// Current layout set of a registered grid.
    pub fn current_layout(&self, grid_id: &str) -> Option<&LayoutSet> {
        self.grids.get(grid_id).map(|entry| &entry.current)
    }

    /// Current layout set, or `fallback` if the grid is not registered yet.
    pub fn layout_or<'a>(&'a self, grid_id: &str, fallback: &'a LayoutSet) -> &'a LayoutSet {
        self.current_layout(grid_id).unwrap_or(fallback)
    }

    /// Recorded default layout set.
    pub fn default_layout(&self, grid_id: &str) -> Option<&LayoutSet> {
        self.grids.get(grid_id).and_then(|entry| entry.defaults.as_ref())
    }

    /// Registration options of a grid.
    pub fn options(&self, grid_id: &str) -> Option<&GridOptions> {
        self.grids.get(grid_id).map(|entry| &entry.options)
    }

    /// Registered grid ids, in no particular order.
    pub fn grid_ids(&self) -> impl Iterator<Item = &str> {
        self.grids.keys().map(String::as_str)
    }

    pub fn grid_state(&self, grid_id: &str) -> GridState {
        match self.grids.get(grid_id) {
            Some(entry) => GridState::Registered {
                origin: entry.origin,
                customizing: self.customizing,
            },
            None => GridState::Unregistered,
        }
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Replace a grid's current layout set and persist it.
    pub fn update_layout(&mut self, grid_id: &str, layouts: LayoutSet) {
        let entry = self.grids.entry(grid_id.to_string()).or_insert_with(|| {
            debug!("Layout update for unregistered grid {}", grid_id);
            GridEntry {
                current: LayoutSet::new(),
                defaults: None,
                options: GridOptions::default(),
                storage_key: None,
                origin: LayoutOrigin::Default,
            }
        });
        entry.current = layouts;
        persist(self.store.as_deref(), entry);
    }

    /// Restore the recorded defaults. Returns `false` if none are recorded.
    pub fn reset_layout(&mut self, grid_id: &str) -> bool {
        let Some(entry) = self.grids.get_mut(grid_id) else {
            return false;
        };
        let Some(defaults) = entry.defaults.clone() else {
            return false;
        };

        debug!("Resetting grid {} to defaults", grid_id);
        entry.current = defaults;
        entry.origin = LayoutOrigin::Default;
        persist(self.store.as_deref(), entry);
        true
    }

    /// Fit an item's height to `content_height` pixels of content at every
    /// breakpoint.
    ///
    /// The required row span is clamped to the entry's `[minH, maxH]`
    /// (`minH` defaults to 1). Breakpoints lacking the item are skipped.
    /// Returns `true` if any height changed, in which case the layout set
    /// is persisted.
    pub fn adjust_item_height(&mut self, grid_id: &str, item_id: &str, content_height: f64) -> bool {
        let Some(entry) = self.grids.get_mut(grid_id) else {
            return false;
        };

        let required = entry.options.required_rows(content_height);
        let mut changed = false;

        for (breakpoint, items) in entry.current.iter_mut() {
            let Some(item) = items.iter_mut().find(|item| item.i == item_id) else {
                continue;
            };

            let floor = required.max(item.min_h.unwrap_or(1));
            let next = item.max_h.map_or(floor, |max_h| floor.min(max_h));
            if next != item.h {
                trace!(
                    "Grid {} item {} at {}: h {} -> {}",
                    grid_id, item_id, breakpoint, item.h, next
                );
                item.h = next;
                changed = true;
            }
        }

        if changed {
            persist(self.store.as_deref(), entry);
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Customization
    // -------------------------------------------------------------------------

    /// Allow drag and resize on every grid.
    pub fn start_customization(&mut self) {
        self.customizing = true;
    }

    pub fn stop_customization(&mut self) {
        self.customizing = false;
    }

    pub fn toggle_customization(&mut self) -> bool {
        self.customizing = !self.customizing;
        self.customizing
    }

    pub fn is_customizing(&self) -> bool {
        self.customizing
    }

    /// Drag/resize permissions for `item`.
    ///
    /// Nothing moves outside customization. While customizing, static items
    /// are fixed unless their own `isDraggable`/`isResizable` says otherwise.
    pub fn interaction(&self, item: &LayoutItem) -> Interaction {
        if !self.customizing {
            return Interaction::default();
        }
        Interaction {
            draggable: item.is_draggable.unwrap_or(!item.is_static),
            resizable: item.is_resizable.unwrap_or(!item.is_static),
        }
    }
}

fn persist(store: Option<&dyn KeyValueStore>, entry: &GridEntry) {
    if let (Some(store), Some(key)) = (store, entry.storage_key.as_deref()) {
        write_layouts(store, key, &entry.current);
    }
}

/// Apply the reconciliation policy to a persisted layout set.
fn reconcile(saved: LayoutSet, defaults: &LayoutSet, policy: PersistedReconcile) -> LayoutSet {
    match policy {
        PersistedReconcile::Verbatim => saved,
        PersistedReconcile::MatchItems => {
            let known: HashSet<&str> = defaults
                .values()
                .flatten()
                .map(|item| item.i.as_str())
                .collect();

            defaults
                .iter()
                .map(|(breakpoint, default_items)| {
                    let items = match saved.get(breakpoint) {
                        Some(saved_items) => {
                            let mut items: Vec<LayoutItem> = saved_items
                                .iter()
                                .filter(|item| known.contains(item.i.as_str()))
                                .cloned()
                                .collect();
                            for default_item in default_items {
                                if !items.iter().any(|item| item.i == default_item.i) {
                                    items.push(default_item.clone());
                                }
                            }
                            items
                        }
                        None => default_items.clone(),
                    };
                    (breakpoint.clone(), items)
                })
                .collect()
        }
    }
}
