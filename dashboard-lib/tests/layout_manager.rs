use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashboard_lib::error::StoreError;
use dashboard_lib::grid::{
    Breakpoint, Breakpoints, GridConfig, GridItem, GridOptions, GridState, Interaction,
    LayoutHints, LayoutItem, LayoutManager, LayoutOrigin, LayoutSet, PersistedReconcile,
    build_default_layouts, layout_key,
};
use dashboard_lib::store::{KeyValueStore, MemoryStore};

fn breakpoints() -> Breakpoints {
    Breakpoints::new([Breakpoint::new("lg", 1200, 12), Breakpoint::new("sm", 0, 6)])
}

fn defaults_for(ids: &[&str]) -> LayoutSet {
    let items: Vec<GridItem> = ids.iter().map(|id| GridItem::new(*id)).collect();
    build_default_layouts(&items, &breakpoints())
}

fn options(key: &str) -> GridOptions {
    GridConfig::default().options().persistence_key(key)
}

fn moved(layouts: &LayoutSet, id: &str, x: u32, y: u32) -> LayoutSet {
    let mut next = layouts.clone();
    for items in next.values_mut() {
        for item in items.iter_mut().filter(|item| item.i == id) {
            item.x = x;
            item.y = y;
        }
    }
    next
}

fn item<'a>(layouts: &'a LayoutSet, bp: &str, id: &str) -> &'a LayoutItem {
    layouts[bp].iter().find(|item| item.i == id).unwrap()
}

/// A store whose every operation fails.
struct BrokenStore {
    writes: AtomicUsize,
}

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("disk gone".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("quota exceeded".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk gone".into()))
    }

    fn keys_with_prefix(&self, _prefix: &str) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Unavailable("disk gone".into()))
    }
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn test_register_uses_defaults_without_persisted_data() {
    let store = Arc::new(MemoryStore::new());
    let mut manager = LayoutManager::with_store(store);
    let defaults = defaults_for(&["a", "b"]);

    let current = manager.register_grid("overview", defaults.clone(), options("overview"));
    assert_eq!(current, &defaults);
    assert_eq!(
        manager.grid_state("overview"),
        GridState::Registered {
            origin: LayoutOrigin::Default,
            customizing: false
        }
    );
}

#[test]
fn test_register_is_idempotent() {
    let mut manager = LayoutManager::new();
    let defaults = defaults_for(&["a", "b"]);
    manager.register_grid("overview", defaults.clone(), options("overview"));

    let changed = moved(&defaults, "a", 8, 8);
    manager.update_layout("overview", changed.clone());
    manager.register_grid("overview", defaults.clone(), options("overview"));

    assert_eq!(manager.current_layout("overview"), Some(&changed));
}

#[test]
fn test_reregistering_refreshes_defaults_for_reset() {
    let mut manager = LayoutManager::new();
    manager.register_grid("overview", defaults_for(&["a"]), options("overview"));

    let newer = defaults_for(&["a", "b"]);
    manager.register_grid("overview", newer.clone(), options("overview"));
    assert_eq!(manager.current_layout("overview"), Some(&defaults_for(&["a"])));

    assert!(manager.reset_layout("overview"));
    assert_eq!(manager.current_layout("overview"), Some(&newer));
}

#[test]
fn test_unregistered_grid_falls_back() {
    let manager = LayoutManager::new();
    let fallback = defaults_for(&["a"]);

    assert_eq!(manager.grid_state("nope"), GridState::Unregistered);
    assert!(manager.current_layout("nope").is_none());
    assert_eq!(manager.layout_or("nope", &fallback), &fallback);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_update_round_trips_through_store() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let defaults = defaults_for(&["a", "b"]);
    let changed = moved(&defaults, "b", 0, 12);

    let mut first = LayoutManager::with_store(Arc::clone(&store));
    first.register_grid("overview", defaults.clone(), options("sales"));
    first.update_layout("overview", changed.clone());
    assert!(store.get(&layout_key("sales")).unwrap().is_some());

    let mut second = LayoutManager::with_store(Arc::clone(&store));
    let restored = second.register_grid("overview", defaults_for(&["z"]), options("sales"));
    assert_eq!(restored, &changed);
    assert_eq!(
        second.grid_state("overview"),
        GridState::Registered {
            origin: LayoutOrigin::Persisted,
            customizing: false
        }
    );
}

#[test]
fn test_persisted_record_uses_namespaced_key() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut manager = LayoutManager::with_store(Arc::clone(&store));
    manager.register_grid("overview", defaults_for(&["a"]), options("sales"));
    manager.update_layout("overview", defaults_for(&["a"]));

    assert_eq!(
        store.keys_with_prefix("dashboard-layout:").unwrap(),
        vec!["dashboard-layout:sales".to_string()]
    );
}

#[test]
fn test_unparsable_record_falls_back_to_defaults() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store.set(&layout_key("sales"), "{not json").unwrap();

    let mut manager = LayoutManager::with_store(Arc::clone(&store));
    let defaults = defaults_for(&["a"]);
    let current = manager.register_grid("overview", defaults.clone(), options("sales"));
    assert_eq!(current, &defaults);
}

#[test]
fn test_persisted_record_keeps_wire_field_names() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store
        .set(
            &layout_key("sales"),
            r#"{"lg":[{"i":"a","x":1,"y":2,"w":3,"h":4,"minH":2,"static":true,"isDraggable":true}]}"#,
        )
        .unwrap();

    let mut manager = LayoutManager::with_store(Arc::clone(&store));
    let current = manager.register_grid("overview", defaults_for(&["a"]), options("sales"));

    let a = item(current, "lg", "a");
    assert_eq!((a.x, a.y, a.w, a.h), (1, 2, 3, 4));
    assert_eq!(a.min_h, Some(2));
    assert!(a.is_static);
    assert_eq!(a.is_draggable, Some(true));
}

#[test]
fn test_grid_id_is_default_persistence_key() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut manager = LayoutManager::with_store(Arc::clone(&store));
    manager.register_grid("overview", defaults_for(&["a"]), GridOptions::default());
    let saved = defaults_for(&["a", "b"]);
    manager.update_layout("overview", saved.clone());

    assert_eq!(store.keys_with_prefix("").unwrap(), vec![layout_key("overview")]);

    let mut fresh = LayoutManager::with_store(Arc::clone(&store));
    let restored = fresh.register_grid("overview", defaults_for(&["a"]), GridOptions::default());
    assert_eq!(restored, &saved);
}

#[test]
fn test_no_persistence_when_disabled() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut manager = LayoutManager::with_store(Arc::clone(&store));
    let options = GridOptions::default().without_persistence();
    manager.register_grid("overview", defaults_for(&["a"]), options);
    manager.update_layout("overview", defaults_for(&["a", "b"]));
    manager.reset_layout("overview");

    assert!(store.keys_with_prefix("").unwrap().is_empty());
}

#[test]
fn test_unregistered_update_is_not_persisted() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut manager = LayoutManager::with_store(Arc::clone(&store));
    manager.update_layout("ghost", defaults_for(&["a"]));

    assert!(manager.current_layout("ghost").is_some());
    assert!(store.keys_with_prefix("").unwrap().is_empty());
}

#[test]
fn test_store_failures_are_swallowed() {
    let store = Arc::new(BrokenStore {
        writes: AtomicUsize::new(0),
    });
    let mut manager = LayoutManager::with_store(store.clone());
    let defaults = defaults_for(&["a"]);

    let current = manager.register_grid("overview", defaults.clone(), options("sales"));
    assert_eq!(current, &defaults);

    let changed = moved(&defaults, "a", 4, 4);
    manager.update_layout("overview", changed.clone());
    assert_eq!(manager.current_layout("overview"), Some(&changed));
    assert_eq!(store.writes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_reset_restores_and_persists_defaults() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let defaults = defaults_for(&["a"]);

    let mut manager = LayoutManager::with_store(Arc::clone(&store));
    manager.register_grid("overview", defaults.clone(), options("sales"));
    manager.update_layout("overview", moved(&defaults, "a", 6, 6));
    assert!(manager.reset_layout("overview"));

    let mut fresh = LayoutManager::with_store(Arc::clone(&store));
    assert_eq!(
        fresh.register_grid("overview", defaults_for(&["q"]), options("sales")),
        &defaults
    );
}

#[test]
fn test_reset_without_defaults() {
    let mut manager = LayoutManager::new();
    assert!(!manager.reset_layout("nope"));

    manager.update_layout("adhoc", defaults_for(&["a"]));
    assert!(!manager.reset_layout("adhoc"));
    assert_eq!(manager.current_layout("adhoc"), Some(&defaults_for(&["a"])));
}

// =============================================================================
// Persisted reconciliation
// =============================================================================

fn stale_store() -> Arc<dyn KeyValueStore> {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let saved = moved(&defaults_for(&["a", "gone"]), "a", 6, 0);
    store
        .set(&layout_key("sales"), &serde_json::to_string(&saved).unwrap())
        .unwrap();
    store
}

#[test]
fn test_verbatim_keeps_stale_and_misses_new_items() {
    let mut manager = LayoutManager::with_store(stale_store());
    let current = manager.register_grid(
        "overview",
        defaults_for(&["a", "new"]),
        options("sales").reconcile(PersistedReconcile::Verbatim),
    );

    let ids: Vec<&str> = current["lg"].iter().map(|item| item.i.as_str()).collect();
    assert_eq!(ids, vec!["a", "gone"]);
}

#[test]
fn test_match_items_drops_stale_and_appends_new() {
    let mut manager = LayoutManager::with_store(stale_store());
    let current = manager.register_grid(
        "overview",
        defaults_for(&["a", "new"]),
        options("sales").reconcile(PersistedReconcile::MatchItems),
    );

    for bp in ["lg", "sm"] {
        let ids: Vec<&str> = current[bp].iter().map(|item| item.i.as_str()).collect();
        assert_eq!(ids, vec!["a", "new"]);
    }
    // The persisted placement of surviving items wins
    assert_eq!(item(current, "lg", "a").x, 6);
}

// =============================================================================
// Auto height
// =============================================================================

#[test]
fn test_adjust_height_scenario() {
    let mut manager = LayoutManager::new();
    manager.register_grid("overview", defaults_for(&["a", "b"]), options("sales"));

    assert!(manager.adjust_item_height("overview", "a", 500.0));
    let current = manager.current_layout("overview").unwrap();
    assert_eq!(item(current, "lg", "a").h, 7);
    assert_eq!(item(current, "sm", "a").h, 7);
    assert_eq!(item(current, "lg", "b").h, 4);
}

#[test]
fn test_adjust_height_respects_bounds() {
    let items = vec![
        GridItem::new("capped").layout(LayoutHints::default().height_bounds(None, Some(5))),
        GridItem::new("floored").layout(LayoutHints::default().height_bounds(Some(3), None)),
    ];
    let mut manager = LayoutManager::new();
    manager.register_grid(
        "overview",
        build_default_layouts(&items, &breakpoints()),
        options("sales"),
    );

    manager.adjust_item_height("overview", "capped", 500.0);
    manager.adjust_item_height("overview", "floored", 10.0);

    let current = manager.current_layout("overview").unwrap();
    assert_eq!(item(current, "lg", "capped").h, 5);
    assert_eq!(item(current, "lg", "floored").h, 3);
}

#[test]
fn test_adjust_height_minimum_is_one_row() {
    let mut manager = LayoutManager::new();
    manager.register_grid("overview", defaults_for(&["a"]), options("sales"));

    assert!(manager.adjust_item_height("overview", "a", 0.0));
    assert_eq!(item(manager.current_layout("overview").unwrap(), "lg", "a").h, 1);
}

#[test]
fn test_adjust_height_unchanged_does_not_write() {
    let store = Arc::new(BrokenStore {
        writes: AtomicUsize::new(0),
    });
    let mut manager = LayoutManager::with_store(store.clone());
    manager.register_grid("overview", defaults_for(&["a"]), options("sales"));

    // 4 rows of 60px with 16px margins: 4 * 76 - 16 = 288px
    assert!(!manager.adjust_item_height("overview", "a", 288.0));
    assert!(!manager.adjust_item_height("overview", "missing", 900.0));
    assert!(!manager.adjust_item_height("unknown", "a", 900.0));
    assert_eq!(store.writes.load(Ordering::SeqCst), 0);

    assert!(manager.adjust_item_height("overview", "a", 289.0));
    assert_eq!(store.writes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_adjust_height_skips_breakpoints_without_item() {
    let mut layouts = defaults_for(&["a"]);
    layouts.get_mut("sm").unwrap().clear();

    let mut manager = LayoutManager::new();
    manager.register_grid("overview", layouts, options("sales"));
    assert!(manager.adjust_item_height("overview", "a", 100.0));

    let current = manager.current_layout("overview").unwrap();
    assert_eq!(item(current, "lg", "a").h, 2);
    assert!(current["sm"].is_empty());
}

// =============================================================================
// Customization
// =============================================================================

#[test]
fn test_customization_is_global() {
    let mut manager = LayoutManager::new();
    manager.register_grid("one", defaults_for(&["a"]), GridOptions::default());
    manager.register_grid("two", defaults_for(&["b"]), GridOptions::default());

    manager.start_customization();
    for id in ["one", "two"] {
        assert_eq!(
            manager.grid_state(id),
            GridState::Registered {
                origin: LayoutOrigin::Default,
                customizing: true
            }
        );
    }

    assert!(!manager.toggle_customization());
    assert!(!manager.is_customizing());
}

#[test]
fn test_interaction_rules() {
    let mut manager = LayoutManager::new();
    let plain = LayoutItem::new("a", 0, 0, 4, 4);
    let mut pinned = LayoutItem::new("b", 4, 0, 4, 4);
    pinned.is_static = true;
    let mut pinned_but_resizable = pinned.clone();
    pinned_but_resizable.is_resizable = Some(true);

    assert_eq!(manager.interaction(&plain), Interaction::default());

    manager.start_customization();
    assert_eq!(
        manager.interaction(&plain),
        Interaction {
            draggable: true,
            resizable: true
        }
    );
    assert_eq!(manager.interaction(&pinned), Interaction::default());
    assert_eq!(
        manager.interaction(&pinned_but_resizable),
        Interaction {
            draggable: false,
            resizable: true
        }
    );

    manager.stop_customization();
    assert_eq!(manager.interaction(&plain), Interaction::default());
}
