//! Tests for layer store mutations.

use strata_core::{ColorAllocator, LayerId, LayerState, LayerStore, selector_for_depth};

fn nesting_segments(selector: &str) -> usize {
    selector.matches(" > *").count()
}

#[test]
fn test_selector_for_depth() {
    assert_eq!(selector_for_depth(0), "body");
    assert_eq!(selector_for_depth(1), "body > *");
    assert_eq!(selector_for_depth(3), "body > * > * > *");
}

#[test]
fn test_add_layer_defaults() {
    let mut store = LayerStore::default();
    let id = store.add_layer();
    let layer = store.get(id).unwrap();
    assert_eq!(layer.selector, "body > *");
    assert_eq!(layer.color, "#f42525");
    assert!(layer.enabled);
    assert_eq!(store.color_counter(), 1);
}

#[test]
fn test_ids_strictly_increase() {
    let mut store = LayerStore::default();
    let ids: Vec<LayerId> = (0..10).map(|_| store.add_layer()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_add_add_delete_first() {
    let mut store = LayerStore::default();
    let first = store.add_layer();
    let second = store.add_layer();

    assert!(store.delete_layer(first));

    assert_eq!(store.len(), 1);
    let remaining = &store.layers()[0];
    assert_eq!(remaining.id, second);
    assert_eq!(nesting_segments(&remaining.selector), 2);
    assert_eq!(remaining.color, ColorAllocator::default().color_at(1));
    assert_eq!(store.color_counter(), 2);
}

#[test]
fn test_delete_then_add_shares_depth() {
    // Selectors are never renumbered, so two layers can target the same depth.
    let mut store = LayerStore::default();
    let first = store.add_layer();
    let _ = store.add_layer();
    let _ = store.delete_layer(first);
    let third = store.add_layer();

    let selectors: Vec<&str> = store.layers().iter().map(|l| l.selector.as_str()).collect();
    assert_eq!(selectors, vec!["body > * > *", "body > * > *"]);
    assert_eq!(store.get(third).unwrap().color, "#25f48c");
    assert_eq!(store.color_counter(), 3);
}

#[test]
fn test_clear_all_resets_counter_and_colors() {
    let mut store = LayerStore::default();
    for _ in 0..3 {
        let _ = store.add_layer();
    }
    store.clear_all();
    assert!(store.is_empty());
    assert_eq!(store.color_counter(), 0);

    let id = store.add_layer();
    assert_eq!(store.get(id).unwrap().color, "#f42525");
    assert_eq!(store.get(id).unwrap().selector, "body > *");
}

#[test]
fn test_ids_stay_unique_across_clear() {
    let mut store = LayerStore::default();
    let before = store.add_layer();
    store.clear_all();
    let after = store.add_layer();
    assert!(after > before);
}

#[test]
fn test_mutations_on_missing_id_are_noops() {
    let mut store = LayerStore::default();
    let id = store.add_layer();
    let snapshot = store.state().clone();
    let missing = LayerId(id.0 + 1000);

    assert!(!store.delete_layer(missing));
    assert!(!store.set_enabled(missing, false));
    assert!(!store.set_color(missing, "#000000"));
    assert_eq!(store.state(), &snapshot);
}

#[test]
fn test_set_enabled_and_color() {
    let mut store = LayerStore::default();
    let id = store.add_layer();

    assert!(store.set_enabled(id, false));
    assert!(!store.get(id).unwrap().enabled);

    assert!(store.set_color(id, "not a color"));
    assert_eq!(store.get(id).unwrap().color, "not a color");
    assert_eq!(store.color_counter(), 1);
}

#[test]
fn test_from_state_continues_counter_and_ids() {
    let mut seed = LayerStore::default();
    let old = seed.add_layer();
    let _ = seed.add_layer();
    let state: LayerState = seed.state().clone();

    let mut store = LayerStore::from_state(state, ColorAllocator::default());
    let new = store.add_layer();

    assert!(new > old);
    assert_eq!(store.get(new).unwrap().selector, "body > * > * > *");
    assert_eq!(store.get(new).unwrap().color, "#25f48c");
    assert_eq!(store.color_counter(), 3);
}
