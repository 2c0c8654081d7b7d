//! Property tests over random operation sequences.

use std::collections::{HashMap, HashSet};

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use strata_core::{Engine, EngineConfig, LayerId, LayerState, MemoryStore, PersistenceGateway};

/// One user action. Indices pick an existing layer modulo the count; an
/// out-of-range pick targets an id that does not exist.
#[derive(Debug, Clone)]
enum Op {
    Add,
    Delete(u8),
    Toggle(u8, bool),
    Recolor(u8),
    Clear,
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 10 {
            0..=3 => Self::Add,
            4 | 5 => Self::Delete(u8::arbitrary(g)),
            6 | 7 => Self::Toggle(u8::arbitrary(g), bool::arbitrary(g)),
            8 => Self::Recolor(u8::arbitrary(g)),
            _ => Self::Clear,
        }
    }
}

fn pick(engine: &Engine<MemoryStore>, index: u8) -> LayerId {
    let layers = engine.layers();
    let index = usize::from(index);
    if index < layers.len() * 2 {
        layers.get(index % layers.len().max(1)).map_or(LayerId(0), |l| l.id)
    } else {
        LayerId(u64::MAX)
    }
}

fn apply(engine: &mut Engine<MemoryStore>, op: &Op) {
    match *op {
        Op::Add => {
            let _ = engine.add_layer().unwrap();
        }
        Op::Delete(i) => {
            let id = pick(engine, i);
            let _ = engine.delete_layer(id).unwrap();
        }
        Op::Toggle(i, enabled) => {
            let id = pick(engine, i);
            let _ = engine.set_enabled(id, enabled).unwrap();
        }
        Op::Recolor(i) => {
            let id = pick(engine, i);
            let _ = engine.set_color(id, "#abcdef").unwrap();
        }
        Op::Clear => {
            let _ = engine.clear_all().unwrap();
        }
    }
}

#[quickcheck]
fn prop_counter_monotonic_except_clear(ops: Vec<Op>) -> bool {
    let mut engine = Engine::new(&EngineConfig::default(), MemoryStore::new());
    ops.iter().all(|op| {
        let before = engine.color_counter();
        apply(&mut engine, op);
        let after = engine.color_counter();
        match op {
            Op::Clear => after == 0,
            Op::Add => after == before + 1,
            _ => after == before,
        }
    })
}

#[quickcheck]
fn prop_ids_unique_and_selectors_fixed(ops: Vec<Op>) -> bool {
    let mut engine = Engine::new(&EngineConfig::default(), MemoryStore::new());
    let mut selector_at_creation = HashMap::new();
    for op in &ops {
        let count_before = engine.layers().len();
        apply(&mut engine, op);
        if matches!(op, Op::Add) {
            let Some(added) = engine.layers().last() else {
                return false;
            };
            if added.selector.matches(" > *").count() != count_before + 1 {
                return false;
            }
            let _ = selector_at_creation.insert(added.id, added.selector.clone());
        }
        let ids: HashSet<LayerId> = engine.layers().iter().map(|l| l.id).collect();
        if ids.len() != engine.layers().len() {
            return false;
        }
        if engine
            .layers()
            .iter()
            .any(|l| selector_at_creation.get(&l.id) != Some(&l.selector))
        {
            return false;
        }
    }
    true
}

#[quickcheck]
fn prop_stylesheet_lists_enabled_layers_in_order(ops: Vec<Op>) -> bool {
    let mut engine = Engine::new(&EngineConfig::default(), MemoryStore::new());
    for op in &ops {
        apply(&mut engine, op);
    }
    let css = engine.stylesheet();
    let lines: Vec<&str> = css.lines().collect();
    let enabled: Vec<String> = engine
        .layers()
        .iter()
        .filter(|l| l.enabled)
        .map(|l| engine.synthesizer().layer_rule(l))
        .collect();
    lines.len() == enabled.len() + 1
        && lines.iter().zip(&enabled).all(|(line, rule)| line == rule)
        && lines.last() == Some(&engine.synthesizer().suppression_rule().as_str())
}

#[quickcheck]
fn prop_persisted_state_round_trips(ops: Vec<Op>) -> bool {
    let mut engine = Engine::new(&EngineConfig::default(), MemoryStore::new());
    for op in &ops {
        apply(&mut engine, op);
    }
    let expected: LayerState = if ops.is_empty() {
        LayerState::default()
    } else {
        engine.state().clone()
    };
    let gateway = PersistenceGateway::new(engine.store().clone(), "layoutHighlighterState");
    gateway.load() == expected
}
