//! Tests for the persistence gateway and key-value stores.

use std::fs;

use strata_core::{
    Engine, EngineConfig, FileStore, KeyValueStore, Layer, LayerId, LayerState, MemoryStore,
    PersistenceGateway, StorageError,
};

const KEY: &str = "layoutHighlighterState";

fn sample_state() -> LayerState {
    LayerState {
        layers: vec![
            Layer {
                id: LayerId(1_700_000_000_000),
                selector: "body > *".to_string(),
                color: "#f42525".to_string(),
                enabled: true,
            },
            Layer {
                id: LayerId(1_700_000_000_500),
                selector: "body > * > *".to_string(),
                color: "#123abc".to_string(),
                enabled: false,
            },
        ],
        color_counter: 5,
    }
}

#[test]
fn test_round_trip_memory_store() {
    let mut gateway = PersistenceGateway::new(MemoryStore::new(), KEY);
    gateway.save(&sample_state()).unwrap();
    assert_eq!(gateway.load(), sample_state());
    assert_eq!(gateway.store().writes(), 1);
}

#[test]
fn test_record_format() {
    let mut gateway = PersistenceGateway::new(MemoryStore::new(), KEY);
    let state = LayerState {
        layers: vec![Layer {
            id: LayerId(7),
            selector: "body > *".to_string(),
            color: "#f42525".to_string(),
            enabled: true,
        }],
        color_counter: 1,
    };
    gateway.save(&state).unwrap();
    let record: serde_json::Value =
        serde_json::from_str(gateway.store().raw(KEY).unwrap()).unwrap();
    assert_eq!(
        record,
        serde_json::json!({
            "layers": [{"id": 7, "selector": "body > *", "color": "#f42525", "enabled": true}],
            "colorCounter": 1
        })
    );
}

#[test]
fn test_missing_key_loads_default() {
    let gateway = PersistenceGateway::new(MemoryStore::new(), KEY);
    assert_eq!(gateway.load(), LayerState::default());
}

#[test]
fn test_corrupt_record_loads_default() {
    for record in ["{not json", "[]", "{\"layers\": 5}", "{\"colorCounter\": -1}", "\"text\""] {
        let gateway = PersistenceGateway::new(MemoryStore::with_entry(KEY, record), KEY);
        assert_eq!(gateway.load(), LayerState::default(), "{record}");
    }
}

#[test]
fn test_duplicate_ids_count_as_corrupt() {
    let record = r##"{"layers":[
        {"id":1,"selector":"body > *","color":"#f42525","enabled":true},
        {"id":1,"selector":"body > * > *","color":"#c0f425","enabled":true}
    ],"colorCounter":2}"##;
    assert!(PersistenceGateway::<MemoryStore>::decode(record).is_none());
}

#[test]
fn test_lenient_fields() {
    let state = PersistenceGateway::<MemoryStore>::decode("{}").unwrap();
    assert_eq!(state, LayerState::default());

    let state =
        PersistenceGateway::<MemoryStore>::decode(r#"{"layers":null,"colorCounter":null}"#).unwrap();
    assert_eq!(state, LayerState::default());

    let state = PersistenceGateway::<MemoryStore>::decode(
        r##"{"layers":[{"id":3,"selector":"body > *","color":"#fff"}],"colorCounter":1}"##,
    )
    .unwrap();
    assert!(state.layers[0].enabled);
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut gateway = PersistenceGateway::new(FileStore::new(&path), KEY);
    assert_eq!(gateway.load(), LayerState::default());
    gateway.save(&sample_state()).unwrap();

    let reopened = PersistenceGateway::new(FileStore::new(&path), KEY);
    assert_eq!(reopened.load(), sample_state());
}

#[test]
fn test_file_store_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let mut store = FileStore::new(&path);
    store.set("other", "value".to_string()).unwrap();
    store.set(KEY, "{}".to_string()).unwrap();

    assert_eq!(store.get("other").unwrap().as_deref(), Some("value"));
    store.remove(KEY).unwrap();
    assert_eq!(store.get(KEY).unwrap(), None);
    assert_eq!(store.get("other").unwrap().as_deref(), Some("value"));
}

#[test]
fn test_file_store_empty_file_is_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "").unwrap();
    assert_eq!(FileStore::new(&path).get(KEY).unwrap(), None);
}

#[test]
fn test_file_store_format_error_degrades_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(store.get(KEY), Err(StorageError::Format { .. })));

    let gateway = PersistenceGateway::new(FileStore::new(&path), KEY);
    assert_eq!(gateway.load(), LayerState::default());
}

#[test]
fn test_file_store_corrupt_file_is_overwritten_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "not json at all").unwrap();

    let mut engine = Engine::start(&EngineConfig::default(), FileStore::new(&path));
    assert!(engine.layers().is_empty());
    let (id, _) = engine.add_layer().unwrap();

    let reloaded = PersistenceGateway::new(FileStore::new(&path), KEY).load();
    assert_eq!(reloaded.layers.len(), 1);
    assert_eq!(reloaded.layers[0].id, id);
    assert_eq!(reloaded.color_counter, 1);
}

#[test]
fn test_file_store_remove_replaces_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "{\"layers\": ").unwrap();

    let mut store = FileStore::new(&path);
    store.remove(KEY).unwrap();
    assert_eq!(store.get(KEY).unwrap(), None);
    store.set("other", "value".to_string()).unwrap();
    assert_eq!(store.get("other").unwrap().as_deref(), Some("value"));
}
