#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use drive_evo::simulation::brain::Brain;
use drive_evo::simulation::error::SimError;
use drive_evo::simulation::params::Params;
use drive_evo::simulation::persistence::{BrainStore, JsonFileStore, MemoryStore};
use std::fs;

fn assert_same_weights(a: &Brain, b: &Brain) {
    assert_eq!(a.shape(), b.shape());
    for (la, lb) in a.layers.iter().zip(&b.layers) {
        for (x, y) in la.weights.iter().zip(&lb.weights) {
            assert!((x - y).abs() < 1e-6);
        }
        for (x, y) in la.biases.iter().zip(&lb.biases) {
            assert!((x - y).abs() < 1e-6);
        }
    }
}

#[test]
fn test_file_store_round_trip() {
    let save_path = "test_brain_round_trip.json";
    let brain = Brain::new(&[9, 10, 6, 4]).unwrap();
    let mut store = JsonFileStore::new(save_path);

    store.save(&brain).expect("Failed to save brain");
    let loaded = store
        .load()
        .expect("Failed to load brain")
        .expect("Store should hold a brain");

    assert_same_weights(&brain, &loaded);

    fs::remove_file(save_path).ok();
}

#[test]
fn test_file_store_writes_timestamped_json() {
    let save_path = "test_brain_json_valid.json";
    let mut store = JsonFileStore::new(save_path);
    store.save(&Brain::new(&[3, 4]).unwrap()).unwrap();

    let json_content = fs::read_to_string(save_path).expect("Failed to read save file");
    let parsed: serde_json::Value = serde_json::from_str(&json_content).expect("Invalid JSON");

    let saved_at = parsed.get("saved_at").and_then(|v| v.as_str()).unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(saved_at).is_ok());
    assert!(parsed.get("brain").and_then(|b| b.get("layers")).is_some());

    fs::remove_file(save_path).ok();
}

#[test]
fn test_missing_file_loads_nothing() {
    let store = JsonFileStore::new("nonexistent_brain_file.json");
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_invalid_json_is_an_error() {
    let invalid_path = "test_brain_invalid.json";
    fs::write(invalid_path, "{ this is not valid json }").expect("Failed to write test file");

    let result = JsonFileStore::new(invalid_path).load();
    assert!(matches!(result, Err(SimError::Json(_))));

    fs::remove_file(invalid_path).ok();
}

#[test]
fn test_discard_removes_file() {
    let save_path = "test_brain_discard.json";
    let mut store = JsonFileStore::new(save_path);
    store.save(&Brain::new(&[3, 4]).unwrap()).unwrap();
    assert!(store.path().exists());

    store.discard().unwrap();

    assert!(!store.path().exists());
    assert!(store.load().unwrap().is_none());
    // discarding twice is fine
    store.discard().unwrap();
}

#[test]
fn test_memory_store_round_trip_and_discard() {
    let brain = Brain::new(&[4, 5, 4]).unwrap();
    let mut store = MemoryStore::new();
    assert!(store.load().unwrap().is_none());

    store.save(&brain).unwrap();
    assert!(store.raw().is_some());
    assert_same_weights(&brain, &store.load().unwrap().unwrap());

    store.discard().unwrap();
    assert!(store.raw().is_none());
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_structurally_broken_brain_is_rejected() {
    let mut store = MemoryStore::new();
    // second layer expects 3 inputs but the first produces 2
    store.set_raw(
        r#"{
            "saved_at": "2024-01-01T00:00:00+00:00",
            "brain": {
                "layers": [
                    {
                        "weights": {"v": 1, "dim": [1, 2], "data": [0.1, 0.2]},
                        "biases": {"v": 1, "dim": [2], "data": [0.0, 0.0]}
                    },
                    {
                        "weights": {"v": 1, "dim": [3, 1], "data": [0.1, 0.2, 0.3]},
                        "biases": {"v": 1, "dim": [1], "data": [0.0]}
                    }
                ]
            }
        }"#,
    );

    assert!(matches!(
        store.load(),
        Err(SimError::LayerMismatch { index: 1, .. })
    ));
}

#[test]
fn test_params_save_and_load() {
    let save_path = "test_params.json";
    let params = Params {
        population_size: 42,
        hidden_layers: vec![8],
        manual_vehicle: true,
        ..Params::default()
    };

    params.save_to_file(save_path).expect("Failed to save params");
    let loaded = Params::load_from_file(save_path).expect("Failed to load params");

    assert_eq!(loaded, params);
    assert_eq!(loaded.layer_sizes(), vec![9, 8, 4]);

    fs::remove_file(save_path).ok();
}

#[test]
fn test_invalid_params_file_is_rejected() {
    let save_path = "test_params_invalid.json";
    let params = Params {
        hidden_layers: vec![6, 0],
        ..Params::default()
    };
    params.save_to_file(save_path).unwrap();

    let result = Params::load_from_file(save_path);
    assert!(matches!(result, Err(SimError::InvalidParams(_))));

    fs::remove_file(save_path).ok();
}

#[test]
fn test_validate_rejects_bad_sensor_and_body_values() {
    let mut broken = Vec::new();

    let mut params = Params::default();
    params.sensor.ray_length = 0.0;
    broken.push(params);

    let mut params = Params::default();
    params.sensor.ray_length = f32::NAN;
    broken.push(params);

    let mut params = Params::default();
    params.sensor.ray_spread = f32::NAN;
    broken.push(params);

    let mut params = Params::default();
    params.vehicle.friction = -0.1;
    broken.push(params);

    let mut params = Params::default();
    params.vehicle.acceleration = -0.2;
    broken.push(params);

    let mut params = Params::default();
    params.vehicle.max_speed = f32::NAN;
    broken.push(params);

    for params in broken {
        assert!(matches!(params.validate(), Err(SimError::InvalidParams(_))));
    }
    assert!(Params::default().validate().is_ok());
}
