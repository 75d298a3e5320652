//! Tests for loading pool configuration from disk

use std::fs;

use recycler::{ArenaFactory, PoolConfig, PoolConfigBuilder, RecyclerError, RecyclingPool};
use tempfile::TempDir;

#[test]
fn test_config_file_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pool.json");

    let config = PoolConfigBuilder::new("muzzle_flash")
        .prewarm_count(12)
        .growth_count(3)
        .build()
        .unwrap();
    config.save_json_file(&path).unwrap();

    let loaded = PoolConfig::from_json_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_loaded_config_drives_pool() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("impacts.json");
    fs::write(&path, r#"{ "name": "impacts", "prewarm_count": 3, "growth_count": 2 }"#).unwrap();

    let factory = ArenaFactory::new();
    let template = factory.register_template("impact");
    let holder = factory.register_holder();
    let config = PoolConfig::from_json_file(&path).unwrap();
    let mut pool = RecyclingPool::new(factory.clone(), template, holder, config).unwrap();

    assert_eq!(pool.name(), "impacts");
    assert_eq!(pool.available_count(), 3);

    for _ in 0..4 {
        pool.acquire();
    }
    assert_eq!(pool.len(), 5);
    assert_eq!(pool.available_count(), 1);
    assert_eq!(factory.created_count(), 5);
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = PoolConfig::from_json_file(temp_dir.path().join("absent.json")).unwrap_err();
    match err {
        RecyclerError::Io { message, source } => {
            assert!(message.contains("absent.json"));
            assert!(source.is_some());
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_invalid_file_contents() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");

    fs::write(&path, "prewarm_count = 3").unwrap();
    let err = PoolConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, RecyclerError::Serialization { .. }));

    fs::write(&path, r#"{ "name": "" }"#).unwrap();
    let err = PoolConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, RecyclerError::InvalidParameter { .. }));
}
