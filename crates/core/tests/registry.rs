//! Registry CRUD against a real on-disk store.

use std::sync::Arc;

use joint_core::{
    AesGcmCodec, ClusterProfile, ClusterProfileInput, ClusterRegistry, ConfigStore, Protocol,
    RegistryError,
};
use tempfile::TempDir;

fn registry(dir: &TempDir) -> ClusterRegistry {
    let store = ConfigStore::new(
        dir.path().join("joint.json"),
        Arc::new(AesGcmCodec::default()),
    );
    ClusterRegistry::new(store)
}

fn input(name: &str) -> ClusterProfileInput {
    ClusterProfileInput {
        name: name.to_string(),
        protocol: Protocol::Http,
        host: "localhost".to_string(),
        port: 9200,
        verify: None,
        username: None,
        password: None,
    }
}

#[tokio::test]
async fn bootstrap_from_missing_file() {
    let dir = TempDir::new().unwrap();
    let registry = registry(&dir);

    assert!(registry.list().await.unwrap().is_empty());

    registry.create(input("local")).await.unwrap();

    let clusters = registry.list().await.unwrap();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].name, "local");
}

#[tokio::test]
async fn create_assigns_unique_ids_and_defaults_verify() {
    let dir = TempDir::new().unwrap();
    let registry = registry(&dir);

    let a = registry.create(input("a")).await.unwrap();
    let b = registry.create(input("b")).await.unwrap();

    assert_ne!(a.id, b.id);
    assert!(a.verify);
}

#[tokio::test]
async fn duplicate_name_is_rejected_without_mutation() {
    let dir = TempDir::new().unwrap();
    let registry = registry(&dir);

    registry.create(input("dup")).await.unwrap();
    let err = registry.create(input("dup")).await.unwrap_err();

    assert!(matches!(err, RegistryError::DuplicateName { .. }));
    assert_eq!(registry.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn get_returns_stored_profile() {
    let dir = TempDir::new().unwrap();
    let registry = registry(&dir);

    let created = registry.create(input("a")).await.unwrap();
    let fetched = registry.get(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let err = registry.get("no-such-id").await.unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { .. }));
}

#[tokio::test]
async fn update_replaces_in_place() {
    let dir = TempDir::new().unwrap();
    let registry = registry(&dir);

    let a = registry.create(input("a")).await.unwrap();
    registry.create(input("b")).await.unwrap();

    let edited = ClusterProfile {
        host: "10.0.0.5".to_string(),
        port: 9201,
        ..a
    };
    registry.update(edited.clone()).await.unwrap();

    let clusters = registry.list().await.unwrap();
    assert_eq!(clusters[0], edited, "edited profile keeps its position");
    assert_eq!(clusters[1].name, "b");
}

#[tokio::test]
async fn update_rejects_name_collision_with_other_profile() {
    let dir = TempDir::new().unwrap();
    let registry = registry(&dir);

    let a = registry.create(input("a")).await.unwrap();
    registry.create(input("b")).await.unwrap();

    let renamed = ClusterProfile {
        name: "b".to_string(),
        ..a
    };
    let err = registry.update(renamed).await.unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName { .. }));
}

#[tokio::test]
async fn update_keeping_own_name_is_allowed() {
    let dir = TempDir::new().unwrap();
    let registry = registry(&dir);

    let a = registry.create(input("a")).await.unwrap();
    let edited = ClusterProfile { port: 9300, ..a };
    registry.update(edited).await.unwrap();
}

#[tokio::test]
async fn update_unknown_id_errors() {
    let dir = TempDir::new().unwrap();
    let registry = registry(&dir);

    registry.create(input("a")).await.unwrap();

    let phantom = input("ghost").into_profile("does-not-exist".to_string());
    let err = registry.update(phantom).await.unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { .. }));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let registry = registry(&dir);

    let a = registry.create(input("a")).await.unwrap();
    registry.delete(&a.id).await.unwrap();
    registry.delete(&a.id).await.unwrap();

    assert!(registry.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn password_survives_the_full_round_trip_encrypted_at_rest() {
    let dir = TempDir::new().unwrap();
    let registry = registry(&dir);

    let created = registry
        .create(ClusterProfileInput {
            username: Some("admin".to_string()),
            password: Some("s3cret".to_string()),
            ..input("secure")
        })
        .await
        .unwrap();

    let fetched = registry.get(&created.id).await.unwrap();
    assert_eq!(fetched.password.as_deref(), Some("s3cret"));

    let raw = std::fs::read_to_string(dir.path().join("joint.json")).unwrap();
    assert!(!raw.contains("s3cret"));
}
