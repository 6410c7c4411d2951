// crates/core/src/registry.rs
//! CRUD over the persisted cluster list.
//!
//! Single source of truth: every call re-reads the config file, so the view
//! always reflects the latest persisted state. Mutations are a full
//! load-modify-save round trip. Not safe against concurrent external
//! writers; the tool assumes it is the only writer to the config file.

use tracing::info;
use uuid::Uuid;

use crate::error::RegistryError;
use crate::store::ConfigStore;
use crate::types::{ClusterProfile, ClusterProfileInput};

#[derive(Clone)]
pub struct ClusterRegistry {
    store: ConfigStore,
}

impl ClusterRegistry {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    /// All registered profiles, in insertion order.
    pub async fn list(&self) -> Result<Vec<ClusterProfile>, RegistryError> {
        Ok(self.store.load().await?.clusters)
    }

    /// Look up one profile by id.
    pub async fn get(&self, id: &str) -> Result<ClusterProfile, RegistryError> {
        self.store
            .load()
            .await?
            .clusters
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| RegistryError::NotFound { id: id.to_string() })
    }

    /// Register a new cluster under a freshly assigned id.
    ///
    /// Fails with [`RegistryError::DuplicateName`] before any mutation when
    /// another profile already uses the name.
    pub async fn create(
        &self,
        input: ClusterProfileInput,
    ) -> Result<ClusterProfile, RegistryError> {
        let mut file = self.store.load().await?;

        if file.clusters.iter().any(|c| c.name == input.name) {
            return Err(RegistryError::DuplicateName { name: input.name });
        }

        let profile = input.into_profile(Uuid::new_v4().to_string());
        file.clusters.push(profile.clone());
        self.store.save(&file).await?;

        info!(id = %profile.id, name = %profile.name, "cluster registered");
        Ok(profile)
    }

    /// Replace the stored profile with the same id, in place.
    ///
    /// Name uniqueness is checked against all profiles other than the one
    /// being updated. Fails with [`RegistryError::NotFound`] when the id is
    /// not registered.
    pub async fn update(&self, profile: ClusterProfile) -> Result<(), RegistryError> {
        let mut file = self.store.load().await?;

        if file
            .clusters
            .iter()
            .any(|c| c.name == profile.name && c.id != profile.id)
        {
            return Err(RegistryError::DuplicateName { name: profile.name });
        }

        let slot = file
            .clusters
            .iter_mut()
            .find(|c| c.id == profile.id)
            .ok_or_else(|| RegistryError::NotFound {
                id: profile.id.clone(),
            })?;
        let id = profile.id.clone();
        *slot = profile;

        self.store.save(&file).await?;
        info!(%id, "cluster updated");
        Ok(())
    }

    /// Remove the profile with the given id. Deleting an unknown id is a
    /// no-op, not an error.
    pub async fn delete(&self, id: &str) -> Result<(), RegistryError> {
        let mut file = self.store.load().await?;
        file.clusters.retain(|c| c.id != id);
        self.store.save(&file).await?;

        info!(%id, "cluster removed");
        Ok(())
    }
}
