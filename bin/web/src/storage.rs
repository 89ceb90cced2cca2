//! Durable credential storage backed by browser `localStorage`.
//!
//! Records are stored as encoded [`PersistedRecord`]s so the TTL
//! travels with the value. `get` re-checks expiry on every read and
//! evicts stale or undecodable entries instead of returning them.

use amber_vault_session::{CredentialStore, PersistedRecord, StorageKey, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// [`CredentialStore`] implementation over `window.localStorage`.
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or(StoreError::Unavailable {
            details: "localStorage is not available".to_string(),
        })
}

fn remove_item(storage: &web_sys::Storage, key: StorageKey) {
    if storage.remove_item(key.as_str()).is_err() {
        tracing::warn!(key = key.as_str(), "failed to evict storage entry");
    }
}

#[async_trait(?Send)]
impl CredentialStore for LocalStorageStore {
    async fn put(
        &self,
        key: StorageKey,
        value: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        let record = PersistedRecord::new(value.to_string(), expires_at);
        storage()?
            .set_item(key.as_str(), &record.encode())
            .map_err(|_| StoreError::Unavailable {
                details: format!("write to {key} rejected"),
            })
    }

    async fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        let storage = storage()?;
        let raw = storage
            .get_item(key.as_str())
            .map_err(|_| StoreError::Unavailable {
                details: format!("read of {key} rejected"),
            })?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        match PersistedRecord::decode(&raw) {
            Some(record) if !record.is_expired_at(Utc::now()) => Ok(Some(record.value)),
            Some(_) => {
                tracing::debug!(key = key.as_str(), "evicting expired storage entry");
                remove_item(&storage, key);
                Ok(None)
            }
            None => {
                tracing::debug!(key = key.as_str(), "evicting undecodable storage entry");
                remove_item(&storage, key);
                Ok(None)
            }
        }
    }

    async fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        let storage = storage()?;
        remove_item(&storage, key);
        Ok(())
    }
}
