//! Durable client storage for the persisted session record.
//!
//! The lifecycle controller is the sole writer. Only the bearer credential
//! is persisted; role and subject id are derived from it by decode+resolve
//! on every read, so there is no separately-persisted copy to drift out of
//! sync. The legacy role/subject keys remain in the documented key space
//! solely so purging can clear records written by older clients.
//!
//! Readers must tolerate the record being absent, malformed, or expired at
//! any time (another tab may clear it out-of-band) and re-run the expiry
//! check rather than trusting a cached flag.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// The fixed key space of the persisted session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The bearer credential.
    Credential,
    /// Legacy: the resolved scope/role. Never written, purged on logout.
    Scope,
    /// Legacy: the subject id. Never written, purged on logout.
    Subject,
}

impl StorageKey {
    /// All keys, for purge operations.
    pub const ALL: [StorageKey; 3] = [Self::Credential, Self::Scope, Self::Subject];

    /// Returns the storage name of this key.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credential => "authToken",
            Self::Scope => "userScope",
            Self::Subject => "userId",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The durable encoding of a stored value with its explicit TTL.
///
/// For the credential the TTL equals the credential's own expiry, never a
/// separate arbitrary one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    /// The stored value.
    pub value: String,
    /// When the record stops being valid, if bounded.
    pub expires_at: Option<DateTime<Utc>>,
}

impl PersistedRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(value: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { value, expires_at }
    }

    /// Returns true if the record's TTL has elapsed at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Encodes the record for storage.
    #[must_use]
    pub fn encode(&self) -> String {
        // Serialization of a String + Option<DateTime> cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Decodes a record from storage; `None` when the stored text is not a
    /// valid record.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Durable client storage consumed by the lifecycle controller.
///
/// Implementations live at the edge (browser localStorage in the web
/// client, [`MemoryStore`] in tests and native tooling). `get` must return
/// `None` for records whose TTL has elapsed.
#[async_trait(?Send)]
pub trait CredentialStore {
    /// Stores `value` under `key` with an explicit TTL.
    async fn put(
        &self,
        key: StorageKey,
        value: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError>;

    /// Returns the stored value, or `None` if absent or expired.
    async fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError>;

    /// Removes the stored value, if any.
    async fn remove(&self, key: StorageKey) -> Result<(), StoreError>;
}

/// In-memory store for tests and native development.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: std::sync::Mutex<std::collections::HashMap<StorageKey, PersistedRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value, for test setup.
    pub fn seed(&self, key: StorageKey, value: &str, expires_at: Option<DateTime<Utc>>) {
        self.records
            .lock()
            .expect("memory store lock")
            .insert(key, PersistedRecord::new(value.to_string(), expires_at));
    }
}

#[async_trait(?Send)]
impl CredentialStore for MemoryStore {
    async fn put(
        &self,
        key: StorageKey,
        value: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable {
                details: "memory store poisoned".to_string(),
            })?
            .insert(key, PersistedRecord::new(value.to_string(), expires_at));
        Ok(())
    }

    async fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        let mut records = self.records.lock().map_err(|_| StoreError::Unavailable {
            details: "memory store poisoned".to_string(),
        })?;

        match records.get(&key) {
            Some(record) if record.is_expired_at(Utc::now()) => {
                records.remove(&key);
                Ok(None)
            }
            Some(record) => Ok(Some(record.value.clone())),
            None => Ok(None),
        }
    }

    async fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable {
                details: "memory store poisoned".to_string(),
            })?
            .remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn put_get_remove_roundtrip() {
        let store = MemoryStore::new();

        store
            .put(StorageKey::Credential, "tok", None)
            .await
            .expect("put");
        assert_eq!(
            store.get(StorageKey::Credential).await.expect("get"),
            Some("tok".to_string())
        );

        store.remove(StorageKey::Credential).await.expect("remove");
        assert_eq!(store.get(StorageKey::Credential).await.expect("get"), None);
    }

    #[tokio::test]
    async fn expired_record_reads_as_absent() {
        let store = MemoryStore::new();
        store.seed(
            StorageKey::Credential,
            "tok",
            Some(Utc::now() - Duration::seconds(1)),
        );

        assert_eq!(store.get(StorageKey::Credential).await.expect("get"), None);
    }

    #[tokio::test]
    async fn unexpired_record_reads_back() {
        let store = MemoryStore::new();
        store.seed(
            StorageKey::Credential,
            "tok",
            Some(Utc::now() + Duration::hours(1)),
        );

        assert_eq!(
            store.get(StorageKey::Credential).await.expect("get"),
            Some("tok".to_string())
        );
    }

    #[tokio::test]
    async fn remove_missing_key_is_a_noop() {
        let store = MemoryStore::new();
        store.remove(StorageKey::Scope).await.expect("remove");
    }

    #[test]
    fn storage_key_names_are_stable() {
        assert_eq!(StorageKey::Credential.as_str(), "authToken");
        assert_eq!(StorageKey::Scope.as_str(), "userScope");
        assert_eq!(StorageKey::Subject.as_str(), "userId");
    }

    #[test]
    fn persisted_record_encoding_roundtrip() {
        let record = PersistedRecord::new(
            "tok".to_string(),
            Some(Utc::now() + Duration::hours(1)),
        );
        let decoded = PersistedRecord::decode(&record.encode()).expect("decode");
        assert_eq!(record.value, decoded.value);
        assert_eq!(record.expires_at, decoded.expires_at);
    }

    #[test]
    fn persisted_record_decode_rejects_garbage() {
        assert!(PersistedRecord::decode("not json").is_none());
        assert!(PersistedRecord::decode("{\"nope\":1}").is_none());
    }

    #[test]
    fn persisted_record_without_ttl_never_expires() {
        let record = PersistedRecord::new("tok".to_string(), None);
        assert!(!record.is_expired_at(Utc::now() + Duration::days(365)));
    }
}
