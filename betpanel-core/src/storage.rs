//! Key-value persistence for credentials and the tenant selector.
//!
//! A small trait covers the contract so tests can run against an
//! isolated in-memory store while a real deployment persists to disk.
//! All operations are synchronous and local; no network I/O ever
//! happens behind this trait.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::warn;

/// Storage key for the active-tenant selector.
pub const ACTIVE_APP_KEY: &str = "activeApp";
/// Storage key for the Primary tenant's fallback bearer token.
pub const PRIMARY_TOKEN_KEY: &str = "sportybetAdminToken";
/// Storage key for the Secondary tenant's bearer token.
pub const SECONDARY_TOKEN_KEY: &str = "admin_token";

/// Synchronous key-value storage.
///
/// The two tenants' credentials live under distinct keys and are never
/// read through the other tenant's code paths.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage. One instance per test case gives fully isolated
/// state.
#[derive(Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.write().remove(key);
    }
}

/// JSON-file-backed storage so state survives a process restart.
///
/// Loads once on open and writes through on every mutation. An
/// unreadable or corrupt file starts empty rather than failing the
/// process; a failed write is logged and the in-memory view stays
/// authoritative for the rest of the session.
pub struct JsonFileStorage {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl JsonFileStorage {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<HashMap<String, String>>(&raw).ok())
            .unwrap_or_default();
        Self {
            path,
            values: RwLock::new(values),
        }
    }

    fn flush(&self, values: &HashMap<String, String>) {
        match serde_json::to_string_pretty(values) {
            Ok(raw) => {
                if let Err(err) = std::fs::write(&self.path, raw) {
                    warn!(path = %self.path.display(), %err, "failed to persist storage file");
                }
            }
            Err(err) => warn!(%err, "failed to serialize storage file"),
        }
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.write();
        values.insert(key.to_string(), value.to_string());
        self.flush(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.write();
        if values.remove(key).is_some() {
            self.flush(&values);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(SECONDARY_TOKEN_KEY), None);

        storage.set(SECONDARY_TOKEN_KEY, "tok-123");
        assert_eq!(storage.get(SECONDARY_TOKEN_KEY), Some("tok-123".to_string()));

        storage.remove(SECONDARY_TOKEN_KEY);
        assert_eq!(storage.get(SECONDARY_TOKEN_KEY), None);
    }

    #[test]
    fn tenant_keys_are_distinct() {
        let storage = MemoryStorage::new();
        storage.set(PRIMARY_TOKEN_KEY, "primary");
        storage.set(SECONDARY_TOKEN_KEY, "secondary");

        storage.remove(SECONDARY_TOKEN_KEY);
        assert_eq!(storage.get(PRIMARY_TOKEN_KEY), Some("primary".to_string()));
    }

    #[test]
    fn file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("betpanel.json");

        {
            let storage = JsonFileStorage::open(&path);
            storage.set(ACTIVE_APP_KEY, "1win");
            storage.set(SECONDARY_TOKEN_KEY, "tok-456");
            storage.remove(SECONDARY_TOKEN_KEY);
        }

        let reopened = JsonFileStorage::open(&path);
        assert_eq!(reopened.get(ACTIVE_APP_KEY), Some("1win".to_string()));
        assert_eq!(reopened.get(SECONDARY_TOKEN_KEY), None);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("betpanel.json");
        std::fs::write(&path, "not json {").unwrap();

        let storage = JsonFileStorage::open(&path);
        assert_eq!(storage.get(ACTIVE_APP_KEY), None);
    }
}
