// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! In-memory session store with optional fault injection.

use super::{SessionStore, StoreError};
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use std::sync::Arc;

/// Store operation, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Set,
    Get,
    Remove,
}

/// Volatile store backed by a concurrent map.
///
/// Clones share the same underlying data, so a test can keep a handle
/// and inspect what a controller persisted.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, String>>,
    failures: Arc<DashSet<(StoreOp, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `op` on `key` fail until `clear_failures` is called.
    pub fn fail_on(&self, op: StoreOp, key: &str) {
        self.failures.insert((op, key.to_string()));
    }

    pub fn clear_failures(&self) {
        self.failures.clear();
    }

    /// Synchronous peek, bypassing injected failures.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check(&self, op: StoreOp, key: &str) -> Result<(), StoreError> {
        if self.failures.contains(&(op, key.to_string())) {
            return Err(StoreError::Io(format!("injected {:?} failure on {}", op, key)));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check(StoreOp::Set, key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check(StoreOp::Get, key)?;
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check(StoreOp::Remove, key)?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        store.set("authToken", "abc").await.unwrap();
        assert_eq!(store.get("authToken").await.unwrap().as_deref(), Some("abc"));

        store.remove("authToken").await.unwrap();
        assert_eq!(store.get("authToken").await.unwrap(), None);
        // Removing a missing key is not an error
        store.remove("authToken").await.unwrap();
    }

    #[tokio::test]
    async fn test_injected_failure_is_scoped_to_op_and_key() {
        let store = MemoryStore::new();
        store.fail_on(StoreOp::Set, "userData");

        assert!(store.set("userData", "{}").await.is_err());
        assert!(store.set("authToken", "abc").await.is_ok());
        assert!(store.get("userData").await.is_ok());

        store.clear_failures();
        assert!(store.set("userData", "{}").await.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set("k", "v").await.unwrap();
        assert_eq!(handle.snapshot("k").as_deref(), Some("v"));
    }
}
