// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Persistent key-value session storage.
//!
//! Each operation is atomic per key. There is no cross-key transaction;
//! `services::session::SessionContext` layers rollback on top.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::{MemoryStore, StoreOp};

use async_trait::async_trait;

/// Storage key names as constants.
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    /// JSON-encoded `{nombre, apellido, email}`
    pub const USER_DATA: &str = "userData";
}

/// Storage I/O failure. Non-fatal; callers may simply retry.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Storage data corrupted: {0}")]
    Corrupted(String),
}

impl From<StoreError> for crate::error::AppError {
    fn from(err: StoreError) -> Self {
        crate::error::AppError::Storage(err.to_string())
    }
}

/// Device-local string key-value storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
