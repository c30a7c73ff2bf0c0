//! Cart persistence: a key/value store with per-entry expiry.
//!
//! Writes are fire-and-forget from the storefront's point of view. The last
//! write wins and there is no conflict handling.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use omni_core::CartLine;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::StorageError;

/// Storage key the cart is saved under.
pub const CART_STORAGE_KEY: &str = "omni_cart";
pub const DEFAULT_CART_TTL_DAYS: u32 = 7;

/// A string store with expiring entries.
pub trait CartStorage {
    /// Returns the value for `key`, or `None` if absent or expired.
    fn load(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key` for `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be written.
    fn save(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl StoredEntry {
    fn new(key: &str, value: &str, now: DateTime<Utc>, ttl: Duration) -> Result<Self, StorageError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| StorageError::ExpiryOutOfRange {
                key: key.to_owned(),
                ttl_seconds: ttl.num_seconds(),
            })?;
        Ok(Self {
            value: value.to_owned(),
            expires_at,
        })
    }

    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// In-process storage; contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, StoredEntry>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|e| e.is_live(Utc::now()))
            .map(|e| e.value.clone())
    }

    fn save(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StorageError> {
        let entry = StoredEntry::new(key, value, Utc::now(), ttl)?;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), entry);
        Ok(())
    }
}

/// Storage backed by a JSON file mapping each key to its value and expiry.
///
/// A missing or unreadable file reads as empty. Expired entries are pruned on
/// the next write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> HashMap<String, StoredEntry> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cart storage unreadable");
                return HashMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "cart storage is not valid JSON; ignoring");
            HashMap::new()
        })
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.read_entries()
            .remove(key)
            .filter(|e| e.is_live(Utc::now()))
            .map(|e| e.value)
    }

    fn save(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StorageError> {
        let now = Utc::now();
        let entry = StoredEntry::new(key, value, now, ttl)?;
        let mut entries = self.read_entries();
        entries.retain(|_, e| e.is_live(now));
        entries.insert(key.to_owned(), entry);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), key, "cart storage written");
        Ok(())
    }
}

/// Serializes the cart as a JSON array of flattened lines.
///
/// # Errors
///
/// Returns [`StorageError::Serialize`] if serialization fails.
pub fn encode_cart(cart: &Cart) -> Result<String, StorageError> {
    Ok(serde_json::to_string(cart.lines())?)
}

/// Restores a cart from its persisted form.
///
/// A malformed payload is logged and yields an empty cart.
#[must_use]
pub fn decode_cart(raw: &str) -> Cart {
    match serde_json::from_str::<Vec<CartLine>>(raw) {
        Ok(lines) => Cart::from_lines(lines),
        Err(e) => {
            tracing::error!(error = %e, "persisted cart is malformed; starting empty");
            Cart::new()
        }
    }
}
