use thiserror::Error;

/// Errors from writing the persisted cart.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access cart storage at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("expiry for {key} is out of range (ttl {ttl_seconds}s)")]
    ExpiryOutOfRange { key: String, ttl_seconds: i64 },

    #[error("failed to serialize cart storage: {0}")]
    Serialize(#[from] serde_json::Error),
}
