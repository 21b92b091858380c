//! Error types for cart storage, loading and persistence.
//!
//! Loading never fails from the caller's point of view: a [`CartLoadError`]
//! is reported through [`crate::LoadOutcome::Reset`] alongside an empty cart.
//! Persistence failures are returned from every mutation as a
//! [`PersistError`], after the in-memory change has already been applied.

use thiserror::Error;

/// Errors raised by a [`crate::SlotStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the value would exceed the backend's capacity.
    #[error("storage quota exceeded: {needed} bytes needed, {available} available")]
    QuotaExceeded { needed: usize, available: usize },

    /// Slot key is empty or contains characters the backend cannot store.
    #[error("invalid slot key: {0:?}")]
    InvalidKey(String),
}

/// Why a persisted cart could not be restored.
#[derive(Debug, Error)]
pub enum CartLoadError {
    /// The slot could not be read.
    #[error("failed to read cart slot: {0}")]
    Read(#[from] StorageError),

    /// The slot content is not a valid serialized cart.
    #[error("malformed cart data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The slot parsed, but a line violates the cart's invariants.
    #[error("invalid cart line {index}: {reason}")]
    InvalidLine { index: usize, reason: String },
}

/// Failure to write the cart to its slot.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write cart slot: {0}")]
    Storage(#[from] StorageError),
}
