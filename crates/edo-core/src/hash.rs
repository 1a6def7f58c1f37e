//! Stable hashing helpers.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::EdoError;
use crate::serde::to_canonical_json_bytes;

/// Computes a stable hexadecimal hash for the provided serialisable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, EdoError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(bytes_hash_string(&bytes))
}

/// Hex encoded SHA-256 of raw bytes (CSV tables, config files).
pub fn bytes_hash_string(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
