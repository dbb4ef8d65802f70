//! Replay Protection Capability
//!
//! Runtime adapters that verify signed requests use this capability to
//! remember seen nonces, so a captured request cannot be replayed within
//! its validity window.

use async_trait::async_trait;

/// Nonce bookkeeping for signed-request verification.
#[async_trait]
pub trait NonceManager: Send + Sync {
    /// Record `nonce` as seen for `key_id`.
    ///
    /// Returns an error when the nonce was already recorded, in which case
    /// the runtime rejects the request as a replay.
    async fn remember(&self, key_id: &str, nonce: &str) -> Result<(), ReplayedNonce>;
}

/// A nonce was presented twice for the same key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("nonce {nonce:?} for key {key_id:?} was already used")]
pub struct ReplayedNonce {
    /// Signing key the nonce belongs to.
    pub key_id: String,
    /// The replayed nonce.
    pub nonce: String,
}
