//! Round-robin credential pool shared by every request.

use crate::config::PLACEHOLDER_KEY;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Keys shorter than this are assumed to be typos or truncated pastes.
pub const MIN_KEY_LENGTH: usize = 32;

/// An opaque provider secret.
///
/// `Debug` and `Display` print a short fingerprint so the value can be
/// logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First 8 hex chars of the SHA-256 of the secret.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        let digest = hex::encode(hasher.finalize());
        digest[..8].to_string()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", self.fingerprint())
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key#{}", self.fingerprint())
    }
}

/// Ordered credentials served round-robin.
///
/// The cursor is a relaxed atomic: concurrent callers may observe
/// approximate ordering, but the cursor always stays in `[0, len)`.
/// Failing credentials are not excluded; they rotate back into use.
#[derive(Debug, Default)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
    cursor: AtomicUsize,
    served: AtomicU64,
}

impl CredentialPool {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self {
            credentials,
            cursor: AtomicUsize::new(0),
            served: AtomicU64::new(0),
        }
    }

    /// Build a pool from a comma-separated list.
    ///
    /// Entries are trimmed; entries shorter than [`MIN_KEY_LENGTH`] are
    /// dropped, and the placeholder literal yields an empty pool.
    pub fn from_list(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == PLACEHOLDER_KEY {
            return Self::default();
        }

        let credentials: Vec<Credential> = raw
            .split(',')
            .map(str::trim)
            .filter(|key| key.len() >= MIN_KEY_LENGTH)
            .map(Credential::new)
            .collect();

        Self::new(credentials)
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Number of credentials handed out since startup.
    pub fn served(&self) -> u64 {
        self.served.load(Ordering::Relaxed)
    }

    /// Return the credential under the cursor and advance it.
    ///
    /// Returns `None` without touching any state when the pool is empty.
    pub fn next(&self) -> Option<Credential> {
        let len = self.credentials.len();
        if len == 0 {
            return None;
        }

        let index = self
            .cursor
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                Some((current + 1) % len)
            })
            .unwrap_or_default();

        self.served.fetch_add(1, Ordering::Relaxed);
        self.credentials.get(index % len).cloned()
    }
}
