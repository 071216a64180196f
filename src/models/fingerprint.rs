//! Value-based entity identity.
//!
//! Entities are rebuilt from the store at every planning pass, so nothing can
//! be remembered by reference. Continuity state instead keys on a digest of
//! an entity's identifying configuration, stable across reloads and across
//! progress mutation.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Deterministic identity of a project, target or exposure plan: the SHA-256
/// hex digest of a canonical `_`-joined string of its identifying fields.
///
/// Not a security boundary — used only for continuity matching and as a map
/// key in session state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Digest a canonical identity string.
    pub fn digest(canonical: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Fingerprint(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
