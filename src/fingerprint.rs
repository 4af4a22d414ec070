//! Canonical request fingerprints
//!
//! A [`Fingerprint`] is the deterministic cache key derived from a
//! [`RequestDescriptor`]. Two descriptors with the same field values must
//! always produce the same fingerprint regardless of how they were built,
//! otherwise cache hits would depend on object identity or field insertion
//! order.

use std::fmt;

use crate::request::RequestDescriptor;

/// Canonical cache key for a request descriptor
///
/// The key is the descriptor's canonical JSON form. Struct fields serialize
/// in declaration order and the header/query maps are ordered by name, so
/// the output is stable across construction order and instance identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derives the fingerprint of a descriptor
    pub fn of(descriptor: &RequestDescriptor) -> Self {
        // A string-keyed descriptor cannot fail to serialize; the Debug
        // fallback is equally deterministic should that ever change.
        let canonical = serde_json::to_string(descriptor)
            .unwrap_or_else(|_| format!("{descriptor:?}"));
        Fingerprint(canonical)
    }

    /// Returns the canonical key text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
