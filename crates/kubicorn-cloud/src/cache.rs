//! Per-pass snapshot cache
//!
//! `actual` and `expected` are each computed at most once per reconciliation
//! pass. The driver owns one `PassCache` per pass and hands it to resource
//! operations by `&mut`; a new pass starts from a new (or cleared) cache.
//! Entries never expire on their own.

use crate::snapshot::{ResourceKind, Snapshot};
use std::collections::HashMap;

/// Cache key: resource kind plus logical name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: ResourceKind,
    pub name: String,
}

impl CacheKey {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PassCache {
    actual: HashMap<CacheKey, Snapshot>,
    expected: HashMap<CacheKey, Snapshot>,
}

impl PassCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actual(&self, kind: ResourceKind, name: &str) -> Option<&Snapshot> {
        self.actual.get(&CacheKey::new(kind, name))
    }

    pub fn set_actual(&mut self, name: impl Into<String>, snapshot: Snapshot) {
        self.actual.insert(CacheKey::new(snapshot.kind, name), snapshot);
    }

    pub fn expected(&self, kind: ResourceKind, name: &str) -> Option<&Snapshot> {
        self.expected.get(&CacheKey::new(kind, name))
    }

    pub fn set_expected(&mut self, name: impl Into<String>, snapshot: Snapshot) {
        self.expected.insert(CacheKey::new(snapshot.kind, name), snapshot);
    }

    /// Drop both cached snapshots of one resource
    pub fn invalidate(&mut self, kind: ResourceKind, name: &str) {
        let key = CacheKey::new(kind, name);
        self.actual.remove(&key);
        self.expected.remove(&key);
    }

    pub fn clear(&mut self) {
        self.actual.clear();
        self.expected.clear();
    }

    /// Number of cached snapshots across both sides
    pub fn len(&self) -> usize {
        self.actual.len() + self.expected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actual.is_empty() && self.expected.is_empty()
    }
}
