//! # Drop Registry
//!
//! **Read-mostly, versioned, swapped whole.**
//!
//! ```text
//!   readers ──read lock──> clone Arc<RegistrySnapshot> ──unlock──> roll dice
//!
//!   writer  ──writer mutex──> build next snapshot off to the side
//!                             └──write lock──> swap pointer ──unlock
//! ```
//!
//! A reader holds the lock only to clone the `Arc`. Whatever it then does
//! with its snapshot, it sees one whole generation: entries and method
//! from the same publish. Writers are serialized so no update is lost
//! between reading the current generation and publishing the next.

use std::collections::HashMap;
use std::sync::Arc;

use oredrops_core::DropMethod;
use parking_lot::{Mutex, RwLock};

use crate::entry::{DropEntry, MaterialKey};

/// Entries per material as published.
pub type Buckets = HashMap<MaterialKey, Arc<[DropEntry]>>;

/// One immutable registry generation.
#[derive(Clone, Debug, Default)]
pub struct RegistrySnapshot {
    version: u64,
    method: DropMethod,
    buckets: Buckets,
}

impl RegistrySnapshot {
    /// Generation number; `0` for the initial empty registry.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Method every entry of this generation is rolled with.
    #[inline]
    #[must_use]
    pub fn method(&self) -> DropMethod {
        self.method
    }

    /// Entries for `material` (any case); empty when none are configured.
    #[must_use]
    pub fn entries(&self, material: &str) -> &[DropEntry] {
        match self.bucket(material) {
            Some(entries) => &entries[..],
            None => &[],
        }
    }

    /// Shared bucket for `material`, if configured.
    #[must_use]
    pub fn bucket(&self, material: &str) -> Option<&Arc<[DropEntry]>> {
        let key = MaterialKey::normalize(material)?;
        self.buckets.get(key.as_ref())
    }

    /// Configured materials, in no particular order.
    pub fn materials(&self) -> impl Iterator<Item = &MaterialKey> {
        self.buckets.keys()
    }

    /// Number of configured materials.
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of entries across all materials.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(|entries| entries.len()).sum()
    }
}

/// The live registry.
#[derive(Debug, Default)]
pub struct DropRegistry {
    current: RwLock<Arc<RegistrySnapshot>>,
    writer: Mutex<()>,
}

impl DropRegistry {
    /// Empty registry using `method`.
    #[must_use]
    pub fn new(method: DropMethod) -> Self {
        Self {
            current: RwLock::new(Arc::new(RegistrySnapshot {
                version: 0,
                method,
                buckets: Buckets::new(),
            })),
            writer: Mutex::new(()),
        }
    }

    /// The current generation. Cheap; never blocks on a writer building.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Entries for `material`; empty when none are configured.
    #[must_use]
    pub fn get(&self, material: &str) -> Arc<[DropEntry]> {
        self.snapshot()
            .bucket(material)
            .map_or_else(|| Arc::from(Vec::new()), Arc::clone)
    }

    /// Current generation number.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    /// Current method.
    #[must_use]
    pub fn method(&self) -> DropMethod {
        self.current.read().method
    }

    /// Sets the entries of one material. An empty list removes it.
    ///
    /// Returns the published version.
    pub fn put(&self, material: MaterialKey, entries: Vec<DropEntry>) -> u64 {
        self.publish(|current| {
            let mut buckets = current.buckets.clone();
            if entries.is_empty() {
                buckets.remove(&material);
            } else {
                buckets.insert(material, Arc::from(entries));
            }
            (current.method, buckets)
        })
    }

    /// Replaces every bucket and the method in one publish. Empty buckets
    /// are dropped.
    ///
    /// Returns the published version.
    pub fn replace_all(&self, tables: HashMap<MaterialKey, Vec<DropEntry>>, method: DropMethod) -> u64 {
        let buckets: Buckets = tables
            .into_iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(key, entries)| (key, Arc::from(entries)))
            .collect();
        self.publish(move |_| (method, buckets))
    }

    /// Switches the method, keeping every bucket.
    ///
    /// Returns the published version.
    pub fn set_method(&self, method: DropMethod) -> u64 {
        self.publish(|current| (method, current.buckets.clone()))
    }

    fn publish<F>(&self, next: F) -> u64
    where
        F: FnOnce(&RegistrySnapshot) -> (DropMethod, Buckets),
    {
        let _writer = self.writer.lock();
        let current = self.snapshot();
        let (method, buckets) = next(&current);
        let version = current.version + 1;
        let snapshot = Arc::new(RegistrySnapshot {
            version,
            method,
            buckets,
        });
        *self.current.write() = snapshot;
        version
    }
}
