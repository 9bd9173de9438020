//! Group storage.
//!
//! [`GroupStore`] is the persistence seam of the registry; [`MemoryStore`] is
//! the in-process implementation the server ships with.

use crate::error::GroupsError;
use crate::model::Group;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::future::Future;

/// Backing storage for groups keyed by (region, brand).
///
/// Implementations must make `insert` and `update` atomic per key and must
/// leave a record untouched when an `update` closure fails.
pub trait GroupStore: Send + Sync + 'static {
    /// Stores a new group; [`GroupsError::DuplicateGroup`] if the key is taken.
    fn insert(&self, group: Group) -> impl Future<Output = Result<(), GroupsError>> + Send;

    fn get(
        &self,
        region: &str,
        brand: &str,
    ) -> impl Future<Output = Result<Option<Group>, GroupsError>> + Send;

    /// Groups of one region in brand insertion order.
    fn list_region(&self, region: &str)
    -> impl Future<Output = Result<Vec<Group>, GroupsError>> + Send;

    fn list_all(&self) -> impl Future<Output = Result<Vec<Group>, GroupsError>> + Send;

    /// Applies `apply` to a copy of the record and stores it only on success.
    fn update<F>(
        &self,
        region: &str,
        brand: &str,
        apply: F,
    ) -> impl Future<Output = Result<Group, GroupsError>> + Send
    where
        F: FnOnce(&mut Group) -> Result<(), GroupsError> + Send;

    fn len(&self) -> impl Future<Output = Result<usize, GroupsError>> + Send;
}

#[derive(Debug, Default)]
struct Buckets {
    /// Region insertion order.
    regions: Vec<String>,
    groups: FxHashMap<String, Vec<Group>>,
    count: usize,
}

/// In-memory store behind a single `RwLock`.
///
/// Reads run concurrently; writes are serialized. Groups of a region keep
/// their insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    buckets: RwLock<Buckets>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GroupStore for MemoryStore {
    async fn insert(&self, group: Group) -> Result<(), GroupsError> {
        let mut buckets = self.buckets.write();

        if let Some(existing) = buckets.groups.get(&group.region) {
            if existing.iter().any(|g| g.brand == group.brand) {
                return Err(GroupsError::duplicate(&group.region, &group.brand));
            }
        } else {
            buckets.regions.push(group.region.clone());
        }

        buckets.groups.entry(group.region.clone()).or_default().push(group);
        buckets.count += 1;
        Ok(())
    }

    async fn get(&self, region: &str, brand: &str) -> Result<Option<Group>, GroupsError> {
        let buckets = self.buckets.read();
        Ok(buckets.groups.get(region).and_then(|groups| groups.iter().find(|g| g.brand == brand)).cloned())
    }

    async fn list_region(&self, region: &str) -> Result<Vec<Group>, GroupsError> {
        Ok(self.buckets.read().groups.get(region).cloned().unwrap_or_default())
    }

    async fn list_all(&self) -> Result<Vec<Group>, GroupsError> {
        let buckets = self.buckets.read();
        Ok(buckets
            .regions
            .iter()
            .filter_map(|region| buckets.groups.get(region))
            .flat_map(|groups| groups.iter().cloned())
            .collect())
    }

    async fn update<F>(&self, region: &str, brand: &str, apply: F) -> Result<Group, GroupsError>
    where
        F: FnOnce(&mut Group) -> Result<(), GroupsError> + Send,
    {
        let mut buckets = self.buckets.write();
        let stored = buckets
            .groups
            .get_mut(region)
            .and_then(|groups| groups.iter_mut().find(|g| g.brand == brand))
            .ok_or_else(|| GroupsError::not_found(region, brand))?;

        let mut candidate = stored.clone();
        apply(&mut candidate)?;
        *stored = candidate.clone();
        Ok(candidate)
    }

    async fn len(&self) -> Result<usize, GroupsError> {
        Ok(self.buckets.read().count)
    }
}
