use crate::error::GroupsError;
use crate::model::GroupView;
use crate::registry::GroupRegistry;
use crate::store::{GroupStore, MemoryStore};
use cargroup_kernel::domain::constants::is_region;
use std::sync::Arc;

/// Read facade over the registry producing wire views.
#[derive(Debug)]
pub struct QueryService<S = MemoryStore> {
    registry: Arc<GroupRegistry<S>>,
}

impl<S: GroupStore> QueryService<S> {
    pub const fn new(registry: Arc<GroupRegistry<S>>) -> Self {
        Self { registry }
    }

    /// Groups of `region`; empty for an unknown or unseeded region.
    ///
    /// Names outside the region list are answered without touching the store.
    pub async fn groups_for_region(&self, region: &str) -> Result<Vec<GroupView>, GroupsError> {
        if !is_region(region) {
            return Ok(Vec::new());
        }
        Ok(self.registry.list_by_region(region).await?.into_iter().map(GroupView::from).collect())
    }

    pub async fn all_groups(&self) -> Result<Vec<GroupView>, GroupsError> {
        Ok(self.registry.list_all().await?.into_iter().map(GroupView::from).collect())
    }

    pub async fn group(&self, region: &str, brand: &str) -> Result<GroupView, GroupsError> {
        self.registry
            .get(region, brand)
            .await?
            .map(GroupView::from)
            .ok_or_else(|| GroupsError::not_found(region, brand))
    }
}
