use crate::error::GroupsError;
use crate::events::MembershipChanged;
use crate::model::Group;
use crate::store::{GroupStore, MemoryStore};
use cargroup_event_bus::EventBus;
use cargroup_kernel::domain::constants::MAX_MEMBERS;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Owner of every group; enforces uniqueness and the capacity bounds.
///
/// Each store call is bounded by `timeout`; an elapsed call surfaces as
/// [`GroupsError::Persistence`].
#[derive(Debug)]
pub struct GroupRegistry<S = MemoryStore> {
    store: S,
    timeout: Duration,
    events: EventBus,
}

impl<S: GroupStore> GroupRegistry<S> {
    pub fn new(store: S, timeout: Duration, events: EventBus) -> Self {
        Self { store, timeout, events }
    }

    /// Creates the (region, brand) group with `initial_members` members.
    #[instrument(skip(self), level = "debug")]
    pub async fn create_group(
        &self,
        region: &str,
        brand: &str,
        initial_members: u32,
    ) -> Result<Group, GroupsError> {
        if initial_members > MAX_MEMBERS {
            return Err(GroupsError::InvalidMembership {
                message: format!("initial members {initial_members} outside [0, {MAX_MEMBERS}]")
                    .into(),
                context: Some(format!("{region}/{brand}").into()),
            });
        }

        let group = Group::new(region, brand, initial_members);
        self.bounded("insert", self.store.insert(group.clone())).await?;
        debug!(region, brand, members = initial_members, "Group created");
        Ok(group)
    }

    pub async fn get(&self, region: &str, brand: &str) -> Result<Option<Group>, GroupsError> {
        self.bounded("get", self.store.get(region, brand)).await
    }

    /// Groups of `region` in brand insertion order; empty if never seeded.
    pub async fn list_by_region(&self, region: &str) -> Result<Vec<Group>, GroupsError> {
        self.bounded("list_region", self.store.list_region(region)).await
    }

    pub async fn list_all(&self) -> Result<Vec<Group>, GroupsError> {
        self.bounded("list_all", self.store.list_all()).await
    }

    pub async fn len(&self) -> Result<usize, GroupsError> {
        self.bounded("len", self.store.len()).await
    }

    /// Adds `delta` (possibly negative) to the member count.
    ///
    /// The stored value is unchanged when the result would leave `[0, max_members]`.
    /// [`MembershipChanged`] is published only when the count actually moves.
    #[instrument(skip(self), level = "debug")]
    pub async fn adjust_membership(
        &self,
        region: &str,
        brand: &str,
        delta: i32,
    ) -> Result<Group, GroupsError> {
        let mut previous = 0;
        let updated = self
            .bounded(
                "update",
                self.store.update(region, brand, |group| {
                    previous = group.current_members;
                    group.current_members = apply_delta(group, delta)?;
                    Ok(())
                }),
            )
            .await?;

        if previous == updated.current_members {
            return Ok(updated);
        }

        if let Err(err) = self.events.publish(MembershipChanged {
            region: updated.region.clone(),
            brand: updated.brand.clone(),
            previous,
            current: updated.current_members,
        }) {
            warn!(error = %err, "Failed to publish membership change");
        }

        Ok(updated)
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, GroupsError>>,
    ) -> Result<T, GroupsError> {
        tokio::time::timeout(self.timeout, call).await.map_err(|_| GroupsError::Persistence {
            message: format!("{operation} timed out after {} ms", self.timeout.as_millis()).into(),
            context: None,
        })?
    }
}

fn apply_delta(group: &Group, delta: i32) -> Result<u32, GroupsError> {
    let next = i64::from(group.current_members) + i64::from(delta);

    if next < 0 {
        return Err(GroupsError::InvalidMembership {
            message: format!("{} members cannot drop by {}", group.current_members, -i64::from(delta))
                .into(),
            context: Some(format!("{}/{}", group.region, group.brand).into()),
        });
    }
    if next > i64::from(group.max_members) {
        return Err(GroupsError::CapacityExceeded {
            message: format!(
                "{} members cannot grow by {delta}; {} of {} seats left",
                group.current_members,
                group.open_seats(),
                group.max_members
            )
            .into(),
            context: Some(format!("{}/{}", group.region, group.brand).into()),
        });
    }

    u32::try_from(next).map_err(|_| GroupsError::Internal {
        message: format!("member count {next} out of range").into(),
        context: None,
    })
}
