use crate::error::GroupsError;
use crate::events::SeedingFinished;
use crate::model::SeedReport;
use crate::policy::MembershipPolicy;
use crate::registry::GroupRegistry;
use crate::store::{GroupStore, MemoryStore};
use cargroup_event_bus::EventBus;
use cargroup_kernel::domain::constants::REGIONS;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// Creates one group per (region, brand) pair.
///
/// Passes are idempotent: existing pairs are skipped and only new groups are
/// counted. At most one pass runs at a time.
#[derive(Debug)]
pub struct SeedingService<S = MemoryStore> {
    registry: Arc<GroupRegistry<S>>,
    brands: Vec<String>,
    policy: MembershipPolicy,
    events: EventBus,
    gate: Mutex<()>,
}

impl<S: GroupStore> SeedingService<S> {
    pub fn new(
        registry: Arc<GroupRegistry<S>>,
        brands: Vec<String>,
        policy: MembershipPolicy,
        events: EventBus,
    ) -> Self {
        Self { registry, brands, policy, events, gate: Mutex::new(()) }
    }

    /// Runs one seeding pass over every region and catalog brand.
    ///
    /// # Errors
    /// * [`GroupsError::SeedingInProgress`] while another pass holds the gate.
    /// * [`GroupsError::SeedingInterrupted`] when the store fails mid-pass; groups
    ///   created before the failure stay, and the next pass picks up the rest.
    #[instrument(skip(self), fields(policy = ?self.policy))]
    pub async fn seed_all(&self) -> Result<SeedReport, GroupsError> {
        let Ok(_pass) = self.gate.try_lock() else {
            return Err(GroupsError::SeedingInProgress { context: None });
        };

        let mut created = 0;
        let mut skipped = 0;

        for region in REGIONS {
            for brand in &self.brands {
                let members = self.policy.initial_members(region, brand);
                match self.registry.create_group(region, brand, members).await {
                    Ok(_) => created += 1,
                    Err(GroupsError::DuplicateGroup { .. }) => skipped += 1,
                    Err(err) => {
                        warn!(region, brand, created, skipped, error = %err, "Seeding interrupted");
                        return Err(GroupsError::SeedingInterrupted {
                            created,
                            skipped,
                            message: err.to_string().into(),
                            context: Some(format!("{region}/{brand}").into()),
                        });
                    },
                }
            }
        }

        let report = SeedReport {
            total_regions: REGIONS.len(),
            total_brands: self.brands.len(),
            total_groups_created: created,
            skipped_existing: skipped,
        };
        info!(created, skipped, "Seeding finished");

        if let Err(err) = self.events.publish(SeedingFinished(report)) {
            warn!(error = %err, "Failed to publish seeding report");
        }

        Ok(report)
    }

    #[must_use]
    pub fn brands(&self) -> &[String] {
        &self.brands
    }
}
