use cargroup_derive::api_model;
use cargroup_kernel::domain::constants::MAX_MEMBERS;
use chrono::{DateTime, Utc};

/// A purchase-interest group, unique per (region, brand).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub region: String,
    pub brand: String,
    pub current_members: u32,
    pub max_members: u32,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub(crate) fn new(region: &str, brand: &str, current_members: u32) -> Self {
        Self {
            region: region.to_owned(),
            brand: brand.to_owned(),
            current_members,
            max_members: MAX_MEMBERS,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn open_seats(&self) -> u32 {
        self.max_members.saturating_sub(self.current_members)
    }
}

#[api_model(rename_all = "snake_case")]
#[derive(Clone, PartialEq, Eq)]
/// Group as listed by `/groups`.
pub struct GroupView {
    pub brand: String,
    /// Region (state or union territory) name
    pub city: String,
    pub current_members: u32,
    pub max_members: u32,
}

impl From<&Group> for GroupView {
    fn from(group: &Group) -> Self {
        Self {
            brand: group.brand.clone(),
            city: group.region.clone(),
            current_members: group.current_members,
            max_members: group.max_members,
        }
    }
}

impl From<Group> for GroupView {
    fn from(group: Group) -> Self {
        Self {
            brand: group.brand,
            city: group.region,
            current_members: group.current_members,
            max_members: group.max_members,
        }
    }
}

/// Outcome of one seeding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub total_regions: usize,
    pub total_brands: usize,
    pub total_groups_created: usize,
    pub skipped_existing: usize,
}

impl SeedReport {
    #[must_use]
    pub fn message(&self) -> String {
        if self.total_groups_created == 0 {
            format!(
                "All {} groups already exist; nothing to seed",
                self.total_regions * self.total_brands
            )
        } else {
            format!(
                "Seeded {} groups across {} states and {} brands",
                self.total_groups_created, self.total_regions, self.total_brands
            )
        }
    }
}

#[api_model(rename_all = "snake_case")]
/// Result of `POST /seed-data`.
pub struct SeedResponse {
    pub message: String,
    pub total_states: usize,
    pub total_brands: usize,
    pub total_groups_created: usize,
    /// Pairs that already had a group and were left untouched
    pub skipped_existing: usize,
}

impl From<SeedReport> for SeedResponse {
    fn from(report: SeedReport) -> Self {
        Self {
            message: report.message(),
            total_states: report.total_regions,
            total_brands: report.total_brands,
            total_groups_created: report.total_groups_created,
            skipped_existing: report.skipped_existing,
        }
    }
}

#[api_model]
/// Signed change applied to a group's member count.
pub struct MembershipDelta {
    pub delta: i32,
}
