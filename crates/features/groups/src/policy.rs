use cargroup_kernel::domain::config::SeedPolicy;
use cargroup_kernel::domain::constants::{SEED_MAX_MEMBERS, SEED_MIN_MEMBERS};
use fxhash::FxHasher64;
use rand::Rng;
use std::hash::Hasher;

/// Picks the initial member count of a seeded group, always within
/// `SEED_MIN_MEMBERS..=SEED_MAX_MEMBERS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipPolicy {
    /// Same (region, brand) always yields the same count.
    Derived,
    Random,
}

impl From<SeedPolicy> for MembershipPolicy {
    fn from(policy: SeedPolicy) -> Self {
        match policy {
            SeedPolicy::Derived => Self::Derived,
            SeedPolicy::Random => Self::Random,
        }
    }
}

impl MembershipPolicy {
    #[must_use]
    pub fn initial_members(self, region: &str, brand: &str) -> u32 {
        match self {
            Self::Derived => derived(region, brand),
            Self::Random => rand::rng().random_range(SEED_MIN_MEMBERS..=SEED_MAX_MEMBERS),
        }
    }
}

fn derived(region: &str, brand: &str) -> u32 {
    let mut hasher = FxHasher64::default();
    hasher.write(region.as_bytes());
    hasher.write_u8(0xff);
    hasher.write(brand.as_bytes());

    let span = u64::from(SEED_MAX_MEMBERS - SEED_MIN_MEMBERS + 1);
    // span is tiny, so the remainder always fits in u32
    SEED_MIN_MEMBERS + u32::try_from(hasher.finish() % span).unwrap_or(0)
}
