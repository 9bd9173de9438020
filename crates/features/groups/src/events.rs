//! Notifications published on the event bus.

use crate::model::SeedReport;

/// A group's member count changed through `adjust_membership`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipChanged {
    pub region: String,
    pub brand: String,
    pub previous: u32,
    pub current: u32,
}

/// A seeding pass completed without interruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedingFinished(pub SeedReport);
