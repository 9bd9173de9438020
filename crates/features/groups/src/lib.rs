//! Purchase group slice.
//!
//! One group per (region, brand) pair, capped at 50 members.
//!
//! * [`GroupRegistry`] owns the groups and enforces uniqueness and capacity.
//! * [`SeedingService`] fills the region × brand grid, idempotently.
//! * [`QueryService`] turns region filters into wire views.
//!
//! Membership changes and finished seeding passes are published on the
//! event bus as [`events::MembershipChanged`] and [`events::SeedingFinished`].

mod error;
pub mod events;
#[cfg(feature = "server")]
pub mod handlers;
pub mod model;
mod policy;
mod query;
mod registry;
mod seeding;
pub mod store;

pub use error::{GroupsError, GroupsErrorExt};
pub use policy::MembershipPolicy;
pub use query::QueryService;
pub use registry::GroupRegistry;
pub use seeding::SeedingService;

use cargroup_catalog::Catalog;
use cargroup_event_bus::EventBus;
use cargroup_kernel::domain::config::ApiConfig;
use cargroup_kernel::domain::registry::InitializedSlice;
use std::sync::Arc;
use std::time::Duration;
use store::MemoryStore;

/// Groups feature state.
#[cargroup_derive::cargroup_slice]
pub struct Groups {
    pub registry: Arc<GroupRegistry>,
    pub seeding: Arc<SeedingService>,
    pub query: Arc<QueryService>,
}

/// Wires the registry and services over an in-memory store.
pub fn build(config: &ApiConfig, catalog: &Catalog, events: &EventBus) -> Groups {
    let registry = Arc::new(GroupRegistry::new(
        MemoryStore::new(),
        Duration::from_millis(config.groups.storage_timeout_ms),
        events.clone(),
    ));
    let brands = catalog.store.list_brands().into_iter().map(str::to_owned).collect();
    let seeding = SeedingService::new(
        Arc::clone(&registry),
        brands,
        config.groups.seed_policy.into(),
        events.clone(),
    );
    let query = QueryService::new(Arc::clone(&registry));

    Groups::new(GroupsInner { registry, seeding: Arc::new(seeding), query: Arc::new(query) })
}

/// Initialize the groups feature.
pub fn init(config: &ApiConfig, catalog: &Catalog, events: &EventBus) -> InitializedSlice {
    let groups = build(config, catalog, events);
    tracing::info!(
        policy = ?config.groups.seed_policy,
        timeout_ms = config.groups.storage_timeout_ms,
        "Groups slice initialized"
    );
    InitializedSlice::new(groups)
}

#[cfg(feature = "server")]
pub fn groups_router() -> utoipa_axum::router::OpenApiRouter<cargroup_kernel::server::ApiState> {
    use utoipa_axum::routes;

    utoipa_axum::router::OpenApiRouter::new()
        .routes(routes!(handlers::seed_data))
        .routes(routes!(handlers::list_groups))
        .routes(routes!(handlers::get_group))
        .routes(routes!(handlers::adjust_members))
}
