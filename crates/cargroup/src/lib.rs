//! Facade crate for CarGroup features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it composes other crates and holds no business logic.
//!
//! ## Usage
//! - Add `cargroup` with the `server` feature.
//! - Call [`init`] to build the feature slices, then mount [`server::router::api_router`]
//!   under `/api`.

pub use cargroup_domain as domain;
use cargroup_domain::config::ApiConfig;
use cargroup_domain::registry::InitializedSlice;
use cargroup_event_bus::EventBus;
pub use cargroup_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use cargroup_kernel::server::router::system_router;

        use cargroup_kernel::server::ApiState;
        use utoipa_axum::router::OpenApiRouter;

        /// Feature routes, relative to the `/api` prefix.
        pub fn api_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new()
                .merge(crate::features::catalog::catalog_router())
                .merge(crate::features::groups::groups_router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use cargroup_catalog as catalog;
    pub use cargroup_groups as groups;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "catalog",
        "groups",
    ];
}

/// Initialize every feature slice.
///
/// The catalog loads first; groups are seeded from its brand list.
///
/// # Errors
/// Returns an error if the catalog cannot be loaded or fails validation.
pub fn init(
    config: &ApiConfig,
    events: &EventBus,
) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let catalog = features::catalog::load(config)?;
    let groups = features::groups::init(config, &catalog, events);

    Ok(vec![catalog.into_slice(), groups])
}

#[cfg(test)]
mod tests {
    use super::*;
    use cargroup_groups::Groups;

    #[test]
    fn init_builds_both_slices() {
        let slices = init(&ApiConfig::default(), &EventBus::new()).unwrap();

        assert_eq!(slices.len(), 2);
        assert!(slices[0].downcast_ref::<features::catalog::Catalog>().is_some());
        let groups = slices[1].downcast_ref::<Groups>().unwrap();
        assert_eq!(groups.seeding.brands().len(), domain::constants::BRAND_COUNT);
    }

    #[test]
    fn bad_catalog_path_fails_init() {
        let mut config = ApiConfig::default();
        config.catalog.path = Some("/nonexistent/catalog.json".into());

        assert!(init(&config, &EventBus::new()).is_err());
    }

    #[cfg(feature = "server")]
    #[test]
    fn api_router_documents_every_route() {
        let (_, api) = server::router::api_router().split_for_parts();
        for path in [
            "/car-data",
            "/car-data/{brand}",
            "/seed-data",
            "/groups",
            "/groups/{city}/{brand}",
            "/groups/{city}/{brand}/members",
        ] {
            assert!(api.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
