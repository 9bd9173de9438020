//! Vehicle catalog slice.
//!
//! Holds the read-only brand → model → variant → transmission → price
//! reference data and serves it under `/car-data`.

mod error;
#[cfg(feature = "server")]
pub mod handlers;
pub mod model;
mod store;

pub use error::{CatalogError, CatalogErrorExt};
pub use store::CatalogStore;

use cargroup_kernel::domain::config::ApiConfig;
use cargroup_kernel::domain::registry::InitializedSlice;

/// Catalog feature state.
#[cargroup_derive::cargroup_slice]
pub struct Catalog {
    pub store: CatalogStore,
}

/// Loads the catalog: the override file from `catalog.path`, else the embedded data.
///
/// The groups slice is wired from the returned brand list before the catalog
/// is registered with [`Catalog::into_slice`].
pub fn load(config: &ApiConfig) -> Result<Catalog, CatalogError> {
    let store = match &config.catalog.path {
        Some(path) => CatalogStore::from_path(path)?,
        None => CatalogStore::embedded()?,
    };
    tracing::info!(
        brands = store.list_brands().len(),
        source = if config.catalog.path.is_some() { "override" } else { "embedded" },
        "Catalog slice initialized"
    );
    Ok(Catalog::new(CatalogInner { store }))
}

impl Catalog {
    /// Wraps the catalog for registration in the API state.
    #[must_use]
    pub fn into_slice(self) -> InitializedSlice {
        InitializedSlice::new(self)
    }
}

#[cfg(feature = "server")]
pub fn catalog_router() -> utoipa_axum::router::OpenApiRouter<cargroup_kernel::server::ApiState> {
    use utoipa_axum::routes;

    utoipa_axum::router::OpenApiRouter::new()
        .routes(routes!(handlers::list_brands))
        .routes(routes!(handlers::brand_catalog))
}
