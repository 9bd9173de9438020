use crate::Catalog;
use crate::model::BrandCatalog;
use axum::Json;
use axum::extract::{Path, State};
use cargroup_derive::{api_handler, api_model};
use cargroup_kernel::domain::constants::CATALOG_TAG;
use cargroup_kernel::server::{ApiError, ApiState};

#[api_model(rename_all = "snake_case")]
/// Brand names in catalog order.
pub struct BrandList {
    pub brands: Vec<String>,
}

#[api_handler(
    get,
    path = "/car-data",
    responses((status = OK, description = "All catalog brands", body = BrandList)),
    tag = CATALOG_TAG,
)]
pub async fn list_brands(State(state): State<ApiState>) -> Result<Json<BrandList>, ApiError> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let brands = catalog.store.list_brands().into_iter().map(str::to_owned).collect();

    Ok(Json(BrandList { brands }))
}

#[api_handler(
    get,
    path = "/car-data/{brand}",
    params(("brand" = String, Path, description = "Brand name, case-sensitive")),
    responses((
        status = OK,
        description = "Model → variant → transmission → price (INR); `{}` for an unknown brand",
        content_type = "application/json",
    )),
    tag = CATALOG_TAG,
)]
pub async fn brand_catalog(
    State(state): State<ApiState>,
    Path(brand): Path<String>,
) -> Result<Json<BrandCatalog>, ApiError> {
    let catalog = state.try_get_slice::<Catalog>()?;
    Ok(Json(catalog.store.brand_catalog(&brand)))
}
