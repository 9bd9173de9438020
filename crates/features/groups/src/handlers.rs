use crate::Groups;
use crate::error::GroupsError;
use crate::model::{GroupView, MembershipDelta, SeedResponse};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use cargroup_derive::api_handler;
use cargroup_kernel::domain::constants::GROUPS_TAG;
use cargroup_kernel::server::{ApiError, ApiState, ErrorBody, extract_json};
use serde::Deserialize;
use utoipa::IntoParams;

impl From<GroupsError> for ApiError {
    fn from(err: GroupsError) -> Self {
        let message = err.to_string();
        match err {
            GroupsError::DuplicateGroup { .. } => {
                Self::new(StatusCode::CONFLICT, "DUPLICATE_GROUP", message)
            },
            GroupsError::GroupNotFound { .. } => Self::not_found(message),
            GroupsError::InvalidMembership { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_MEMBERSHIP", message)
            },
            GroupsError::CapacityExceeded { .. } => {
                Self::new(StatusCode::CONFLICT, "CAPACITY_EXCEEDED", message)
            },
            GroupsError::SeedingInProgress { .. } => {
                Self::new(StatusCode::CONFLICT, "SEEDING_IN_PROGRESS", message)
            },
            GroupsError::SeedingInterrupted { created, skipped, .. } => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "SEEDING_INTERRUPTED", message)
                    .with_details(serde_json::json!({ "created": created, "skipped": skipped }))
            },
            GroupsError::Persistence { .. } => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "PERSISTENCE_ERROR", message)
            },
            GroupsError::Internal { .. } => Self::internal(message),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GroupsQuery {
    /// Region to filter by; all groups when omitted
    pub city: Option<String>,
}

#[api_handler(
    post,
    path = "/seed-data",
    responses(
        (status = OK, description = "Seeding pass finished", body = SeedResponse),
        (status = CONFLICT, description = "Another pass is running", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Pass interrupted; partial counts in details", body = ErrorBody),
    ),
    tag = GROUPS_TAG,
)]
pub async fn seed_data(State(state): State<ApiState>) -> Result<Json<SeedResponse>, ApiError> {
    let groups = state.try_get_slice::<Groups>()?;
    let report = groups.seeding.seed_all().await?;
    Ok(Json(report.into()))
}

#[api_handler(
    get,
    path = "/groups",
    params(GroupsQuery),
    responses((status = OK, description = "Groups of the region, or every group", body = [GroupView])),
    tag = GROUPS_TAG,
)]
pub async fn list_groups(
    State(state): State<ApiState>,
    Query(query): Query<GroupsQuery>,
) -> Result<Json<Vec<GroupView>>, ApiError> {
    let groups = state.try_get_slice::<Groups>()?;
    let views = match query.city.as_deref() {
        Some(city) => groups.query.groups_for_region(city).await?,
        None => groups.query.all_groups().await?,
    };
    Ok(Json(views))
}

#[api_handler(
    get,
    path = "/groups/{city}/{brand}",
    params(
        ("city" = String, Path, description = "Region name"),
        ("brand" = String, Path, description = "Brand name"),
    ),
    responses(
        (status = OK, description = "The group", body = GroupView),
        (status = NOT_FOUND, description = "No such group", body = ErrorBody),
    ),
    tag = GROUPS_TAG,
)]
pub async fn get_group(
    State(state): State<ApiState>,
    Path((city, brand)): Path<(String, String)>,
) -> Result<Json<GroupView>, ApiError> {
    let groups = state.try_get_slice::<Groups>()?;
    Ok(Json(groups.query.group(&city, &brand).await?))
}

#[api_handler(
    post,
    path = "/groups/{city}/{brand}/members",
    params(
        ("city" = String, Path, description = "Region name"),
        ("brand" = String, Path, description = "Brand name"),
    ),
    request_body = MembershipDelta,
    responses(
        (status = OK, description = "Updated group", body = GroupView),
        (status = BAD_REQUEST, description = "Malformed request body", body = ErrorBody),
        (status = NOT_FOUND, description = "No such group", body = ErrorBody),
        (status = CONFLICT, description = "Group capacity exceeded", body = ErrorBody),
        (status = UNPROCESSABLE_ENTITY, description = "Membership would drop below zero", body = ErrorBody),
    ),
    tag = GROUPS_TAG,
)]
pub async fn adjust_members(
    State(state): State<ApiState>,
    Path((city, brand)): Path<(String, String)>,
    body: Result<Json<MembershipDelta>, JsonRejection>,
) -> Result<Json<GroupView>, ApiError> {
    let body = extract_json(body)?;
    let groups = state.try_get_slice::<Groups>()?;
    let group = groups.registry.adjust_membership(&city, &brand, body.delta).await?;
    Ok(Json(group.into()))
}
