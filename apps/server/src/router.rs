use axum::routing::get;
use axum::{Json, Router};
use cargroup::kernel::server::ApiState;
use cargroup::server::router::{api_router, system_router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(
    title = "CarGroup API",
    description = "Vehicle catalog and regional purchase groups"
))]
struct ApiDoc;

pub(crate) fn init(state: ApiState) -> Router {
    let (routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(system_router())
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    let document = api_doc.clone();
    let openapi = Router::new().route(
        "/openapi.json",
        get(move || {
            let document = document.clone();
            async move { Json(document) }
        }),
    );

    Router::new().merge(routes).merge(openapi).merge(Scalar::with_url("/docs", api_doc))
}
