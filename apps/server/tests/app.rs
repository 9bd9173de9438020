use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use cargroup::domain::config::{ApiConfig, SslConfig};
use cargroup_server::Server;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

async fn app(config: ApiConfig) -> Router {
    Server::builder().config(config).build().await.unwrap().app()
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, response.into_body().collect().await.unwrap().to_bytes().to_vec())
}

async fn call_json(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = call(app, method, uri).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn build_registers_catalog_and_groups() {
    let server = Server::builder().build().await.unwrap();

    assert_eq!(server.state().slice_count(), 2);
    assert!(server.state().get_slice::<cargroup::features::groups::Groups>().is_some());
    assert!(server.state().get_slice::<cargroup::features::catalog::Catalog>().is_some());
}

#[tokio::test]
async fn health_is_served_outside_the_api_prefix() {
    let app = app(ApiConfig::default()).await;

    let (status, body) = call_json(&app, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");

    let (status, _) = call(&app, Method::GET, "/api/health").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn seed_then_query_delhi() {
    let app = app(ApiConfig::default()).await;

    let (status, body) = call_json(&app, Method::GET, "/api/groups?city=Delhi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(Vec::new()));

    let (status, body) = call_json(&app, Method::POST, "/api/seed-data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_groups_created"], 288);

    let (_, body) = call_json(&app, Method::GET, "/api/groups?city=Delhi").await;
    let groups = body.as_array().unwrap();
    assert_eq!(groups.len(), 8);
    for group in groups {
        let members = group["current_members"].as_u64().unwrap();
        assert!((15..=48).contains(&members));
    }

    let (status, body) = call_json(&app, Method::GET, "/api/car-data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["brands"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn startup_seeding_fills_the_grid() {
    let mut config = ApiConfig::default();
    config.groups.seed_on_startup = true;
    let app = app(config).await;

    let (_, body) = call_json(&app, Method::GET, "/api/groups").await;
    assert_eq!(body.as_array().unwrap().len(), 288);

    let (_, body) = call_json(&app, Method::POST, "/api/seed-data").await;
    assert_eq!(body["total_groups_created"], 0);
    assert_eq!(body["skipped_existing"], 288);
}

#[tokio::test]
async fn openapi_document_lists_prefixed_routes() {
    let app = app(ApiConfig::default()).await;

    let (status, doc) = call_json(&app, Method::GET, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    let paths = doc["paths"].as_object().unwrap();
    for path in ["/health", "/api/car-data/{brand}", "/api/groups", "/api/groups/{city}/{brand}/members"]
    {
        assert!(paths.contains_key(path), "missing {path}");
    }

    let (status, _) = call(&app, Method::GET, "/docs").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_certificate_fails_build() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ApiConfig::default();
    config.server.ssl =
        Some(SslConfig { cert: dir.path().join("cert.pem"), key: dir.path().join("key.pem") });

    let err = Server::builder().config(config).build().await.unwrap_err();
    assert!(err.to_string().contains("SSL certificate not found"));
}

#[tokio::test]
async fn bad_catalog_override_fails_build() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, "{ \"brands\": [] }").unwrap();

    let mut config = ApiConfig::default();
    config.catalog.path = Some(path);

    let err = Server::builder().config(config).build().await.unwrap_err();
    assert!(err.to_string().contains("Platform bootstrap failed"));
}
