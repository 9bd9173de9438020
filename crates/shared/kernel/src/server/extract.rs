use super::error::ApiError;
use axum::Json;
use axum::extract::rejection::JsonRejection;

/// Unwraps a JSON body, turning deserialization failures into `400 INVALID_REQUEST`.
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<Json<R>, ApiError> {
///     let request = extract_json(body)?;
///     // ...
/// }
/// ```
pub fn extract_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(ApiError::from)
}
