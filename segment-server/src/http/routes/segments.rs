//! Segment endpoints
//!
//! - POST   /segments          create, 201 with `{id, name}`
//! - PUT    /segments/{id}     rename, 200 with `{id, name}`
//! - DELETE /segments/{id}     delete with associations, plain-text confirmation
//! - POST   /segments/assign   assign to a random share of users, plain-text count

use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};

use crate::db::repos::{AssignmentRepo, SegmentRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId};
use crate::http::server::AppState;
use crate::models::{AssignmentRequest, Segment, SegmentRequest};

/// POST /segments - create a new segment
async fn create_segment(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SegmentRequest>,
) -> Result<(StatusCode, Json<Segment>), ApiError> {
    let segment = SegmentRepo::new(state.pool()).create(&req.name).await?;
    tracing::info!(segment_id = segment.id, name = %segment.name, "segment created");

    Ok((StatusCode::CREATED, Json(segment)))
}

/// DELETE /segments/{id} - delete a segment and all of its associations
async fn delete_segment(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<String, ApiError> {
    let associations = SegmentRepo::new(state.pool()).delete(id).await?;
    tracing::info!(segment_id = id, associations, "segment deleted");

    Ok(format!("Segment {} deleted", id))
}

/// PUT /segments/{id} - rename a segment
async fn update_segment(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    JsonBody(req): JsonBody<SegmentRequest>,
) -> Result<Json<Segment>, ApiError> {
    let segment = SegmentRepo::new(state.pool()).update(id, &req.name).await?;
    Ok(Json(segment))
}

/// POST /segments/assign - assign a segment to a random percentage of users
///
/// The population read and the association insert are separate steps, so
/// users added in between are not considered.
async fn assign_segment_to_users(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AssignmentRequest>,
) -> Result<String, ApiError> {
    let repo = AssignmentRepo::new(state.pool());

    let population = repo.user_ids().await?;
    let population_size = population.len();
    let selected = state.sampler().select(population, req.percent);
    let inserted = repo.assign(req.segment_id, &selected).await?;

    tracing::info!(
        segment_id = req.segment_id,
        percent = req.percent,
        population = population_size,
        assigned = selected.len(),
        inserted,
        "segment assigned"
    );

    Ok(format!(
        "Segment {} assigned to {} users",
        req.segment_id,
        selected.len()
    ))
}

/// Segment routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/segments", post(create_segment))
        .route("/segments/assign", post(assign_segment_to_users))
        .route("/segments/{id}", put(update_segment).delete(delete_segment))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};

    use crate::http::server::tests::{offline_router, send};

    fn request(method: &str, uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn status_and_error(method: &str, uri: &str, body: &'static str) -> (StatusCode, String) {
        let (status, body) = send(offline_router(), request(method, uri, body)).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        (status, json["error"].as_str().unwrap_or_default().to_owned())
    }

    #[tokio::test]
    async fn create_rejects_malformed_body() {
        let (status, error) = status_and_error("POST", "/segments", "{\"name\":").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, "validation_error");
    }

    #[tokio::test]
    async fn create_rejects_non_string_name() {
        let (status, _) = status_and_error("POST", "/segments", r#"{"name": 12}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_rejects_non_integer_id() {
        let (status, error) = status_and_error("DELETE", "/segments/abc", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, "validation_error");
    }

    #[tokio::test]
    async fn update_rejects_non_integer_id() {
        let (status, _) = status_and_error("PUT", "/segments/1.5", r#"{"name": "x"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_rejects_malformed_body() {
        let (status, _) = status_and_error("PUT", "/segments/1", "[]").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn assign_rejects_malformed_body() {
        let (status, _) =
            status_and_error("POST", "/segments/assign", r#"{"segment_id": "one", "percent": 5}"#)
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn assign_route_wins_over_id_route() {
        // "assign" must not be parsed as a segment id
        let (status, body) = send(
            offline_router(),
            request("DELETE", "/segments/assign", ""),
        )
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(!body.contains("validation_error"));
    }
}
