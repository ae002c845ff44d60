//! User endpoints

use axum::{extract::State, routing::get, Json, Router};

use crate::db::repos::SegmentRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;
use crate::models::Segment;

/// GET /users/{id}/segments - segments a user is associated with
///
/// A user without associations (or unknown to the store) gets `[]`.
async fn get_user_segments(
    State(state): State<AppState>,
    ValidId(user_id): ValidId,
) -> Result<Json<Vec<Segment>>, ApiError> {
    let segments = SegmentRepo::new(state.pool()).for_user(user_id).await?;
    tracing::debug!(user_id, count = segments.len(), "user segments loaded");

    Ok(Json(segments))
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new().route("/users/{id}/segments", get(get_user_segments))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};

    use crate::http::server::tests::{offline_router, send};

    #[tokio::test]
    async fn rejects_non_integer_user_id() {
        let (status, body) = send(
            offline_router(),
            Request::builder()
                .uri("/users/me/segments")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("must be an integer"));
    }
}
