//! Segment records and request bodies

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named cohort of users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Segment {
    pub id: i64,
    pub name: String,
}

/// Body of segment create and update requests
///
/// A missing `name` decodes as the empty string.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentRequest {
    #[serde(default)]
    pub name: String,
}

/// Body of an assignment request
///
/// Missing fields decode as zero. `percent` is not range-checked; see
/// [`crate::sampling::selection_size`].
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentRequest {
    #[serde(default)]
    pub segment_id: i64,
    #[serde(default)]
    pub percent: f64,
}
