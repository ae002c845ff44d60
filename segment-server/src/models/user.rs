//! User record with its denormalized segment-name list

use serde::{Deserialize, Serialize};

/// A user and the segment names stored on the user row
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub segments: Vec<String>,
}

impl User {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            segments: Vec::new(),
        }
    }
}
