//! User repository - denormalized segment-name list on the user record
//!
//! This list is separate from the `user_segments` association table that
//! the HTTP handlers read and write. Nothing keeps the two in sync.

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::{Segment, User};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Merge segment names into a user's list, creating the user if needed.
    ///
    /// The stored list becomes the set union of the stored names, the names
    /// already carried by `user`, and the new ones. Single statement; store
    /// errors are returned unchanged.
    pub async fn add_user_segments(
        &self,
        user: &User,
        new_segments: &[Segment],
    ) -> Result<(), DbError> {
        let names = merged_names(&user.segments, new_segments);

        sqlx::query(
            r#"
            INSERT INTO users (user_id, segments)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE
            SET segments = COALESCE(
                (SELECT array_agg(DISTINCT s) FROM unnest(users.segments || EXCLUDED.segments) AS s),
                '{}'
            )
            "#,
        )
        .bind(user.id)
        .bind(names)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

/// `known` followed by the new segment names, duplicates removed,
/// first occurrence wins.
fn merged_names(known: &[String], segments: &[Segment]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(known.len() + segments.len());
    let candidates = known.iter().chain(segments.iter().map(|s| &s.name));
    for name in candidates {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}
