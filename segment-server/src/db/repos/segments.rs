//! Segment repository
//!
//! - create: INSERT ... RETURNING for the generated id
//! - delete: associations and segment removed in one transaction
//! - for_user: single JOIN over the association table

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::Segment;

/// Segment repository
pub struct SegmentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SegmentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a segment and return it with its store-assigned id.
    pub async fn create(&self, name: &str) -> Result<Segment, DbError> {
        let segment = sqlx::query_as::<_, Segment>(
            "INSERT INTO segments (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(segment)
    }

    /// Rename a segment.
    ///
    /// Echoes `{id, name}` even when no row matched; a missing segment is
    /// not an error here.
    pub async fn update(&self, id: i64, name: &str) -> Result<Segment, DbError> {
        let result = sqlx::query("UPDATE segments SET name = $1 WHERE id = $2")
            .bind(name)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(segment_id = id, "update matched no segment");
        }

        Ok(Segment {
            id,
            name: name.to_owned(),
        })
    }

    /// Delete a segment together with all of its user associations (atomic).
    ///
    /// Returns the number of association rows removed. Deleting an id that
    /// does not exist succeeds and removes nothing.
    pub async fn delete(&self, id: i64) -> Result<u64, DbError> {
        // Rolled back on drop if either statement fails
        let mut tx = self.pool.begin().await?;

        let associations = sqlx::query("DELETE FROM user_segments WHERE segment_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM segments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(associations)
    }

    /// Segments associated with a user, ordered by id.
    pub async fn for_user(&self, user_id: i64) -> Result<Vec<Segment>, DbError> {
        let segments = sqlx::query_as::<_, Segment>(
            r#"
            SELECT s.id, s.name
            FROM segments s
            JOIN user_segments us ON s.id = us.segment_id
            WHERE us.user_id = $1
            ORDER BY s.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(segments)
    }
}
