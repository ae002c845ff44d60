//! Assignment repository - population reads and bulk association inserts

use sqlx::PgPool;

use crate::db::DbError;

/// Association repository over `users` and `user_segments`
pub struct AssignmentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AssignmentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every known user id.
    pub async fn user_ids(&self) -> Result<Vec<i64>, DbError> {
        let ids = sqlx::query_scalar::<_, i64>("SELECT user_id FROM users")
            .fetch_all(self.pool)
            .await?;

        Ok(ids)
    }

    /// Associate `segment_id` with every user in `user_ids` (atomic).
    ///
    /// Existing associations are left alone, so repeated calls never
    /// create duplicate rows. Returns the number of rows actually inserted.
    pub async fn assign(&self, segment_id: i64, user_ids: &[i64]) -> Result<u64, DbError> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO user_segments (user_id, segment_id)
            SELECT u.user_id, $2
            FROM UNNEST($1::BIGINT[]) AS u(user_id)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_ids)
        .bind(segment_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        Ok(inserted)
    }
}
