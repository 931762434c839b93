use crate::domain::shifts::{NewShift, Shift, ShiftRepository, UpdateShift};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::organization::ShiftDbModel;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresShiftRepository {
    pool: DbPool,
}

impl PostgresShiftRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShiftRepository for PostgresShiftRepository {
    #[tracing::instrument(skip(self, new_shift))]
    async fn create(&self, new_shift: NewShift) -> Result<Shift, anyhow::Error> {
        let shift = sqlx::query_as::<_, ShiftDbModel>(
            r#"
            INSERT INTO shifts (name, start_time, end_time, late_tolerance_minutes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, start_time, end_time, late_tolerance_minutes, created_at, updated_at
            "#,
        )
        .bind(new_shift.name)
        .bind(new_shift.start_time)
        .bind(new_shift.end_time)
        .bind(new_shift.late_tolerance_minutes)
        .fetch_one(&self.pool)
        .await?;

        Ok(shift.into())
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Shift>, anyhow::Error> {
        let shift = sqlx::query_as::<_, ShiftDbModel>(
            r#"
            SELECT id, name, start_time, end_time, late_tolerance_minutes, created_at, updated_at
            FROM shifts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Shift>, anyhow::Error> {
        let shifts = sqlx::query_as::<_, ShiftDbModel>(
            r#"
            SELECT id, name, start_time, end_time, late_tolerance_minutes, created_at, updated_at
            FROM shifts
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY start_time ASC, name ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search.filter(|s| !s.is_empty()))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(shifts.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self, search: Option<&str>) -> Result<i64, anyhow::Error> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM shifts WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')",
        )
        .bind(search.filter(|s| !s.is_empty()))
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update(&self, id: Uuid, update: UpdateShift) -> Result<Option<Shift>, anyhow::Error> {
        let shift = sqlx::query_as::<_, ShiftDbModel>(
            r#"
            UPDATE shifts SET
                name = COALESCE($2, name),
                start_time = COALESCE($3, start_time),
                end_time = COALESCE($4, end_time),
                late_tolerance_minutes = COALESCE($5, late_tolerance_minutes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, start_time, end_time, late_tolerance_minutes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.start_time)
        .bind(update.end_time)
        .bind(update.late_tolerance_minutes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM shifts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
