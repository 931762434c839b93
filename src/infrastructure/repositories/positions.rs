use crate::domain::positions::{NewPosition, Position, PositionRepository, UpdatePosition};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::organization::PositionDbModel;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresPositionRepository {
    pool: DbPool,
}

impl PostgresPositionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PositionRepository for PostgresPositionRepository {
    #[tracing::instrument(skip(self, new_position))]
    async fn create(&self, new_position: NewPosition) -> Result<Position, anyhow::Error> {
        let position = sqlx::query_as::<_, PositionDbModel>(
            r#"
            INSERT INTO positions (name, department_id, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, department_id, description, created_at, updated_at
            "#,
        )
        .bind(new_position.name)
        .bind(new_position.department_id)
        .bind(new_position.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(position.into())
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Position>, anyhow::Error> {
        let position = sqlx::query_as::<_, PositionDbModel>(
            r#"
            SELECT id, name, department_id, description, created_at, updated_at
            FROM positions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(position.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(
        &self,
        search: Option<&str>,
        department_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Position>, anyhow::Error> {
        let positions = sqlx::query_as::<_, PositionDbModel>(
            r#"
            SELECT id, name, department_id, description, created_at, updated_at
            FROM positions
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::UUID IS NULL OR department_id = $2)
            ORDER BY name ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(search.filter(|s| !s.is_empty()))
        .bind(department_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(positions.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn count(
        &self,
        search: Option<&str>,
        department_id: Option<Uuid>,
    ) -> Result<i64, anyhow::Error> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM positions
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::UUID IS NULL OR department_id = $2)
            "#,
        )
        .bind(search.filter(|s| !s.is_empty()))
        .bind(department_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update(
        &self,
        id: Uuid,
        update: UpdatePosition,
    ) -> Result<Option<Position>, anyhow::Error> {
        let position = sqlx::query_as::<_, PositionDbModel>(
            r#"
            UPDATE positions SET
                name = COALESCE($2, name),
                department_id = COALESCE($3, department_id),
                description = COALESCE($4, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, department_id, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.department_id)
        .bind(update.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(position.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM positions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
