use crate::domain::locations::{Location, LocationRepository, NewLocation, UpdateLocation};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::organization::LocationDbModel;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresLocationRepository {
    pool: DbPool,
}

impl PostgresLocationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    #[tracing::instrument(skip(self, new_location))]
    async fn create(&self, new_location: NewLocation) -> Result<Location, anyhow::Error> {
        let location = sqlx::query_as::<_, LocationDbModel>(
            r#"
            INSERT INTO locations (name, address, latitude, longitude, radius_meters)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, address, latitude, longitude, radius_meters, created_at, updated_at
            "#,
        )
        .bind(new_location.name)
        .bind(new_location.address)
        .bind(new_location.latitude)
        .bind(new_location.longitude)
        .bind(new_location.radius_meters)
        .fetch_one(&self.pool)
        .await?;

        Ok(location.into())
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>, anyhow::Error> {
        let location = sqlx::query_as::<_, LocationDbModel>(
            r#"
            SELECT id, name, address, latitude, longitude, radius_meters, created_at, updated_at
            FROM locations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Location>, anyhow::Error> {
        let locations = sqlx::query_as::<_, LocationDbModel>(
            r#"
            SELECT id, name, address, latitude, longitude, radius_meters, created_at, updated_at
            FROM locations
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY name ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search.filter(|s| !s.is_empty()))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self, search: Option<&str>) -> Result<i64, anyhow::Error> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM locations
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(search.filter(|s| !s.is_empty()))
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update(
        &self,
        id: Uuid,
        update: UpdateLocation,
    ) -> Result<Option<Location>, anyhow::Error> {
        let location = sqlx::query_as::<_, LocationDbModel>(
            r#"
            UPDATE locations SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude),
                radius_meters = COALESCE($6, radius_meters),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, address, latitude, longitude, radius_meters, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.address)
        .bind(update.latitude)
        .bind(update.longitude)
        .bind(update.radius_meters)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
