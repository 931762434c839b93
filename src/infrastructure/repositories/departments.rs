use crate::domain::departments::{Department, DepartmentRepository, NewDepartment, UpdateDepartment};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::organization::DepartmentDbModel;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresDepartmentRepository {
    pool: DbPool,
}

impl PostgresDepartmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn search_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s))
}

#[async_trait]
impl DepartmentRepository for PostgresDepartmentRepository {
    #[tracing::instrument(skip(self, new_department))]
    async fn create(&self, new_department: NewDepartment) -> Result<Department, anyhow::Error> {
        let department = sqlx::query_as::<_, DepartmentDbModel>(
            r#"
            INSERT INTO departments (code, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, code, name, description, created_at, updated_at
            "#,
        )
        .bind(new_department.code)
        .bind(new_department.name)
        .bind(new_department.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(department.into())
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>, anyhow::Error> {
        let department = sqlx::query_as::<_, DepartmentDbModel>(
            r#"
            SELECT id, code, name, description, created_at, updated_at
            FROM departments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_code(&self, code: &str) -> Result<Option<Department>, anyhow::Error> {
        let department = sqlx::query_as::<_, DepartmentDbModel>(
            r#"
            SELECT id, code, name, description, created_at, updated_at
            FROM departments
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Department>, anyhow::Error> {
        let departments = sqlx::query_as::<_, DepartmentDbModel>(
            r#"
            SELECT id, code, name, description, created_at, updated_at
            FROM departments
            WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR code ILIKE $1)
            ORDER BY name ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search_pattern(search))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(departments.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self, search: Option<&str>) -> Result<i64, anyhow::Error> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM departments
            WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR code ILIKE $1)
            "#,
        )
        .bind(search_pattern(search))
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update(
        &self,
        id: Uuid,
        update: UpdateDepartment,
    ) -> Result<Option<Department>, anyhow::Error> {
        let department = sqlx::query_as::<_, DepartmentDbModel>(
            r#"
            UPDATE departments SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, code, name, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(update.code)
        .bind(update.name)
        .bind(update.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
