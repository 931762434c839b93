use crate::domain::users::{NewUser, UpdateUser, User, UserFilter, UserRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::users::{USER_COLUMNS, UserDbModel};
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: DbPool,
}

impl PostgresUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &UserFilter) {
    if let Some(department_id) = filter.department_id {
        qb.push(" AND department_id = ").push_bind(department_id);
    }
    if let Some(role) = filter.role {
        qb.push(" AND role = ").push_bind(role.as_str());
    }
    if let Some(active) = filter.active {
        qb.push(" AND is_active = ").push_bind(active);
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip(self, new_user), fields(email = %new_user.email))]
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error> {
        let user = sqlx::query_as::<_, UserDbModel>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, role, phone,
                               department_id, position_id, location_id, shift_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(new_user.name)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.role.as_str())
        .bind(new_user.phone)
        .bind(new_user.department_id)
        .bind(new_user.position_id)
        .bind(new_user.location_id)
        .bind(new_user.shift_id)
        .fetch_one(&self.pool)
        .await?;

        user.try_into()
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, anyhow::Error> {
        let user = sqlx::query_as::<_, UserDbModel>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        user.map(TryInto::try_into).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error> {
        let user = sqlx::query_as::<_, UserDbModel>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        user.map(TryInto::try_into).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(
        &self,
        filter: &UserFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, anyhow::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM users WHERE 1 = 1",
            USER_COLUMNS
        ));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY name ASC, created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let users = qb
            .build_query_as::<UserDbModel>()
            .fetch_all(&self.pool)
            .await?;

        users.into_iter().map(TryInto::try_into).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self, filter: &UserFilter) -> Result<i64, anyhow::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users WHERE 1 = 1");
        push_filter(&mut qb, filter);

        let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(count)
    }

    #[tracing::instrument(skip(self, update))]
    async fn update(&self, id: Uuid, update: UpdateUser) -> Result<Option<User>, anyhow::Error> {
        let user = sqlx::query_as::<_, UserDbModel>(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                role = COALESCE($5, role),
                phone = COALESCE($6, phone),
                department_id = COALESCE($7, department_id),
                position_id = COALESCE($8, position_id),
                location_id = COALESCE($9, location_id),
                shift_id = COALESCE($10, shift_id),
                is_active = COALESCE($11, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(update.name)
        .bind(update.email)
        .bind(update.password_hash)
        .bind(update.role.map(|r| r.as_str()))
        .bind(update.phone)
        .bind(update.department_id)
        .bind(update.position_id)
        .bind(update.location_id)
        .bind(update.shift_id)
        .bind(update.is_active)
        .fetch_optional(&self.pool)
        .await?;

        user.map(TryInto::try_into).transpose()
    }
}
