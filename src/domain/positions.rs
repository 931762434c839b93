use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Position {
    pub id: Uuid,
    pub name: String,
    pub department_id: Option<Uuid>,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewPosition {
    pub name: String,
    pub department_id: Option<Uuid>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePosition {
    pub name: Option<String>,
    pub department_id: Option<Uuid>,
    pub description: Option<String>,
}

#[async_trait]
pub trait PositionRepository: Send + Sync {
    async fn create(&self, new_position: NewPosition) -> Result<Position, anyhow::Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Position>, anyhow::Error>;
    async fn find_all(
        &self,
        search: Option<&str>,
        department_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Position>, anyhow::Error>;
    async fn count(
        &self,
        search: Option<&str>,
        department_id: Option<Uuid>,
    ) -> Result<i64, anyhow::Error>;
    async fn update(
        &self,
        id: Uuid,
        update: UpdatePosition,
    ) -> Result<Option<Position>, anyhow::Error>;
    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error>;
}
