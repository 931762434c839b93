use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Department {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewDepartment {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDepartment {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn create(&self, new_department: NewDepartment) -> Result<Department, anyhow::Error>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>, anyhow::Error>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Department>, anyhow::Error>;
    async fn find_all(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Department>, anyhow::Error>;
    async fn count(&self, search: Option<&str>) -> Result<i64, anyhow::Error>;
    async fn update(
        &self,
        id: Uuid,
        update: UpdateDepartment,
    ) -> Result<Option<Department>, anyhow::Error>;
    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error>;
}
