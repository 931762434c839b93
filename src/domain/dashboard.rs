use async_trait::async_trait;
use time::Date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub date: Date,
    pub active_employees: i64,
    pub present_today: i64,
    pub late_today: i64,
    pub on_leave_today: i64,
    pub pending_leave_requests: i64,
    pub departments: i64,
}

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn summary(&self, date: Date) -> Result<DashboardSummary, anyhow::Error>;
}
