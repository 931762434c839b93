use crate::domain::dashboard::{DashboardRepository, DashboardSummary};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use time::Date;

#[derive(Clone)]
pub struct PostgresDashboardRepository {
    pool: DbPool,
}

impl PostgresDashboardRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn scalar(&self, sql: &str, date: Option<Date>) -> Result<i64, anyhow::Error> {
        let mut query = sqlx::query_as::<_, (i64,)>(sql);
        if let Some(date) = date {
            query = query.bind(date);
        }
        let (count,) = query.fetch_one(&self.pool).await?;
        Ok(count)
    }
}

#[async_trait]
impl DashboardRepository for PostgresDashboardRepository {
    #[tracing::instrument(skip(self))]
    async fn summary(&self, date: Date) -> Result<DashboardSummary, anyhow::Error> {
        let (
            active_employees,
            present_today,
            late_today,
            on_leave_today,
            pending_leave_requests,
            departments,
        ) = futures::try_join!(
            self.scalar("SELECT COUNT(*) FROM users WHERE is_active = TRUE", None),
            self.scalar(
                "SELECT COUNT(*) FROM attendances WHERE work_date = $1",
                Some(date)
            ),
            self.scalar(
                "SELECT COUNT(*) FROM attendances WHERE work_date = $1 AND status = 'late'",
                Some(date)
            ),
            self.scalar(
                r#"
                SELECT COUNT(DISTINCT user_id) FROM leave_requests
                WHERE status = 'approved' AND start_date <= $1 AND end_date >= $1
                "#,
                Some(date)
            ),
            self.scalar(
                "SELECT COUNT(*) FROM leave_requests WHERE status = 'pending'",
                None
            ),
            self.scalar("SELECT COUNT(*) FROM departments", None),
        )?;

        Ok(DashboardSummary {
            date,
            active_employees,
            present_today,
            late_today,
            on_leave_today,
            pending_leave_requests,
            departments,
        })
    }
}
