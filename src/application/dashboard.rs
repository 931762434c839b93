use crate::domain::dashboard::{DashboardRepository, DashboardSummary};
use crate::shared::error::AppError;
use std::sync::Arc;
use time::{OffsetDateTime, UtcOffset};

/// Daily headcount for the company-local date
pub struct DashboardSummaryUseCase {
    repo: Arc<dyn DashboardRepository>,
    utc_offset: UtcOffset,
}

impl DashboardSummaryUseCase {
    pub fn new(repo: Arc<dyn DashboardRepository>, utc_offset: UtcOffset) -> Self {
        Self { repo, utc_offset }
    }

    pub async fn execute(&self) -> Result<DashboardSummary, AppError> {
        self.execute_at(OffsetDateTime::now_utc()).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute_at(&self, now: OffsetDateTime) -> Result<DashboardSummary, AppError> {
        let date = now.to_offset(self.utc_offset).date();
        Ok(self.repo.summary(date).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use time::Date;
    use time::macros::{date, datetime, offset};

    struct FixedDashboard;

    #[async_trait]
    impl DashboardRepository for FixedDashboard {
        async fn summary(&self, date: Date) -> Result<DashboardSummary, anyhow::Error> {
            Ok(DashboardSummary {
                date,
                active_employees: 12,
                present_today: 9,
                late_today: 2,
                on_leave_today: 1,
                pending_leave_requests: 3,
                departments: 4,
            })
        }
    }

    #[tokio::test]
    async fn test_summary_uses_local_date() {
        let summary = DashboardSummaryUseCase::new(Arc::new(FixedDashboard), offset!(+7))
            .execute_at(datetime!(2025-03-06 20:00 UTC))
            .await
            .unwrap();

        assert_eq!(summary.date, date!(2025 - 03 - 07));
        assert_eq!(summary.present_today, 9);
    }
}
