use crate::domain::attendance::{AttendanceFilter, AttendanceRecord, AttendanceRepository};
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct AttendanceHistoryRequest {
    #[serde(default)]
    pub page: PageParams,
}

/// The caller's own attendance, newest first
pub struct AttendanceHistoryUseCase {
    attendances: Arc<dyn AttendanceRepository>,
}

impl AttendanceHistoryUseCase {
    pub fn new(attendances: Arc<dyn AttendanceRepository>) -> Self {
        Self { attendances }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        user_id: Uuid,
        req: AttendanceHistoryRequest,
    ) -> Result<Paginated<AttendanceRecord>, AppError> {
        let page = req.page.normalized();
        let filter = AttendanceFilter {
            user_id: Some(user_id),
            ..Default::default()
        };

        let (items, total) = futures::try_join!(
            self.attendances.find_all(&filter, page.limit(), page.offset()),
            self.attendances.count(&filter),
        )?;

        Ok(Paginated { items, total, page })
    }
}
