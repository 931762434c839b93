use crate::domain::attendance::{
    AttendanceFilter, AttendanceRecord, AttendanceRepository, AttendanceStatus,
};
use crate::shared::error::AppError;
use crate::shared::pagination::{PageParams, Paginated};
use crate::shared::query::parse_date_param;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// `filter[...]` of the admin attendance report; dates are `YYYY-MM-DD`
#[derive(Debug, Default, Deserialize)]
pub struct AttendanceFilterParams {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub user_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListAttendanceRequest {
    #[serde(default)]
    pub page: PageParams,
    #[serde(default)]
    pub filter: AttendanceFilterParams,
}

impl AttendanceFilterParams {
    fn into_filter(self) -> Result<AttendanceFilter, AppError> {
        let date_from = parse_date_param("date_from", self.date_from.as_deref())?;
        let date_to = parse_date_param("date_to", self.date_to.as_deref())?;

        if let (Some(from), Some(to)) = (date_from, date_to) {
            if from > to {
                return Err(AppError::ValidationError(
                    "date_from must not be after date_to".to_string(),
                ));
            }
        }

        Ok(AttendanceFilter {
            date_from,
            date_to,
            user_id: self.user_id,
            department_id: self.department_id,
            status: self.status,
        })
    }
}

pub struct ListAttendanceUseCase {
    attendances: Arc<dyn AttendanceRepository>,
}

impl ListAttendanceUseCase {
    pub fn new(attendances: Arc<dyn AttendanceRepository>) -> Self {
        Self { attendances }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        req: ListAttendanceRequest,
    ) -> Result<Paginated<AttendanceRecord>, AppError> {
        let page = req.page.normalized();
        let filter = req.filter.into_filter()?;

        let (items, total) = futures::try_join!(
            self.attendances.find_all(&filter, page.limit(), page.offset()),
            self.attendances.count(&filter),
        )?;

        Ok(Paginated { items, total, page })
    }
}
