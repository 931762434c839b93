use crate::application::attendance::check_in::AttendanceRequest;
use crate::application::attendance::{check_geofence, coordinates};
use crate::application::users::active_user;
use crate::domain::attendance::{Attendance, AttendanceRepository};
use crate::domain::locations::LocationRepository;
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use std::sync::Arc;
use time::{OffsetDateTime, UtcOffset};
use uuid::Uuid;

pub struct CheckOutUseCase {
    users: Arc<dyn UserRepository>,
    locations: Arc<dyn LocationRepository>,
    attendances: Arc<dyn AttendanceRepository>,
    utc_offset: UtcOffset,
}

impl CheckOutUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        locations: Arc<dyn LocationRepository>,
        attendances: Arc<dyn AttendanceRepository>,
        utc_offset: UtcOffset,
    ) -> Self {
        Self {
            users,
            locations,
            attendances,
            utc_offset,
        }
    }

    pub async fn execute(
        &self,
        user_id: Uuid,
        req: AttendanceRequest,
    ) -> Result<Attendance, AppError> {
        self.execute_at(user_id, req, OffsetDateTime::now_utc()).await
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute_at(
        &self,
        user_id: Uuid,
        req: AttendanceRequest,
        now: OffsetDateTime,
    ) -> Result<Attendance, AppError> {
        let user = active_user(&self.users, user_id).await?;
        let work_date = now.to_offset(self.utc_offset).date();

        let attendance = self
            .attendances
            .find_by_user_and_date(user.id, work_date)
            .await?
            .ok_or_else(|| AppError::NotFound("No check-in recorded today".to_string()))?;

        if attendance.check_out_at.is_some() {
            return Err(AppError::Conflict("Already checked out today".to_string()));
        }

        let position = coordinates(req.latitude, req.longitude)?;
        check_geofence(&self.locations, &user, position).await?;

        // None means another request checked out first
        self.attendances
            .check_out(attendance.id, now, position)
            .await?
            .ok_or_else(|| AppError::Conflict("Already checked out today".to_string()))
    }
}
