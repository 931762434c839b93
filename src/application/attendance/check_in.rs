use crate::application::attendance::{check_geofence, coordinates};
use crate::application::users::active_user;
use crate::domain::attendance::{
    Attendance, AttendanceRepository, AttendanceStatus, NewAttendance,
};
use crate::domain::locations::LocationRepository;
use crate::domain::shifts::ShiftRepository;
use crate::domain::users::UserRepository;
use crate::infrastructure::db::is_unique_violation;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use time::{OffsetDateTime, UtcOffset};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct AttendanceRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    #[schema(example = -6.2088)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    #[schema(example = 106.8456)]
    pub longitude: Option<f64>,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

pub struct CheckInUseCase {
    users: Arc<dyn UserRepository>,
    locations: Arc<dyn LocationRepository>,
    shifts: Arc<dyn ShiftRepository>,
    attendances: Arc<dyn AttendanceRepository>,
    utc_offset: UtcOffset,
}

impl CheckInUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        locations: Arc<dyn LocationRepository>,
        shifts: Arc<dyn ShiftRepository>,
        attendances: Arc<dyn AttendanceRepository>,
        utc_offset: UtcOffset,
    ) -> Self {
        Self {
            users,
            locations,
            shifts,
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
        let local = now.to_offset(self.utc_offset);
        let work_date = local.date();

        if self
            .attendances
            .find_by_user_and_date(user.id, work_date)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Already checked in today".to_string()));
        }

        let position = coordinates(req.latitude, req.longitude)?;
        check_geofence(&self.locations, &user, position).await?;

        let late = match user.shift_id {
            Some(shift_id) => self
                .shifts
                .find_by_id(shift_id)
                .await?
                .is_some_and(|shift| shift.is_late(local.time())),
            None => false,
        };
        let status = if late {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        };

        let attendance = self
            .attendances
            .create(NewAttendance {
                user_id: user.id,
                work_date,
                check_in_at: now,
                check_in_location: position,
                status,
                note: req.note,
            })
            .await
            .map_err(|e| {
                // a concurrent check-in won the (user_id, work_date) race
                if is_unique_violation(&e) {
                    AppError::Conflict("Already checked in today".to_string())
                } else {
                    AppError::InternalServerError(e)
                }
            })?;

        tracing::info!(%work_date, status = %attendance.status, "Checked in");
        Ok(attendance)
    }
}
