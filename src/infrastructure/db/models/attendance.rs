use super::parse_column;
use crate::domain::attendance::{Attendance, AttendanceRecord, Coordinates};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

pub const ATTENDANCE_COLUMNS: &str = "a.id, a.user_id, a.work_date, a.check_in_at, a.check_out_at, \
     a.check_in_latitude, a.check_in_longitude, a.check_out_latitude, a.check_out_longitude, \
     a.status, a.note, a.created_at, a.updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct AttendanceDbModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub work_date: Date,
    pub check_in_at: OffsetDateTime,
    pub check_out_at: Option<OffsetDateTime>,
    pub check_in_latitude: Option<f64>,
    pub check_in_longitude: Option<f64>,
    pub check_out_latitude: Option<f64>,
    pub check_out_longitude: Option<f64>,
    pub status: String,
    pub note: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

fn coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinates> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        _ => None,
    }
}

impl TryFrom<AttendanceDbModel> for Attendance {
    type Error = anyhow::Error;

    fn try_from(model: AttendanceDbModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            work_date: model.work_date,
            check_in_at: model.check_in_at,
            check_out_at: model.check_out_at,
            check_in_location: coordinates(model.check_in_latitude, model.check_in_longitude),
            check_out_location: coordinates(model.check_out_latitude, model.check_out_longitude),
            status: parse_column("attendances.status", &model.status)?,
            note: model.note,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRecordDbModel {
    #[sqlx(flatten)]
    pub attendance: AttendanceDbModel,
    pub employee_name: String,
    pub department_id: Option<Uuid>,
    pub department_name: Option<String>,
}

impl TryFrom<AttendanceRecordDbModel> for AttendanceRecord {
    type Error = anyhow::Error;

    fn try_from(model: AttendanceRecordDbModel) -> Result<Self, Self::Error> {
        Ok(Self {
            attendance: model.attendance.try_into()?,
            employee_name: model.employee_name,
            department_id: model.department_id,
            department_name: model.department_name,
        })
    }
}
