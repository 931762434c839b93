use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "late" => Ok(AttendanceStatus::Late),
            _ => Err(format!("Unknown attendance status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone)]
pub struct Attendance {
    pub id: Uuid,
    pub user_id: Uuid,
    pub work_date: Date,
    pub check_in_at: OffsetDateTime,
    pub check_out_at: Option<OffsetDateTime>,
    pub check_in_location: Option<Coordinates>,
    pub check_out_location: Option<Coordinates>,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Attendance row joined with the employee it belongs to
#[derive(Debug, Clone)]
pub struct AttendanceRecord {
    pub attendance: Attendance,
    pub employee_name: String,
    pub department_id: Option<Uuid>,
    pub department_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub user_id: Uuid,
    pub work_date: Date,
    pub check_in_at: OffsetDateTime,
    pub check_in_location: Option<Coordinates>,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
    pub user_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub status: Option<AttendanceStatus>,
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn create(&self, new_attendance: NewAttendance) -> Result<Attendance, anyhow::Error>;
    async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        work_date: Date,
    ) -> Result<Option<Attendance>, anyhow::Error>;

    /// Sets the check-out only if none is recorded yet
    async fn check_out(
        &self,
        id: Uuid,
        at: OffsetDateTime,
        location: Option<Coordinates>,
    ) -> Result<Option<Attendance>, anyhow::Error>;

    async fn find_all(
        &self,
        filter: &AttendanceFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttendanceRecord>, anyhow::Error>;
    async fn count(&self, filter: &AttendanceFilter) -> Result<i64, anyhow::Error>;
}
