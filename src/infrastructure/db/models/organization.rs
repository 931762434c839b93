use crate::domain::departments::Department;
use crate::domain::locations::Location;
use crate::domain::positions::Position;
use crate::domain::shifts::Shift;
use sqlx::FromRow;
use time::{OffsetDateTime, Time};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct DepartmentDbModel {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<DepartmentDbModel> for Department {
    fn from(model: DepartmentDbModel) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PositionDbModel {
    pub id: Uuid,
    pub name: String,
    pub department_id: Option<Uuid>,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<PositionDbModel> for Position {
    fn from(model: PositionDbModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            department_id: model.department_id,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct LocationDbModel {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<LocationDbModel> for Location {
    fn from(model: LocationDbModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            latitude: model.latitude,
            longitude: model.longitude,
            radius_meters: model.radius_meters,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ShiftDbModel {
    pub id: Uuid,
    pub name: String,
    pub start_time: Time,
    pub end_time: Time,
    pub late_tolerance_minutes: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<ShiftDbModel> for Shift {
    fn from(model: ShiftDbModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            start_time: model.start_time,
            end_time: model.end_time,
            late_tolerance_minutes: model.late_tolerance_minutes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
