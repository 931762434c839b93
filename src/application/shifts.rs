//! Work shifts; `start_time` plus tolerance decides lateness at check-in

use crate::domain::shifts::{NewShift, Shift, ShiftRepository, UpdateShift};
use crate::shared::error::AppError;
use crate::shared::pagination::Paginated;
use crate::shared::query::SearchListParams;
use serde::Deserialize;
use std::sync::Arc;
use time::Time;
use time::macros::format_description;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Parse `HH:MM` (24h)
pub fn parse_time_of_day(value: &str) -> Option<Time> {
    Time::parse(value.trim(), format_description!("[hour]:[minute]")).ok()
}

fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    match parse_time_of_day(value) {
        Some(_) => Ok(()),
        None => {
            let mut err = ValidationError::new("time_of_day");
            err.message = Some("Must be a HH:MM time".into());
            Err(err)
        }
    }
}

fn time_field(field: &str, value: &str) -> Result<Time, AppError> {
    parse_time_of_day(value)
        .ok_or_else(|| AppError::ValidationError(format!("{} must be a HH:MM time", field)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShiftRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(example = "Morning")]
    pub name: String,
    #[validate(custom(function = "validate_time_of_day"))]
    #[schema(example = "08:00")]
    pub start_time: String,
    #[validate(custom(function = "validate_time_of_day"))]
    #[schema(example = "17:00")]
    pub end_time: String,
    #[validate(range(min = 0, max = 240, message = "Late tolerance must be between 0 and 240 minutes"))]
    #[serde(default)]
    #[schema(example = 15)]
    pub late_tolerance_minutes: i32,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateShiftRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_time_of_day"))]
    pub start_time: Option<String>,
    #[validate(custom(function = "validate_time_of_day"))]
    pub end_time: Option<String>,
    #[validate(range(min = 0, max = 240, message = "Late tolerance must be between 0 and 240 minutes"))]
    pub late_tolerance_minutes: Option<i32>,
}

pub type ListShiftsRequest = SearchListParams;

fn not_found() -> AppError {
    AppError::NotFound("Shift not found".to_string())
}

pub struct CreateShiftUseCase {
    repo: Arc<dyn ShiftRepository>,
}

impl CreateShiftUseCase {
    pub fn new(repo: Arc<dyn ShiftRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, req: CreateShiftRequest) -> Result<Shift, AppError> {
        let new_shift = NewShift {
            name: req.name.trim().to_string(),
            start_time: time_field("start_time", &req.start_time)?,
            end_time: time_field("end_time", &req.end_time)?,
            late_tolerance_minutes: req.late_tolerance_minutes,
        };

        Ok(self.repo.create(new_shift).await?)
    }
}

pub struct ListShiftsUseCase {
    repo: Arc<dyn ShiftRepository>,
}

impl ListShiftsUseCase {
    pub fn new(repo: Arc<dyn ShiftRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, req: ListShiftsRequest) -> Result<Paginated<Shift>, AppError> {
        let page = req.page.normalized();
        let search = req.filter.term();
        let (items, total) = futures::try_join!(
            self.repo.find_all(search, page.limit(), page.offset()),
            self.repo.count(search),
        )?;

        Ok(Paginated { items, total, page })
    }
}

pub struct GetShiftUseCase {
    repo: Arc<dyn ShiftRepository>,
}

impl GetShiftUseCase {
    pub fn new(repo: Arc<dyn ShiftRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<Shift, AppError> {
        self.repo.find_by_id(id).await?.ok_or_else(not_found)
    }
}

pub struct UpdateShiftUseCase {
    repo: Arc<dyn ShiftRepository>,
}

impl UpdateShiftUseCase {
    pub fn new(repo: Arc<dyn ShiftRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, id: Uuid, req: UpdateShiftRequest) -> Result<Shift, AppError> {
        let update = UpdateShift {
            name: req.name.map(|n| n.trim().to_string()),
            start_time: req
                .start_time
                .as_deref()
                .map(|v| time_field("start_time", v))
                .transpose()?,
            end_time: req
                .end_time
                .as_deref()
                .map(|v| time_field("end_time", v))
                .transpose()?,
            late_tolerance_minutes: req.late_tolerance_minutes,
        };

        self.repo.update(id, update).await?.ok_or_else(not_found)
    }
}

pub struct DeleteShiftUseCase {
    repo: Arc<dyn ShiftRepository>,
}

impl DeleteShiftUseCase {
    pub fn new(repo: Arc<dyn ShiftRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(not_found());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::mock::MockShiftRepository;
    use time::macros::time;

    fn morning() -> CreateShiftRequest {
        CreateShiftRequest {
            name: "Morning".to_string(),
            start_time: "08:00".to_string(),
            end_time: "17:00".to_string(),
            late_tolerance_minutes: 15,
        }
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("08:30"), Some(time!(08:30)));
        assert_eq!(parse_time_of_day(" 23:59 "), Some(time!(23:59)));
        assert_eq!(parse_time_of_day("24:00"), None);
        assert_eq!(parse_time_of_day("8am"), None);
    }

    #[test]
    fn test_shift_validation() {
        assert!(morning().validate().is_ok());

        let mut bad = morning();
        bad.start_time = "8:0".to_string();
        assert!(bad.validate().is_err());

        let mut bad = morning();
        bad.late_tolerance_minutes = 241;
        assert!(bad.validate().is_err());
    }

    #[tokio::test]
    async fn test_create_and_update_shift() {
        let repo: Arc<dyn ShiftRepository> = Arc::new(MockShiftRepository::new());

        let shift = CreateShiftUseCase::new(repo.clone())
            .execute(morning())
            .await
            .unwrap();
        assert_eq!(shift.start_time, time!(08:00));
        assert_eq!(shift.late_tolerance_minutes, 15);

        let updated = UpdateShiftUseCase::new(repo.clone())
            .execute(
                shift.id,
                UpdateShiftRequest {
                    start_time: Some("09:00".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.start_time, time!(09:00));
        assert_eq!(updated.end_time, time!(17:00));

        let listed = ListShiftsUseCase::new(repo)
            .execute(ListShiftsRequest::default())
            .await
            .unwrap();
        assert_eq!(listed.total, 1);
    }
}
