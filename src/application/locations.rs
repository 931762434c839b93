//! Work locations and their attendance geofence

use crate::domain::locations::{Location, LocationRepository, NewLocation, UpdateLocation};
use crate::shared::error::AppError;
use crate::shared::pagination::Paginated;
use crate::shared::query::SearchListParams;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Head Office")]
    pub name: String,
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    #[schema(example = -6.2088)]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    #[schema(example = 106.8456)]
    pub longitude: f64,
    #[validate(range(min = 1, max = 100000, message = "Radius must be between 1 and 100000 meters"))]
    #[schema(example = 100)]
    pub radius_meters: i32,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLocationRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
    #[validate(range(min = 1, max = 100000, message = "Radius must be between 1 and 100000 meters"))]
    pub radius_meters: Option<i32>,
}

pub type ListLocationsRequest = SearchListParams;

fn not_found() -> AppError {
    AppError::NotFound("Location not found".to_string())
}

pub struct CreateLocationUseCase {
    repo: Arc<dyn LocationRepository>,
}

impl CreateLocationUseCase {
    pub fn new(repo: Arc<dyn LocationRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, req: CreateLocationRequest) -> Result<Location, AppError> {
        Ok(self
            .repo
            .create(NewLocation {
                name: req.name.trim().to_string(),
                address: req.address,
                latitude: req.latitude,
                longitude: req.longitude,
                radius_meters: req.radius_meters,
            })
            .await?)
    }
}

pub struct ListLocationsUseCase {
    repo: Arc<dyn LocationRepository>,
}

impl ListLocationsUseCase {
    pub fn new(repo: Arc<dyn LocationRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, req: ListLocationsRequest) -> Result<Paginated<Location>, AppError> {
        let page = req.page.normalized();
        let search = req.filter.term();

        let (items, total) = futures::try_join!(
            self.repo.find_all(search, page.limit(), page.offset()),
            self.repo.count(search),
        )?;

        Ok(Paginated { items, total, page })
    }
}

pub struct GetLocationUseCase {
    repo: Arc<dyn LocationRepository>,
}

impl GetLocationUseCase {
    pub fn new(repo: Arc<dyn LocationRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<Location, AppError> {
        self.repo.find_by_id(id).await?.ok_or_else(not_found)
    }
}

pub struct UpdateLocationUseCase {
    repo: Arc<dyn LocationRepository>,
}

impl UpdateLocationUseCase {
    pub fn new(repo: Arc<dyn LocationRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, id: Uuid, req: UpdateLocationRequest) -> Result<Location, AppError> {
        self.repo
            .update(
                id,
                UpdateLocation {
                    name: req.name.map(|n| n.trim().to_string()),
                    address: req.address,
                    latitude: req.latitude,
                    longitude: req.longitude,
                    radius_meters: req.radius_meters,
                },
            )
            .await?
            .ok_or_else(not_found)
    }
}

pub struct DeleteLocationUseCase {
    repo: Arc<dyn LocationRepository>,
}

impl DeleteLocationUseCase {
    pub fn new(repo: Arc<dyn LocationRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(not_found());
        }
        Ok(())
    }
}
