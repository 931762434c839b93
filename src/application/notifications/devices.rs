use crate::domain::devices::{Device, DevicePlatform, DeviceRepository};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterDeviceRequest {
    #[validate(length(min = 1, max = 4096, message = "Push token must not be empty"))]
    pub push_token: String,
    pub platform: DevicePlatform,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UnregisterDeviceRequest {
    #[validate(length(min = 1, max = 4096, message = "Push token must not be empty"))]
    pub push_token: String,
}

pub struct RegisterDeviceUseCase {
    repo: Arc<dyn DeviceRepository>,
}

impl RegisterDeviceUseCase {
    pub fn new(repo: Arc<dyn DeviceRepository>) -> Self {
        Self { repo }
    }

    /// A token already registered to another user moves to the caller
    #[tracing::instrument(skip(self, req), fields(platform = %req.platform))]
    pub async fn execute(
        &self,
        user_id: Uuid,
        req: RegisterDeviceRequest,
    ) -> Result<Device, AppError> {
        Ok(self
            .repo
            .upsert(user_id, req.push_token.trim(), req.platform)
            .await?)
    }
}

pub struct UnregisterDeviceUseCase {
    repo: Arc<dyn DeviceRepository>,
}

impl UnregisterDeviceUseCase {
    pub fn new(repo: Arc<dyn DeviceRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, user_id: Uuid, req: UnregisterDeviceRequest) -> Result<(), AppError> {
        if !self
            .repo
            .delete_for_user(user_id, req.push_token.trim())
            .await?
        {
            return Err(AppError::NotFound("Device not found".to_string()));
        }
        Ok(())
    }
}
