use crate::application::auth::login::{LoginRequest, LoginResult, LoginUseCase};
use crate::domain::devices::{DevicePlatform, DeviceRepository};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
#[validate(schema(function = "validate_device_pair"))]
pub struct MobileLoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Push token of the device logging in
    #[validate(length(min = 1, max = 4096, message = "Push token must not be empty"))]
    pub push_token: Option<String>,

    pub platform: Option<DevicePlatform>,
}

fn validate_device_pair(req: &MobileLoginRequest) -> Result<(), ValidationError> {
    if req.push_token.is_some() && req.platform.is_none() {
        let mut err = ValidationError::new("platform_required");
        err.message = Some("Platform is required when a push token is sent".into());
        return Err(err);
    }
    Ok(())
}

/// Login for the mobile app; also registers the device for push
pub struct MobileLoginUseCase {
    login: LoginUseCase,
    device_repo: Arc<dyn DeviceRepository>,
}

impl MobileLoginUseCase {
    pub fn new(login: LoginUseCase, device_repo: Arc<dyn DeviceRepository>) -> Self {
        Self { login, device_repo }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, req: MobileLoginRequest) -> Result<LoginResult, AppError> {
        let result = self
            .login
            .execute(LoginRequest {
                email: req.email,
                password: req.password,
            })
            .await?;

        if let (Some(push_token), Some(platform)) = (req.push_token, req.platform) {
            self.device_repo
                .upsert(result.user.id, &push_token, platform)
                .await
                .map_err(AppError::InternalServerError)?;
        }

        Ok(result)
    }
}
