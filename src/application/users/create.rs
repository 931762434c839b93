use crate::domain::password::PasswordHashingService;
use crate::domain::users::{NewUser, User, UserRepository, UserRole, normalize_email};
use crate::infrastructure::db::is_foreign_key_violation;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Budi Santoso")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "budi@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "password123", min_length = 8)]
    pub password: String,
    /// Defaults to `employee`
    pub role: Option<UserRole>,
    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,
    pub department_id: Option<Uuid>,
    pub position_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub shift_id: Option<Uuid>,
}

impl CreateUserRequest {
    /// Custom async validation to check if email already exists
    pub async fn validate_unique_email(
        &self,
        repo: &Arc<dyn UserRepository>,
    ) -> Result<(), AppError> {
        if repo
            .find_by_email(&normalize_email(&self.email))
            .await?
            .is_some()
        {
            return Err(AppError::ValidationError(
                "Email already exists".to_string(),
            ));
        }
        Ok(())
    }
}

/// Maps a missing department/position/location/shift to a 422
pub(crate) fn reference_error(e: anyhow::Error) -> AppError {
    if is_foreign_key_violation(&e) {
        AppError::ValidationError(
            "Referenced department, position, location or shift does not exist".to_string(),
        )
    } else {
        AppError::InternalServerError(e)
    }
}

pub struct CreateUserUseCase {
    repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHashingService>,
}

impl CreateUserUseCase {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            repo,
            password_hasher,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: CreateUserRequest) -> Result<User, AppError> {
        req.validate_unique_email(&self.repo).await?;

        let password_hash = self
            .password_hasher
            .hash_password(&req.password)
            .map_err(AppError::InternalServerError)?;

        let new_user = NewUser {
            name: req.name.trim().to_string(),
            email: normalize_email(&req.email),
            password_hash,
            role: req.role.unwrap_or(UserRole::Employee),
            phone: req.phone,
            department_id: req.department_id,
            position_id: req.position_id,
            location_id: req.location_id,
            shift_id: req.shift_id,
        };

        self.repo.create(new_user).await.map_err(reference_error)
    }
}
