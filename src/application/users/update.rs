use crate::application::users::create::reference_error;
use crate::domain::password::PasswordHashingService;
use crate::domain::users::{UpdateUser, User, UserRepository, UserRole, normalize_email};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(min_length = 8)]
    pub password: Option<String>,
    pub role: Option<UserRole>,
    #[validate(length(max = 32, message = "Phone must be at most 32 characters"))]
    pub phone: Option<String>,
    pub department_id: Option<Uuid>,
    pub position_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub shift_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

pub struct UpdateUserUseCase {
    repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHashingService>,
}

impl UpdateUserUseCase {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            repo,
            password_hasher,
        }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(&self, id: Uuid, req: UpdateUserRequest) -> Result<User, AppError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let email = req.email.as_deref().map(normalize_email);
        if let Some(email) = &email {
            let taken = self
                .repo
                .find_by_email(email)
                .await?
                .is_some_and(|other| other.id != id);
            if taken {
                return Err(AppError::ValidationError(
                    "Email already exists".to_string(),
                ));
            }
        }

        let password_hash = req
            .password
            .as_deref()
            .map(|p| self.password_hasher.hash_password(p))
            .transpose()?;

        let update = UpdateUser {
            name: req.name.map(|n| n.trim().to_string()),
            email,
            password_hash,
            role: req.role,
            phone: req.phone,
            department_id: req.department_id,
            position_id: req.position_id,
            location_id: req.location_id,
            shift_id: req.shift_id,
            is_active: req.is_active,
        };

        self.repo
            .update(id, update)
            .await
            .map_err(reference_error)?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
