use crate::application::users::create::{CreateUserRequest, CreateUserUseCase};
use crate::domain::password::PasswordHashingService;
use crate::domain::users::{User, UserRepository, UserRole, normalize_email};
use crate::shared::error::AppError;
use std::sync::Arc;

/// Seeds the first admin account on startup
pub struct BootstrapAdminUseCase {
    repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHashingService>,
}

impl BootstrapAdminUseCase {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            repo,
            password_hasher,
        }
    }

    /// Returns the created admin, or `None` when the email is already taken
    #[tracing::instrument(skip(self, password))]
    pub async fn execute(&self, email: &str, password: &str) -> Result<Option<User>, AppError> {
        if self
            .repo
            .find_by_email(&normalize_email(email))
            .await?
            .is_some()
        {
            return Ok(None);
        }

        let request = CreateUserRequest {
            name: "Administrator".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: Some(UserRole::Admin),
            phone: None,
            department_id: None,
            position_id: None,
            location_id: None,
            shift_id: None,
        };

        CreateUserUseCase::new(self.repo.clone(), self.password_hasher.clone())
            .execute(request)
            .await
            .map(Some)
    }
}
