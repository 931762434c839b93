pub mod bootstrap;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::domain::users::{User, UserRepository};
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// Loads the caller, rejecting deactivated accounts
pub(crate) async fn active_user(
    users: &Arc<dyn UserRepository>,
    user_id: Uuid,
) -> Result<User, AppError> {
    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !user.is_active {
        return Err(AppError::Forbidden("Account is inactive".to_string()));
    }
    Ok(user)
}
