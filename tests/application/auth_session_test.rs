use hrms::application::auth::change_password::{ChangePasswordRequest, ChangePasswordUseCase};
use hrms::application::auth::login::{LoginRequest, LoginUseCase};
use hrms::application::auth::logout::LogoutUseCase;
use hrms::application::auth::refresh::{RefreshTokenRequest, RefreshTokenUseCase};
use hrms::application::auth::token_utils::{TokenLifetimes, TokenResponse};
use hrms::domain::auth::AuthService;
use hrms::domain::password::PasswordHashingService;
use hrms::domain::users::{User, UserRepository, UserRole};
use hrms::infrastructure::password::PasswordService;
use hrms::infrastructure::repositories::mock::{
    MockAuthService, MockRefreshTokenRepository, MockUserRepository, new_user,
};
use hrms::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

const LIFETIMES: TokenLifetimes = TokenLifetimes {
    access_token_expiry: 900,
    refresh_token_expiry: 3600,
};

struct Fixture {
    users: Arc<MockUserRepository>,
    tokens: Arc<MockRefreshTokenRepository>,
    user: User,
}

impl Fixture {
    async fn new() -> Self {
        let users = Arc::new(MockUserRepository::default());
        let mut record = new_user("Siti", "siti@example.com", UserRole::Employee);
        record.password_hash = PasswordService::new().hash_password("password123").unwrap();
        let user = users.create(record).await.unwrap();

        Self {
            users,
            tokens: Arc::new(MockRefreshTokenRepository::default()),
            user,
        }
    }

    fn auth(&self) -> Arc<dyn AuthService> {
        Arc::new(MockAuthService)
    }

    async fn login(&self) -> TokenResponse {
        LoginUseCase::new(
            self.users.clone(),
            self.tokens.clone(),
            self.auth(),
            Arc::new(PasswordService::new()),
            LIFETIMES,
        )
        .execute(LoginRequest {
            email: " SITI@example.com ".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap()
        .tokens
    }

    async fn refresh(&self, session_id: Uuid, refresh_token: &str) -> Result<TokenResponse, AppError> {
        RefreshTokenUseCase::new(self.tokens.clone(), self.users.clone(), self.auth(), LIFETIMES)
            .execute(RefreshTokenRequest {
                refresh_token: refresh_token.to_string(),
                session_id,
            })
            .await
    }
}

#[tokio::test]
async fn test_rotation_chain_keeps_session_id() {
    let fx = Fixture::new().await;
    let first = fx.login().await;

    let second = fx.refresh(first.session_id, &first.refresh_token).await.unwrap();
    let third = fx.refresh(second.session_id, &second.refresh_token).await.unwrap();

    assert_eq!(second.session_id, first.session_id);
    assert_eq!(third.session_id, first.session_id);
    assert_ne!(second.refresh_token, first.refresh_token);
    assert_ne!(third.refresh_token, second.refresh_token);
    assert_eq!(third.expires_in, 900);
}

#[tokio::test]
async fn test_replaying_rotated_token_revokes_whole_session() {
    let fx = Fixture::new().await;
    let first = fx.login().await;
    let second = fx.refresh(first.session_id, &first.refresh_token).await.unwrap();

    let replay = fx.refresh(first.session_id, &first.refresh_token).await;
    assert!(matches!(replay, Err(AppError::Unauthorized(_))));

    // The legitimate successor dies with the session
    let successor = fx.refresh(second.session_id, &second.refresh_token).await;
    assert!(matches!(successor, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn test_mismatch_in_one_session_leaves_others_alone() {
    let fx = Fixture::new().await;
    let phone = fx.login().await;
    let laptop = fx.login().await;
    assert_ne!(phone.session_id, laptop.session_id);

    let forged = fx.refresh(phone.session_id, "not-the-token").await;
    assert!(matches!(forged, Err(AppError::Unauthorized(_))));

    assert!(fx.refresh(phone.session_id, &phone.refresh_token).await.is_err());
    assert!(fx.refresh(laptop.session_id, &laptop.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_token_cannot_cross_sessions() {
    let fx = Fixture::new().await;
    let a = fx.login().await;
    let b = fx.login().await;

    let crossed = fx.refresh(b.session_id, &a.refresh_token).await;
    assert!(matches!(crossed, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn test_logout_ends_only_that_session() {
    let fx = Fixture::new().await;
    let a = fx.login().await;
    let b = fx.login().await;

    LogoutUseCase::new(fx.tokens.clone())
        .execute(a.session_id)
        .await
        .unwrap();

    assert!(fx.refresh(a.session_id, &a.refresh_token).await.is_err());
    assert!(fx.refresh(b.session_id, &b.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_password_change_revokes_every_session() {
    let fx = Fixture::new().await;
    let a = fx.login().await;
    let b = fx.login().await;

    ChangePasswordUseCase::new(
        fx.users.clone(),
        fx.tokens.clone(),
        Arc::new(PasswordService::new()),
    )
    .execute(
        fx.user.id,
        ChangePasswordRequest {
            current_password: "password123".to_string(),
            new_password: "newpassword456".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(fx.refresh(a.session_id, &a.refresh_token).await.is_err());
    assert!(fx.refresh(b.session_id, &b.refresh_token).await.is_err());
}

#[tokio::test]
async fn test_deactivated_user_cannot_refresh() {
    let fx = Fixture::new().await;
    let session = fx.login().await;

    fx.users
        .update(
            fx.user.id,
            hrms::domain::users::UpdateUser {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let result = fx.refresh(session.session_id, &session.refresh_token).await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}
