use crate::domain::users::UserRole;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub const ACCESS_TOKEN_TYPE: &str = "access";

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Role at the time the token was issued
    pub role: UserRole,
    /// Session the token belongs to
    pub sid: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    #[serde(rename = "type")]
    pub token_type: String,
}

impl Claims {
    pub fn new_access_token(
        user_id: Uuid,
        role: UserRole,
        session_id: Uuid,
        expiry_seconds: i64,
    ) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            sub: user_id.to_string(),
            role,
            sid: session_id.to_string(),
            iat: now,
            exp: now + expiry_seconds,
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        }
    }

    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|e| anyhow::anyhow!("Invalid user ID in claims: {}", e))
    }

    pub fn session_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sid)
            .map_err(|e| anyhow::anyhow!("Invalid session ID in claims: {}", e))
    }
}

/// Stored refresh token. Only the SHA-256 of the secret is persisted.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub token_hash: String,
    pub expires_at: OffsetDateTime,
    pub revoked_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl RefreshToken {
    pub fn is_active_at(&self, now: OffsetDateTime) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub token_hash: String,
    pub expires_at: OffsetDateTime,
}

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn create(&self, token: NewRefreshToken) -> Result<RefreshToken>;

    /// Find a non-revoked, non-expired token of the session by its hash
    async fn find_active(&self, session_id: Uuid, token_hash: &str)
    -> Result<Option<RefreshToken>>;

    /// Revoke `old_id` and store `replacement` atomically.
    /// Returns `None` when `old_id` was no longer active; nothing is written then.
    async fn rotate(
        &self,
        old_id: Uuid,
        replacement: NewRefreshToken,
    ) -> Result<Option<RefreshToken>>;

    /// Revoke every active token of a session
    async fn revoke_session(&self, session_id: Uuid) -> Result<u64>;

    /// Revoke every active token of a user
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64>;

    /// Delete tokens that expired before `before`
    async fn delete_expired(&self, before: OffsetDateTime) -> Result<u64>;
}

/// Auth service trait for access-token operations
pub trait AuthService: Send + Sync {
    fn generate_access_token(&self, user_id: Uuid, role: UserRole, session_id: Uuid)
    -> Result<String>;

    /// Validate signature and expiry, returning the claims
    fn validate_token(&self, token: &str) -> Result<Claims>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims() {
        let user_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, UserRole::Hr, session_id, 900);

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.session_id().unwrap(), session_id);
        assert_eq!(claims.exp - claims.iat, 900);
        assert_eq!(claims.token_type, ACCESS_TOKEN_TYPE);
    }

    #[test]
    fn test_refresh_token_activity() {
        let now = OffsetDateTime::now_utc();
        let mut token = RefreshToken {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            token_hash: "hash".into(),
            expires_at: now + time::Duration::hours(1),
            revoked_at: None,
            created_at: now,
        };
        assert!(token.is_active_at(now));
        assert!(!token.is_active_at(now + time::Duration::hours(2)));

        token.revoked_at = Some(now);
        assert!(!token.is_active_at(now));
    }
}
