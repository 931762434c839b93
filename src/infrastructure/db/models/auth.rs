use super::parse_column;
use crate::domain::auth::RefreshToken;
use crate::domain::devices::Device;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenDbModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub token_hash: String,
    pub expires_at: OffsetDateTime,
    pub revoked_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl From<RefreshTokenDbModel> for RefreshToken {
    fn from(model: RefreshTokenDbModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            session_id: model.session_id,
            token_hash: model.token_hash,
            expires_at: model.expires_at,
            revoked_at: model.revoked_at,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DeviceDbModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub push_token: String,
    pub platform: String,
    pub last_seen_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

impl TryFrom<DeviceDbModel> for Device {
    type Error = anyhow::Error;

    fn try_from(model: DeviceDbModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            push_token: model.push_token,
            platform: parse_column("devices.platform", &model.platform)?,
            last_seen_at: model.last_seen_at,
            created_at: model.created_at,
        })
    }
}
