use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DevicePlatform {
    Android,
    Ios,
    Web,
}

impl DevicePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            DevicePlatform::Android => "android",
            DevicePlatform::Ios => "ios",
            DevicePlatform::Web => "web",
        }
    }
}

impl fmt::Display for DevicePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DevicePlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "android" => Ok(DevicePlatform::Android),
            "ios" => Ok(DevicePlatform::Ios),
            "web" => Ok(DevicePlatform::Web),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// A push-capable device registered by a user
#[derive(Debug, Clone)]
pub struct Device {
    pub id: Uuid,
    pub user_id: Uuid,
    pub push_token: String,
    pub platform: DevicePlatform,
    pub last_seen_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Insert or move the token to `user_id`, refreshing `last_seen_at`
    async fn upsert(
        &self,
        user_id: Uuid,
        push_token: &str,
        platform: DevicePlatform,
    ) -> Result<Device, anyhow::Error>;
    async fn push_tokens_for_user(&self, user_id: Uuid) -> Result<Vec<String>, anyhow::Error>;
    async fn delete_for_user(&self, user_id: Uuid, push_token: &str)
    -> Result<bool, anyhow::Error>;
    async fn delete_tokens(&self, push_tokens: &[String]) -> Result<u64, anyhow::Error>;
}
