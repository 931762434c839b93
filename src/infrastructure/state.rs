use crate::domain::push::PushProvider;
use crate::infrastructure::auth::JwtAuthService;
use crate::infrastructure::config::{AuthConfig, HttpConfig};
use crate::infrastructure::db::DbPool;
use axum::extract::FromRef;
use std::sync::Arc;
use time::UtcOffset;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub auth_service: Arc<JwtAuthService>,
    pub push_provider: Arc<dyn PushProvider>,
    pub auth_config: AuthConfig,
    pub http_config: HttpConfig,
    /// Company timezone used to derive attendance work dates
    pub utc_offset: UtcOffset,
}

impl AppState {
    pub fn new(
        pool: DbPool,
        auth_service: Arc<JwtAuthService>,
        push_provider: Arc<dyn PushProvider>,
    ) -> Self {
        Self {
            pool,
            auth_service,
            push_provider,
            auth_config: AuthConfig::default(),
            http_config: HttpConfig::default(),
            utc_offset: UtcOffset::UTC,
        }
    }

    pub fn with_auth_config(mut self, auth_config: AuthConfig) -> Self {
        self.auth_config = auth_config;
        self
    }

    pub fn with_http_config(mut self, http_config: HttpConfig) -> Self {
        self.http_config = http_config;
        self
    }

    pub fn with_utc_offset(mut self, utc_offset: UtcOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
