use std::env;
use std::str::FromStr;
use time::UtcOffset;

/// Runtime configuration read from the environment (and `.env` via dotenvy)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_private_key_path: String,
    pub jwt_public_key_path: String,
    pub auth: AuthConfig,
    pub utc_offset_hours: i8,
    pub push_api_url: String,
    pub push_server_key: Option<String>,
    pub http: HttpConfig,
    pub bootstrap_admin: Option<(String, String)>,
}

/// Token lifetimes and cookie flags used by the auth handlers
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
    pub session_cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_expiry: 900,
            refresh_token_expiry: 2_592_000,
            session_cookie_secure: false,
        }
    }
}

/// Cross-cutting HTTP layers
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Comma-separated list; empty or `*` allows any origin
    pub cors_allowed_origins: String,
    pub rate_limit_per_minute: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: String::new(),
            rate_limit_per_minute: 120,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let defaults = AuthConfig::default();
        let auth = AuthConfig {
            access_token_expiry: env_or("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry),
            refresh_token_expiry: env_or(
                "JWT_REFRESH_TOKEN_EXPIRY",
                defaults.refresh_token_expiry,
            ),
            session_cookie_secure: env_or("SESSION_COOKIE_SECURE", false),
        };

        let bootstrap_admin = match (
            env_non_empty("BOOTSTRAP_ADMIN_EMAIL"),
            env_non_empty("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        };

        Ok(Self {
            database_url,
            port: env_or("PORT", 3000),
            jwt_private_key_path: env::var("JWT_PRIVATE_KEY_PATH")
                .unwrap_or_else(|_| "keys/private_key.pem".to_string()),
            jwt_public_key_path: env::var("JWT_PUBLIC_KEY_PATH")
                .unwrap_or_else(|_| "keys/public_key.pem".to_string()),
            auth,
            utc_offset_hours: env_or("ATTENDANCE_UTC_OFFSET_HOURS", 7),
            push_api_url: env::var("PUSH_API_URL")
                .unwrap_or_else(|_| "https://fcm.googleapis.com/fcm/send".to_string()),
            push_server_key: env_non_empty("PUSH_SERVER_KEY"),
            http: HttpConfig {
                cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
                rate_limit_per_minute: env_or("RATE_LIMIT_PER_MINUTE", 120),
            },
            bootstrap_admin,
        })
    }

    pub fn utc_offset(&self) -> UtcOffset {
        offset_from_hours(self.utc_offset_hours)
    }
}

/// Falls back to UTC for out-of-range values
pub fn offset_from_hours(hours: i8) -> UtcOffset {
    UtcOffset::from_hms(hours, 0, 0).unwrap_or(UtcOffset::UTC)
}
