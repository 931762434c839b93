use hrms::application::auth::purge::PurgeExpiredTokensUseCase;
use hrms::application::users::bootstrap::BootstrapAdminUseCase;
use hrms::domain::push::PushProvider;
use hrms::infrastructure;
use hrms::infrastructure::auth::JwtAuthService;
use hrms::infrastructure::config::AppConfig;
use hrms::infrastructure::db::DbPool;
use hrms::infrastructure::password::PasswordService;
use hrms::infrastructure::push::{HttpPushClient, LogPushProvider};
use hrms::infrastructure::repositories::refresh_tokens::PostgresRefreshTokenRepository;
use hrms::infrastructure::repositories::users::PostgresUserRepository;
use hrms::infrastructure::state::AppState;
use hrms::presentation;

use dotenvy::dotenv;
use std::env;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const TOKEN_PURGE_INTERVAL: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Ignore the error: tests may initialize the subscriber more than once
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "hrms=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    let config = AppConfig::from_env()?;
    run(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run<F>(config: AppConfig, shutdown_signal: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (listener, app, pool) = bootstrap(&config).await?;

    let purge = tokio::spawn(purge_expired_tokens(pool));

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    purge.abort();
    Ok(())
}

fn push_provider(config: &AppConfig) -> anyhow::Result<Arc<dyn PushProvider>> {
    match &config.push_server_key {
        Some(key) => Ok(Arc::new(HttpPushClient::new(
            config.push_api_url.clone(),
            key.clone(),
        )?)),
        None => {
            tracing::warn!("PUSH_SERVER_KEY not set, push notifications are only logged");
            Ok(Arc::new(LogPushProvider))
        }
    }
}

async fn bootstrap_admin(pool: &DbPool, config: &AppConfig) -> anyhow::Result<()> {
    let Some((email, password)) = &config.bootstrap_admin else {
        return Ok(());
    };

    let use_case = BootstrapAdminUseCase::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PasswordService::new()),
    );
    match use_case.execute(email, password).await {
        Ok(Some(admin)) => tracing::info!(email = %admin.email, "Bootstrap admin created"),
        Ok(None) => tracing::debug!("Bootstrap admin already exists"),
        Err(e) => return Err(anyhow::anyhow!("Failed to create bootstrap admin: {}", e)),
    }
    Ok(())
}

async fn purge_expired_tokens(pool: DbPool) {
    let use_case =
        PurgeExpiredTokensUseCase::new(Arc::new(PostgresRefreshTokenRepository::new(pool)));
    let mut interval = tokio::time::interval(TOKEN_PURGE_INTERVAL);

    loop {
        interval.tick().await;
        if let Err(e) = use_case.execute().await {
            tracing::error!("Failed to purge expired refresh tokens: {}", e);
        }
    }
}

async fn bootstrap(
    config: &AppConfig,
) -> anyhow::Result<(tokio::net::TcpListener, axum::Router, DbPool)> {
    let pool = infrastructure::db::create_pool(&config.database_url).await?;

    sqlx::migrate!().run(&pool).await?;

    bootstrap_admin(&pool, config).await?;

    let auth_service = Arc::new(JwtAuthService::new(
        &config.jwt_private_key_path,
        &config.jwt_public_key_path,
        config.auth.access_token_expiry,
    )?);

    let state = AppState::new(pool.clone(), auth_service, push_provider(config)?)
        .with_auth_config(config.auth.clone())
        .with_http_config(config.http.clone())
        .with_utc_offset(config.utc_offset());

    let app = presentation::router::app(state)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::debug!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    Ok((listener, app, pool))
}
