use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use sso_api::{router, AppState, SessionTransport};
use sso_core::repositories::UserRepository;
use sso_core::services::AuthService;
use sso_infrastructure::{create_pool, run_migrations, PgUserRepository};
use sso_security::{PasswordService, SigningSecret, TokenService};
use sso_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry
    sso_shared::telemetry::init_telemetry(&config.logging)?;

    info!(env = %config.app.env, "SSO Server starting...");

    // Security services. A bad hash cost or weak secret must stop startup.
    let passwords = PasswordService::from_settings(&config.auth.password)
        .context("invalid password hashing configuration")?;
    let secret = SigningSecret::resolve(config.auth.secret.as_deref())
        .context("unusable signing secret")?;
    info!(generated = secret.is_generated(), "Signing secret ready");
    let expiry = chrono::TimeDelta::try_seconds(config.auth.token_expiry_seconds)
        .context("auth.token_expiry_seconds out of range")?;
    let tokens = TokenService::new(&secret, expiry);

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(&config.database)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool).await.context("failed to run migrations")?;
    info!("Database connection established.");

    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool));
    let auth = AuthService::new(users, Arc::new(passwords), Arc::new(tokens));
    let session = SessionTransport::new(&config.auth.cookie, auth.token_max_age_seconds());

    // Build router
    let app = router(AppState::new(auth, session));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("SSO Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
