use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use sqlx::postgres::PgPoolOptions;
use todo_service::config::Config;
use todo_service::domain::auth::service::AuthService;
use todo_service::domain::user::service::UserService;
use todo_service::inbound::http::router::create_router;
use todo_service::outbound::repositories::PostgresUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_issuer = %config.jwt.issuer,
        access_token_ttl_minutes = config.jwt.access_token_ttl_minutes,
        refresh_token_ttl_hours = config.jwt.refresh_token_ttl_hours,
        "Configuration loaded"
    );

    let token_codec = JwtHandler::new(config.jwt.secret.as_bytes(), &config.jwt.issuer)?;
    let authenticator = Arc::new(Authenticator::new(token_codec).with_token_lifetimes(
        chrono::Duration::minutes(config.jwt.access_token_ttl_minutes),
        chrono::Duration::hours(config.jwt.refresh_token_ttl_hours),
    ));

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let auth_service = Arc::new(AuthService::new(user_repository, authenticator));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, auth_service);
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pg_pool.close().await;
    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received");
}
