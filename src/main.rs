use std::sync::Arc;

use tokio::net::TcpListener;

use askfmi::adapters::ai::{HttpAnswerConfig, HttpAnswerProvider};
use askfmi::adapters::auth::{Argon2PasswordHasher, JwtTokenService, TokenSessionValidator};
use askfmi::adapters::http::router::{create_router, ApiDependencies};
use askfmi::adapters::observability::init_tracing;
use askfmi::adapters::postgres::{
    run_migrations, PostgresConversationRepository, PostgresUserRepository,
};
use askfmi::config::AppConfig;
use askfmi::ports::{TokenService, UserRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let conversations = Arc::new(PostgresConversationRepository::new(pool));
    let answers = Arc::new(HttpAnswerProvider::new(HttpAnswerConfig::from(
        &config.answer,
    ))?);
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_config(&config.auth));
    let validator = Arc::new(TokenSessionValidator::new(
        Arc::clone(&tokens),
        Arc::clone(&users),
    ));

    let state = ApiDependencies {
        users,
        conversations,
        answers,
        hasher: Arc::new(Argon2PasswordHasher::new()),
        tokens,
        validator,
    }
    .into_state_with_answer_timeout(config.answer.timeout());

    let router = create_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
