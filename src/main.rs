use dotenvy::dotenv;
use repldex::bot::commands::CommandRegistry;
use repldex::bot::verify::InteractionVerifier;
use repldex::config;
use repldex::db::Connector;
use repldex::errors::Result;
use repldex::routes::{self, AppState};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the main application configuration (fails fast on missing vars)
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {e}"))?;

    // 4. Build the interaction verifier from the configured public key
    let verifier = InteractionVerifier::new(&app_config.discord_public_key)
        .inspect_err(|e| error!("Failed to build interaction verifier: {e}"))?;

    // 5. Warm up the shared database connection so a bad URI fails at startup
    let connector = Arc::new(Connector::new(app_config.mongodb_uri.clone()));
    connector
        .database()
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    // 6. Register bot commands and serve
    let registry = CommandRegistry::with_default_commands();
    info!(
        commands = registry.len(),
        client_id = %app_config.discord_client_id,
        "Bot commands registered"
    );

    let bind_address = app_config.bind_address.clone();
    let state = AppState {
        connector,
        config: Arc::new(app_config),
        verifier: Arc::new(verifier),
        registry: Arc::new(registry),
    };

    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on {bind_address}");
    axum::serve(listener, app).await?;

    Ok(())
}
