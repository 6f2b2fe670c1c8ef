//! LoveCoach web server binary.

use coach_brain::{LangflowClient, MistralClient};
use coach_web::{AppState, Config};
use database::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;
use twilio_client::TwilioClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting LoveCoach server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    if config.seed_demo_data {
        if let Some(demo) =
            database::seed::seed_demo_data(db.pool(), config.password_hash_cost).await?
        {
            info!(user_id = demo.id, username = %demo.username, "Seeded demo data");
        }
    }

    // Provider clients fall back to mock mode when unconfigured
    let langflow = LangflowClient::from_env()?;
    let mistral = MistralClient::from_env()?;
    let twilio = TwilioClient::from_env()?;

    // Build application state
    let state = AppState::new(db, langflow, mistral, twilio, config.password_hash_cost);
    let app = coach_web::app(state);

    // Start server
    info!(addr = %config.addr, "LoveCoach server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
