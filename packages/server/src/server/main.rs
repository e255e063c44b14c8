// Main entry point for the quest review server

use anyhow::{Context, Result};
use discord::DiscordClient;
use quest_core::domains::quests::{ensure_intake_panel, PanelOutcome};
use quest_core::domains::roles::RoleTierTable;
use quest_core::kernel::{DiscordAdapter, ServerDeps, SheetsAdapter};
use quest_core::server::{build_app, middleware::parse_public_key};
use quest_core::Config;
use sheets_client::{ServiceAccount, SheetsClient};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,quest_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting quest review server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let public_key = parse_public_key(&config.discord_public_key)
        .context("DISCORD_PUBLIC_KEY must be a hex-encoded Ed25519 key")?;
    let tracks = RoleTierTable::load(config.role_tracks_path.as_deref())
        .context("Failed to load role tracks")?;
    tracing::info!(
        categories = ?config.categories,
        tracks = tracks.tracks.len(),
        "Configuration loaded"
    );

    // External clients
    let sheets = Arc::new(SheetsClient::new(
        config.google_sheet_id.clone(),
        ServiceAccount {
            client_email: config.google_client_email.clone(),
            private_key: config.google_private_key.clone(),
            token_uri: config.google_token_uri.clone(),
        },
    ));
    let discord = Arc::new(DiscordClient::new(config.discord_token.clone()));
    let discord_adapter = Arc::new(DiscordAdapter::new(
        discord,
        config.guild_id,
        config.discord_application_id,
    ));

    let deps = ServerDeps::new(
        Arc::new(SheetsAdapter::new(sheets)),
        discord_adapter.clone(),
        discord_adapter,
        config.quest_settings(),
        tracks,
    );

    // Intake panel (skipped when a previous run already posted it)
    match ensure_intake_panel(&deps).await {
        Ok(PanelOutcome::Posted(panel)) => {
            tracing::info!(message_id = %panel.message_id, "Intake panel posted")
        }
        Ok(PanelOutcome::AlreadyPresent) => tracing::info!("Intake panel already present"),
        Err(e) => tracing::error!(error = %format!("{:#}", e), "Could not post intake panel"),
    }

    let app = build_app(deps, public_key);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Interactions endpoint: http://localhost:{}/interactions", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
