use std::sync::Arc;

use predictbot::api::router::create_router;
use predictbot::commands::CommandHandler;
use predictbot::config::AppConfig;
use predictbot::discord::{run_gateway, DiscordRest, GatewayConfig, GatewayStatus};
use predictbot::football::FootballClient;
use predictbot::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // reqwest and tokio-tungstenite both pull in rustls; pin the provider once.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let config = AppConfig::from_env()?;
    let metrics_handle = predictbot::metrics::init_metrics();
    let gateway_status = GatewayStatus::new();

    // --- Ops HTTP server: health + metrics ---
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState {
        metrics_handle,
        gateway: gateway_status.clone(),
    };
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Ops server listening on {addr}");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "Ops server stopped");
        }
    });

    // --- Command layer ---
    let http = reqwest::Client::new();
    let football = FootballClient::new(
        http.clone(),
        config.api_football_base_url.clone(),
        config.api_football_key.clone(),
    );
    let handler = Arc::new(CommandHandler::new(
        football,
        gateway_status.clone(),
        config.command_prefix.clone(),
        config.max_additional_predictions,
    ));
    let rest = DiscordRest::new(http, config.discord_api_base.clone(), config.discord_token.clone());

    tracing::info!(
        prefix = %config.command_prefix,
        max_additional = config.max_additional_predictions,
        "Starting Discord gateway"
    );

    let gateway_config = GatewayConfig {
        url: config.discord_gateway_url.clone(),
        token: config.discord_token.clone(),
        activity: config.activity(),
    };
    run_gateway(gateway_config, handler, rest, gateway_status).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    // LOG_FORMAT=json switches to structured output for log shippers.
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .init();
}
