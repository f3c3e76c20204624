use clap::Parser;
use oscar_gateway::api::build_routes;
use oscar_gateway::api::common;
use oscar_gateway::core::models::{AuthMode, GatewayConfig};
use oscar_gateway::core::storage::ConfigStorage;
use oscar_gateway::state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 3000, env = "PORT")]
    port: u16,

    /// JSON config file with the endpoint and credentials
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// OSCAR cluster endpoint, overrides the config file
    #[arg(long, env = "OSCAR_ENDPOINT")]
    oscar_endpoint: Option<String>,

    /// Upstream auth mode, overrides the config file
    #[arg(long, env = "AUTH_TYPE", value_enum)]
    auth_type: Option<AuthMode>,

    /// Username for basicauth mode
    #[arg(long, env = "OSCAR_USERNAME")]
    username: Option<String>,

    /// Password for basicauth mode
    #[arg(long, env = "OSCAR_PASSWORD")]
    password: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigStorage::load(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(endpoint) = args.oscar_endpoint {
        config.oscar_endpoint = endpoint;
    }
    if let Some(auth_type) = args.auth_type {
        config.auth_type = auth_type;
    }
    if let Some(username) = args.username {
        config.username = Some(username);
    }
    if let Some(password) = args.password {
        config.password = Some(password);
    }
    config.validate()?;

    tracing::info!(
        "forwarding to {} with {:?} auth",
        config.oscar_endpoint,
        config.auth_type
    );

    let app_state = Arc::new(AppState::new(config)?);

    // Add CORS
    let cors = CorsLayer::permissive();

    let app = build_routes(app_state)
        .layer(axum::extract::DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(cors)
        .layer(axum::middleware::from_fn(common::request_logger));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
