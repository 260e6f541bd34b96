/// Stereo - personal audio server
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use stereo_playback::{CommandBackend, PlaybackController, PlayerBackend, ProgressPoller};
use stereo_server::{config::ServerConfig, create_router, state::AppState};
use stereo_storage::SqliteLibrary;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stereo-server")]
#[command(about = "Stereo personal audio server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show which output program would be used
    Probe {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stereo_server=info,stereo_playback=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::Probe { config } => {
            probe(config)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load(path.as_deref())?;
    config.validate()?;
    Ok(config)
}

fn probe_backend(config: &ServerConfig) -> anyhow::Result<CommandBackend> {
    CommandBackend::probe(config.playback.output, config.playback.output_path.as_deref())
        .map_err(|e| {
            tracing::error!("{}", e);
            e.into()
        })
}

fn probe(config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let backend = probe_backend(&config)?;

    println!(
        "{} at {} ({}; seek {})",
        backend.program(),
        backend.binary().display(),
        backend.program().description(),
        if backend.supports_seek() {
            "supported"
        } else {
            "not supported"
        }
    );

    Ok(())
}

async fn serve(config: Option<PathBuf>) -> anyhow::Result<()> {
    // Load configuration
    let config = load_config(config)?;

    tracing::info!("Starting Stereo");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // No output program, no server
    let backend = probe_backend(&config)?;
    tracing::info!(
        "Audio output: {} ({})",
        backend.program(),
        backend.binary().display()
    );

    // Initialize library
    let library = SqliteLibrary::open(&config.storage.database_url).await?;
    tracing::info!("Library connected");

    // Start playback
    let controller = PlaybackController::spawn(
        Arc::new(backend),
        Arc::new(library),
        config.playback.playback_config(),
    );
    let poller =
        ProgressPoller::new(controller.clone(), config.playback.poll_interval()).spawn();

    // Build router
    let app = create_router(AppState::new(controller.clone()));

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");
    controller.shutdown().await?;
    poller.await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
