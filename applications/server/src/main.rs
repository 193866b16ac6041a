/// Playdeck Server - playlist store and upload server
use clap::{Parser, Subcommand};
use playdeck_server::{api, config::ServerConfig, state::AppState};
use playdeck_storage::SongStore;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "playdeck-server")]
#[command(about = "Playdeck playlist and upload server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "PLAYDECK_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Print the stored playlist
    Songs {
        /// Configuration file path
        #[arg(short, long, env = "PLAYDECK_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "playdeck_server=info,playdeck_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::Songs { config } => {
            list_songs(config).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load(path.as_deref())?;
    config.validate()?;
    Ok(config)
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    tracing::info!("Starting Playdeck Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let store = SongStore::connect(&config.storage.database_url).await?;
    let song_count = store.count().await?;
    tracing::info!(songs = song_count, "Database connected");

    // Build application state
    let app_state = AppState::new(config.clone(), store);
    app_state.file_storage.initialize().await?;
    tracing::info!(
        path = %app_state.file_storage.base_path().display(),
        "Upload storage initialized"
    );

    // Build router
    let app = api::create_router(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn list_songs(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = SongStore::connect(&config.storage.database_url).await?;

    let songs = store.get_all().await?;
    if songs.is_empty() {
        println!("No songs stored.");
        return Ok(());
    }

    for song in &songs {
        println!(
            "{:>4}  {}  -  {}  ({})",
            song.id,
            song.title,
            song.artist.as_deref().unwrap_or("Unknown Artist"),
            song.audio_url
        );
    }
    println!("{} songs", songs.len());

    Ok(())
}
