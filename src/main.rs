use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use motormate::{Commands, Container, ContainerConfig, OllamaConfig, Router};

#[derive(Parser)]
#[command(name = "motormate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(long, global = true, default_value = "127.0.0.1")]
    host: String,

    #[arg(short, long, global = true, default_value = "5000")]
    port: u16,

    /// Ollama base URL (defaults to $OLLAMA_HOST, then http://localhost:11434)
    #[arg(long, global = true)]
    ollama_url: Option<String>,

    #[arg(short, long, global = true, default_value = "mistral")]
    model: String,

    #[arg(long, global = true, default_value = "0.7")]
    temperature: f32,

    /// Reply with a deterministic mock instead of calling Ollama
    #[arg(long, global = true)]
    mock_model: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn container_config(&self) -> ContainerConfig {
        let mut ollama = OllamaConfig::from_env();
        if let Some(url) = &self.ollama_url {
            ollama.base_url = url.clone();
        }
        ollama.model = self.model.clone();
        ollama.temperature = self.temperature;

        ContainerConfig {
            ollama,
            mock_model: self.mock_model,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Arc::new(Container::new(cli.container_config()));

    // The chat endpoint is useless without a model, so refuse to serve when
    // the runtime cannot be reached.
    match container.check_model_use_case().execute().await {
        Ok(model) if container.mock_model() => info!("Using mock chat model ({})", model),
        Ok(model) => info!(
            "Successfully connected to Ollama at {} (model {})",
            container.ollama_url(),
            model
        ),
        Err(e) => {
            error!(
                "Could not initialize chat model. Make sure Ollama is running and the {} model is installed.",
                container.model_name()
            );
            error!("Error details: {}", e);
            return Err(e.into());
        }
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Check => Ok(()),
        Commands::Serve => serve(container, &cli.host, cli.port).await,
    }
}

async fn serve(container: Arc<Container>, host: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("MotorMate listening on http://{}", listener.local_addr()?);

    axum::serve(listener, Router::new(container).into_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, draining in-flight requests");
}
