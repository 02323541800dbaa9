//! tinykv - A Small Concurrent In-Memory Key-Value Server
//!
//! This is the main entry point for the tinykv server.
//! It parses the command line, sets up logging, binds the listener and
//! serves clients until Ctrl+C.

use clap::Parser;
use tinykv::{Config, Server};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line options for the server
#[derive(Parser, Debug)]
#[command(name = "tinykv")]
#[command(about = "A small concurrent in-memory key-value server")]
#[command(version)]
struct Args {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = tinykv::DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = tinykv::DEFAULT_PORT)]
    port: u16,

    /// Maximum number of clients served at the same time
    #[arg(short, long, default_value_t = tinykv::DEFAULT_MAX_CLIENTS)]
    max_clients: usize,

    /// Size in bytes of a single request read
    #[arg(short, long, default_value_t = tinykv::DEFAULT_READ_BUFFER_SIZE)]
    buffer_size: usize,
}

impl Args {
    fn into_config(self) -> Config {
        Config::builder()
            .host(self.host)
            .port(self.port)
            .max_clients(self.max_clients)
            .read_buffer_size(self.buffer_size)
            .build()
    }
}

fn print_banner(config: &Config) {
    println!(
        r#"
tinykv v{} - Concurrent In-Memory Key-Value Server
──────────────────────────────────────────────────
Server started on {}
Serving up to {} clients at once.

Use Ctrl+C to shutdown.
"#,
        tinykv::VERSION,
        config.bind_address(),
        config.max_clients
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Args::parse().into_config();

    // Set up logging; RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let server = match Server::bind(config.clone()).await {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return Err(e.into());
        }
    };

    print_banner(&config);

    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    server.run_until(shutdown).await?;

    info!("Server shutdown complete");
    Ok(())
}
