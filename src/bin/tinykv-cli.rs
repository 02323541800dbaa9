//! tinykv CLI Client
//!
//! Reads a line of input, sends it to the server as one request and prints
//! the raw response. `exit`, end of input or Ctrl+C closes the connection.

use clap::Parser;
use std::io::Write;
use std::process::exit;
use tinykv::Client;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// tinykv interactive client
#[derive(Parser, Debug)]
#[command(name = "tinykv-cli")]
#[command(about = "Interactive client for a tinykv server")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(short = 'H', long, default_value = tinykv::DEFAULT_HOST)]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = tinykv::DEFAULT_PORT)]
    port: u16,
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn is_exit(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|cmd| cmd.eq_ignore_ascii_case("exit"))
}

async fn io_loop(client: &mut Client) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt();

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = signal::ctrl_c() => None,
        };

        // End of input or Ctrl+C
        let Some(line) = line else {
            println!();
            return Ok(());
        };

        let request = line.trim();
        if request.is_empty() {
            continue;
        }
        if is_exit(request) {
            return Ok(());
        }

        match client.request(request).await? {
            Some(response) => println!("{}", response),
            None => {
                println!("Server closed the connection.");
                exit(1);
            }
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);

    let mut client = match Client::connect(addr.as_str()).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!(
                "Couldn't connect to {}! Make sure the tinykv server is running. ({})",
                addr, e
            );
            exit(1);
        }
    };

    if let Err(e) = io_loop(&mut client).await {
        error!("Unexpected error: {}", e);
        exit(1);
    }

    let _ = client.close().await;
}
