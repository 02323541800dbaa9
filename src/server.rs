//! TCP Server
//!
//! Binds the listener, accepts clients and spawns one handler task per
//! connection. The accept loop never waits on request processing: a client
//! that arrives while `max_clients` others are being served is accepted
//! straight away, and its task waits for a free slot before it reads.
//!
//! ## Shutdown
//!
//! [`Server::run_until`] stops accepting when the shutdown future resolves
//! and drops the listener. Clients still waiting for a slot are
//! disconnected; clients already being served keep their task until they
//! disconnect.

use crate::commands::CommandHandler;
use crate::config::Config;
use crate::connection::{handle_connection, ConnectionStats};
use crate::error::Result;
use crate::storage::{SharedStore, Store};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

/// A key-value server bound to a TCP address.
pub struct Server {
    /// Server configuration
    config: Config,

    /// The bound listener
    listener: TcpListener,

    /// Store shared by every connection of this server
    store: SharedStore,

    /// Connection statistics
    stats: Arc<ConnectionStats>,

    /// One permit per client that may be served at the same time
    client_slots: Arc<Semaphore>,
}

impl Server {
    /// Binds a server with a fresh, empty store.
    pub async fn bind(config: Config) -> Result<Self> {
        Self::with_store(config, Store::shared()).await
    }

    /// Binds a server that serves the given store.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the address cannot be bound.
    pub async fn with_store(config: Config, store: SharedStore) -> Result<Self> {
        config.validate()?;

        let listener = TcpListener::bind(config.bind_address()).await?;
        info!(address = %listener.local_addr()?, "Listening");

        Ok(Self {
            client_slots: Arc::new(Semaphore::new(config.max_clients)),
            config,
            listener,
            store,
            stats: Arc::new(ConnectionStats::new()),
        })
    }

    /// Returns the address the listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Returns a handle to the store this server serves.
    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.store)
    }

    /// Returns the shared connection statistics.
    pub fn stats(&self) -> Arc<ConnectionStats> {
        Arc::clone(&self.stats)
    }

    /// Accepts clients until the process exits.
    pub async fn run(self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Accepts clients until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            _ = self.accept_loop() => {}
            _ = shutdown => {
                info!("Shutdown signal received, stopping server...");
            }
        }

        // Clients queued for a slot are dropped; served clients keep running.
        self.client_slots.close();
        info!(active = self.stats.active(), "Listener closed");
        Ok(())
    }

    /// Main loop that accepts incoming connections
    async fn accept_loop(&self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => self.spawn_handler(stream, addr),
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                }
            }
        }
    }

    /// Spawns the task serving one client.
    fn spawn_handler(&self, stream: TcpStream, addr: SocketAddr) {
        self.stats.connection_accepted();

        let command_handler = CommandHandler::new(Arc::clone(&self.store));
        let stats = Arc::clone(&self.stats);
        let slots = Arc::clone(&self.client_slots);
        let read_buffer_size = self.config.read_buffer_size;

        tokio::spawn(async move {
            if slots.available_permits() == 0 {
                debug!(client = %addr, "Client limit reached, waiting for a free slot");
            }

            let _permit = match slots.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    debug!(client = %addr, "Server stopped before client was served");
                    return;
                }
            };

            handle_connection(stream, addr, command_handler, stats, read_buffer_size).await;
        });
    }
}
