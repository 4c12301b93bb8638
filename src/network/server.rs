//! TCP Server
//!
//! Accepts connections and hands each one to its own session thread.

use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::Result;

use super::Connection;

/// TCP server for liteDB
pub struct Server {
    config: Config,
    engine: Arc<Engine>,
    active_connections: Arc<AtomicUsize>,
}

impl Server {
    /// Create a new server with the given config and engine
    pub fn new(config: Config, engine: Arc<Engine>) -> Self {
        Self {
            config,
            engine,
            active_connections: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Start the server (blocking).
    ///
    /// The engine's AOF replay already ran inside `Engine::open`, so every
    /// session accepted here observes the fully-recovered store.
    pub fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr)?;
        tracing::info!("Listening on {}", self.config.listen_addr);

        for stream in listener.incoming() {
            let stream = match stream {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!("Failed to accept connection: {}", e);
                    continue;
                }
            };

            if self.active_connections.load(Ordering::Acquire) >= self.config.max_connections {
                tracing::warn!("Connection limit reached, rejecting client");
                Self::reject(stream);
                continue;
            }

            self.spawn_session(stream);
        }

        Ok(())
    }

    fn spawn_session(&self, stream: TcpStream) {
        let engine = Arc::clone(&self.engine);
        let counter = Arc::clone(&self.active_connections);
        let read_ms = self.config.read_timeout_ms;
        let write_ms = self.config.write_timeout_ms;

        counter.fetch_add(1, Ordering::AcqRel);

        thread::spawn(move || {
            let result = Connection::new(stream, engine).and_then(|mut conn| {
                conn.set_timeouts(read_ms, write_ms)?;
                conn.handle()
            });

            // Session failures stay inside the session
            if let Err(e) = result {
                tracing::warn!("Session ended with error: {}", e);
            }

            counter.fetch_sub(1, Ordering::AcqRel);
        });
    }

    fn reject(stream: TcpStream) {
        use std::io::Write;
        let mut stream = stream;
        let _ = stream.write_all(b"(err) too many connections\n");
    }
}
