//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use crate::engine::Engine;
use crate::error::{LiteError, Result};

/// Maximum request line length, in bytes (newline excluded)
pub const MAX_REQUEST_SIZE: u64 = 4096;

/// Handles a single client connection
///
/// Owns no store state; every command goes through the engine's dispatch
/// path. Commands from one session interleave with other sessions only
/// between whole commands.
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Reference to the storage engine
    engine: Arc<Engine>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O and disables Nagle's algorithm
    pub fn new(stream: TcpStream, engine: Arc<Engine>) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            engine,
            peer_addr,
        })
    }

    /// Configure connection timeouts
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_stream = self.reader.get_ref();
        let write_stream = self.writer.get_ref();

        if read_ms > 0 {
            read_stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            write_stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads one command line at a time and writes one reply line back.
    /// Returns when the client disconnects or an unrecoverable I/O error
    /// occurs.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        let mut line = String::new();
        loop {
            line.clear();

            // Bounded read: one byte past the cap is enough to tell an
            // oversized request from one that exactly fits
            let mut limited = self.reader.by_ref().take(MAX_REQUEST_SIZE + 1);
            match limited.read_line(&mut line) {
                // EOF: client closed the connection
                Ok(0) => {
                    tracing::debug!("Client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Ok(_) => {}
                Err(ref e) if Self::is_disconnect(e.kind()) => {
                    tracing::debug!("Client {} dropped: {}", self.peer_addr, e);
                    return Ok(());
                }
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    tracing::debug!("Read timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    return Err(e.into());
                }
            }

            // The cap was hit before a line terminator arrived
            if line.len() as u64 > MAX_REQUEST_SIZE && !line.ends_with('\n') {
                tracing::warn!("Oversized request from {}, closing session", self.peer_addr);
                let _ = self.send_line("(err) request too long");
                // Drain the rest of the line so the close carries no unread
                // bytes (an abrupt close would reset the error reply away)
                let _ = self.discard_rest_of_line();
                return Ok(());
            }

            tracing::trace!("Received from {}: {:?}", self.peer_addr, line.trim_end());

            // Empty lines are ignored without a reply
            let reply = match self.engine.execute_line(&line) {
                Some(reply) => reply,
                None => continue,
            };

            if let Err(e) = self.send_line(&reply.to_string()) {
                if let LiteError::Io(ref io_err) = e {
                    if Self::is_disconnect(io_err.kind()) {
                        tracing::debug!(
                            "Client {} disconnected before reply could be sent: {}",
                            self.peer_addr,
                            e
                        );
                        return Ok(());
                    }
                }
                tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
                return Err(e);
            }
        }
    }

    /// Read and discard input until a newline or EOF
    fn discard_rest_of_line(&mut self) -> Result<()> {
        let mut buf = [0u8; 1024];
        loop {
            let n = self.reader.read(&mut buf)?;
            if n == 0 || buf[..n].contains(&b'\n') {
                return Ok(());
            }
        }
    }

    /// Write a single reply line and flush
    fn send_line(&mut self, reply: &str) -> Result<()> {
        self.writer.write_all(reply.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn is_disconnect(kind: std::io::ErrorKind) -> bool {
        matches!(
            kind,
            std::io::ErrorKind::UnexpectedEof
                | std::io::ErrorKind::ConnectionReset
                | std::io::ErrorKind::ConnectionAborted
                | std::io::ErrorKind::BrokenPipe
        )
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
