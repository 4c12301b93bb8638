//! Error types for liteDB
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using LiteError
pub type Result<T> = std::result::Result<T, LiteError>;

/// Unified error type for liteDB operations
#[derive(Debug, Error)]
pub enum LiteError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Parse(String),

    // -------------------------------------------------------------------------
    // AOF Errors
    // -------------------------------------------------------------------------
    #[error("AOF corruption detected: {0}")]
    AofCorruption(String),

    #[error("AOF write failed: {0}")]
    AofWrite(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
