//! # liteDB
//!
//! A lightweight, durable key-value store with:
//! - Append-only file (AOF) logging for durability
//! - Crash recovery with partial-write handling
//! - Single-writer/multi-reader concurrency model
//! - Text-based, line-oriented TCP protocol
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │                  (Multiple Clients)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  one text line per command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Engine                                  │
//! │          (Parse → Dispatch, Single Writer / Multi Reader)    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │     AOF     │          │    Store    │
//!   │  (Append)   │          │  (RwLock)   │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! Every mutation is appended and fsynced to the AOF before it becomes
//! visible in the store; at startup the full AOF is replayed before any
//! client connection is accepted.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod aof;
pub mod store;
pub mod protocol;
pub mod network;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LiteError, Result};
pub use config::Config;
pub use engine::Engine;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of liteDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
