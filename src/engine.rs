//! Engine Module
//!
//! The core storage engine that coordinates all components.
//!
//! ## Responsibilities
//! - Replay the AOF into the store on startup, before anything else
//! - Parse raw command lines and dispatch them
//! - Keep the store and the AOF in lockstep
//!
//! ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
//!
//! - **Writes** (SET/DEL/FLUSHALL): serialized by the `aof` mutex.
//!   The critical section is {AOF append + fsync → store mutation}, so a
//!   mutation never becomes visible before it is durable, and the log never
//!   omits an effect the store holds.
//!
//! - **Reads** (GET/EXISTS/KEYS): concurrent, through the store's internal
//!   RwLock. A reader sees either none or all of a mutation, never half.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::aof::{AofReplay, AofWriter, Mutation};
use crate::config::Config;
use crate::error::Result;
use crate::protocol::{Command, Reply};
use crate::store::Store;

/// The main storage engine
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Path of the append-only log file
    aof_path: PathBuf,

    /// In-memory key-value map (internal RwLock)
    store: Store,

    /// Append-only log writer; its mutex doubles as the write lock
    aof: Mutex<AofWriter>,
}

impl Engine {
    const AOF_FILENAME: &'static str = "aof.log";

    /// Open or create an engine with the given config.
    ///
    /// On startup:
    /// 1. Create the data directory if needed
    /// 2. Replay the AOF into the store (repairing a torn tail)
    /// 3. Open the AOF for appending
    ///
    /// Replay runs to completion before this returns, so no caller can
    /// observe a partially-replayed store. Interior log corruption fails
    /// here rather than serving from a store with gaps in its history.
    pub fn open(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;

        let aof_path = config.data_dir.join(Self::AOF_FILENAME);

        let store = Store::new();
        let stats = AofReplay::recover(&aof_path, &store)?;

        if stats.records_applied > 0 || stats.was_truncated {
            tracing::info!(
                "AOF replay: {} records applied, last_seq={}, truncated={}",
                stats.records_applied,
                stats.last_seq,
                stats.was_truncated
            );
        }

        let aof = AofWriter::open(&aof_path, stats.last_seq + 1)?;

        Ok(Self {
            config,
            aof_path,
            store,
            aof: Mutex::new(aof),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        config.data_dir = path.to_path_buf();
        Self::open(config)
    }

    /// Execute one raw command line.
    ///
    /// Returns `None` for an empty line (ignored, no reply); otherwise every
    /// outcome, including parse and durability failures, is a reply. This is
    /// the entry point connection sessions call.
    pub fn execute_line(&self, line: &str) -> Option<Reply> {
        match Command::parse(line) {
            Ok(Some(command)) => Some(self.dispatch(command)),
            Ok(None) => None,
            Err(e) => Some(Reply::error(e)),
        }
    }

    /// Execute a parsed command
    ///
    /// Routes commands to appropriate handlers
    pub fn dispatch(&self, command: Command) -> Reply {
        match command {
            Command::Get { key } => match self.store.get(&key) {
                Some(value) => Reply::from_value(value),
                None => Reply::Nil,
            },
            Command::Exists { key } => Reply::Int(self.store.exists(&key) as i64),
            Command::Keys => {
                Reply::Array(self.store.keys().into_iter().map(Reply::Str).collect())
            }
            Command::Ping => Reply::Str("PONG".to_string()),
            Command::Set { key, value } => {
                match self.log_and_apply(Mutation::Set { key, value }) {
                    Ok(_) => Reply::Nil,
                    Err(e) => Reply::error(e),
                }
            }
            Command::Del { key } => match self.del(&key) {
                Ok(count) => Reply::Int(count as i64),
                Err(e) => Reply::error(e),
            },
            Command::FlushAll => match self.log_and_apply(Mutation::FlushAll) {
                Ok(_) => Reply::Nil,
                Err(e) => Reply::error(e),
            },
        }
    }

    /// Delete a key, logging only when something is actually removed.
    ///
    /// The presence check happens under the write lock, so no other writer
    /// can race between the check and the apply.
    pub fn del(&self, key: &str) -> Result<usize> {
        let mut aof = self.aof.lock();
        if !self.store.exists(key) {
            return Ok(0);
        }
        aof.append(Mutation::Del {
            key: key.to_string(),
        })?;
        Ok(self.store.delete(key))
    }

    /// Append a mutation to the AOF, then apply it to the store.
    ///
    /// The append is durable before the store changes; if it fails, the
    /// store is left untouched and the caller surfaces the error.
    fn log_and_apply(&self, mutation: Mutation) -> Result<usize> {
        let mut aof = self.aof.lock();
        if let Err(e) = aof.append(mutation.clone()) {
            tracing::error!("AOF append failed, rejecting write: {}", e);
            return Err(e);
        }
        Ok(mutation.apply(&self.store))
    }

    /// Close the engine gracefully, syncing the AOF to disk
    pub fn close(self) -> Result<()> {
        self.aof.lock().sync()
    }

    // =========================================================================
    // Typed API (used by tests, benches, and embedders)
    // =========================================================================

    /// Set a key to a value
    pub fn set(&self, key: &str, value: crate::store::Value) -> Result<()> {
        self.log_and_apply(Mutation::Set {
            key: key.to_string(),
            value,
        })?;
        Ok(())
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<crate::store::Value> {
        self.store.get(key)
    }

    /// Remove every key
    pub fn flush_all(&self) -> Result<usize> {
        self.log_and_apply(Mutation::FlushAll)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the AOF file path
    pub fn aof_path(&self) -> &Path {
        &self.aof_path
    }

    /// The underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
