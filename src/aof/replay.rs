//! AOF Replay
//!
//! Rebuilds store state from the AOF at startup.

use std::fs::OpenOptions;
use std::path::Path;

use crate::error::Result;
use crate::store::Store;

use super::reader::AofReader;

/// Runs the startup replay
pub struct AofReplay;

/// Result of a replay operation
#[derive(Debug)]
pub struct ReplayStats {
    /// Number of records applied
    pub records_applied: u64,

    /// Sequence number of the last applied record (0 if none)
    pub last_seq: u64,

    /// Whether a torn trailing record was discarded
    pub was_truncated: bool,
}

impl AofReplay {
    /// Replay an AOF file into a store.
    ///
    /// Applies every complete record in file order through the same mutation
    /// path the dispatcher uses, without re-appending. If the file ends in a
    /// torn frame, the file is truncated back to the last complete record so
    /// subsequent appends start at a clean boundary. A damaged interior
    /// record is fatal: the caller must not serve from a store with silent
    /// gaps in its history.
    ///
    /// A missing file is an empty history; the store is left untouched.
    pub fn recover(path: &Path, store: &Store) -> Result<ReplayStats> {
        if !path.exists() {
            return Ok(ReplayStats {
                records_applied: 0,
                last_seq: 0,
                was_truncated: false,
            });
        }

        let mut reader = AofReader::open(path)?;
        let mut records_applied = 0u64;
        let mut last_seq = 0u64;

        while let Some(record) = reader.next_record()? {
            record.mutation.apply(store);
            records_applied += 1;
            last_seq = record.seq;
        }

        let was_truncated = reader.truncated();
        if was_truncated {
            let valid_len = reader.valid_len();
            tracing::warn!(
                "discarding torn trailing AOF record; truncating {} to {} bytes",
                path.display(),
                valid_len
            );
            OpenOptions::new().write(true).open(path)?.set_len(valid_len)?;
        }

        Ok(ReplayStats {
            records_applied,
            last_seq,
            was_truncated,
        })
    }
}
