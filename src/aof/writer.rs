//! AOF Writer
//!
//! Handles appending records to the AOF file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::{LiteError, Result};

use super::record::{Mutation, Record};

/// Writes records to the AOF file
///
/// Exclusively owns the file handle. Every append is written and fsynced
/// before returning, so no caller releases a reply for a mutation that is
/// not yet durable.
///
/// A failed append must not leave a partial frame in the file: later
/// appends would land behind the garbage and replay would misread them as
/// a torn tail. The writer tracks the length of the complete-record prefix
/// and rolls the file back to it on any write error; if the rollback itself
/// fails, the writer refuses all further appends.
pub struct AofWriter {
    file: File,
    len: u64,
    next_seq: u64,
    poisoned: bool,
}

impl AofWriter {
    /// Open or create an AOF file for appending.
    ///
    /// `next_seq` continues the sequence numbering where replay left off.
    pub fn open(path: &Path, next_seq: u64) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let len = file.metadata()?.len();

        Ok(Self {
            file,
            len,
            next_seq,
            poisoned: false,
        })
    }

    /// Append a mutation to the AOF and make it durable.
    ///
    /// Returns the sequence number assigned to the record. On failure the
    /// file holds exactly the records of the successful appends, same as
    /// before the call.
    pub fn append(&mut self, mutation: Mutation) -> Result<u64> {
        if self.poisoned {
            return Err(LiteError::AofWrite(
                "log rollback failed after an earlier write error; not accepting appends".to_string(),
            ));
        }

        let seq = self.next_seq;
        let frame = Record::new(seq, mutation).encode()?;

        let written = self
            .file
            .write_all(&frame)
            .and_then(|_| self.file.sync_data());

        if let Err(e) = written {
            self.rollback();
            return Err(LiteError::AofWrite(e.to_string()));
        }

        self.len += frame.len() as u64;
        self.next_seq += 1;
        Ok(seq)
    }

    /// Restore the file to the last complete record after a failed append
    fn rollback(&mut self) {
        let result = self
            .file
            .set_len(self.len)
            .and_then(|_| self.file.sync_data());

        if let Err(e) = result {
            self.poisoned = true;
            tracing::error!("AOF rollback failed, refusing further appends: {}", e);
        }
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::store::Value;

    use super::*;

    fn set(key: &str, n: i64) -> Mutation {
        Mutation::Set {
            key: key.to_string(),
            value: Value::Int(n),
        }
    }

    #[test]
    fn append_assigns_sequential_numbers() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("aof.log");

        let mut writer = AofWriter::open(&path, 1).unwrap();
        assert_eq!(writer.append(set("a", 1)).unwrap(), 1);
        assert_eq!(writer.append(set("b", 2)).unwrap(), 2);
    }

    #[test]
    #[cfg(unix)]
    fn failed_append_is_an_aof_write_error_and_keeps_failing_safely() {
        // /dev/full accepts the open but fails every write with ENOSPC
        let path = Path::new("/dev/full");

        let mut writer = AofWriter::open(path, 1).unwrap();
        let err = writer.append(set("a", 1)).unwrap_err();
        assert!(matches!(err, LiteError::AofWrite(_)));

        // Whether the rollback succeeded or poisoned the writer, later
        // appends keep reporting failure instead of acknowledging writes
        let err = writer.append(set("b", 2)).unwrap_err();
        assert!(matches!(err, LiteError::AofWrite(_)));
    }
}
