//! AOF Reader
//!
//! Handles reading records back from the AOF file.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{LiteError, Result};

use super::record::{Record, FRAME_HEADER_SIZE};

/// Sequential reader over AOF records
///
/// Distinguishes two failure modes:
/// - a frame cut short by the end of the file (or a bad checksum on a frame
///   that ends exactly at EOF) is a torn trailing write: iteration stops and
///   [`AofReader::truncated`] is set;
/// - a bad checksum or undecodable payload anywhere else is interior
///   corruption and surfaces as [`LiteError::AofCorruption`].
pub struct AofReader {
    reader: BufReader<File>,
    file_len: u64,
    offset: u64,
    valid_len: u64,
    truncated: bool,
    done: bool,
}

impl AofReader {
    /// Open an AOF file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();

        Ok(Self {
            reader: BufReader::new(file),
            file_len,
            offset: 0,
            valid_len: 0,
            truncated: false,
            done: false,
        })
    }

    /// Read the next record.
    ///
    /// Returns `Ok(None)` at the end of the valid prefix, whether the file
    /// ended cleanly or with a torn trailing frame.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        if self.done {
            return Ok(None);
        }

        // Clean EOF at a frame boundary
        if self.offset == self.file_len {
            self.done = true;
            return Ok(None);
        }

        let remaining = self.file_len - self.offset;

        // Frame header cut short
        if remaining < FRAME_HEADER_SIZE as u64 {
            return Ok(self.stop_truncated());
        }

        let mut header = [0u8; FRAME_HEADER_SIZE];
        self.reader.read_exact(&mut header)?;

        let crc = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as u64;

        // Payload extends past EOF: the length field belongs to a frame that
        // never finished being written
        if remaining < FRAME_HEADER_SIZE as u64 + len {
            return Ok(self.stop_truncated());
        }

        let mut payload = vec![0u8; len as usize];
        self.reader.read_exact(&mut payload)?;

        let frame_end = self.offset + FRAME_HEADER_SIZE as u64 + len;

        if crc32fast::hash(&payload) != crc {
            // A checksum mismatch on the very last frame is a torn write;
            // anywhere else it is interior corruption.
            if frame_end == self.file_len {
                return Ok(self.stop_truncated());
            }
            return Err(LiteError::AofCorruption(format!(
                "checksum mismatch at offset {}",
                self.offset
            )));
        }

        let record = match Record::decode(&payload) {
            Ok(record) => record,
            Err(e) => {
                if frame_end == self.file_len {
                    return Ok(self.stop_truncated());
                }
                return Err(e);
            }
        };

        self.offset = frame_end;
        self.valid_len = frame_end;
        Ok(Some(record))
    }

    fn stop_truncated(&mut self) -> Option<Record> {
        self.truncated = true;
        self.done = true;
        None
    }

    /// Whether a torn trailing frame was discarded
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Length of the valid record prefix, in bytes
    pub fn valid_len(&self) -> u64 {
        self.valid_len
    }
}
