//! AOF record definitions
//!
//! Defines the structure of individual log records and their framing.

use serde::{Deserialize, Serialize};

use crate::error::{LiteError, Result};
use crate::store::{Store, Value};

/// Frame header size: 4-byte CRC32 + 4-byte payload length
pub const FRAME_HEADER_SIZE: usize = 8;

/// A single record in the AOF
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Sequence number - monotonically increasing
    pub seq: u64,

    /// The mutation to apply
    pub mutation: Mutation,
}

/// Mutations that can be logged
///
/// Read-only commands (GET, EXISTS, KEYS, PING) are never logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Set a key to a value
    Set { key: String, value: Value },

    /// Delete a key
    Del { key: String },

    /// Remove every key
    FlushAll,
}

impl Mutation {
    /// Apply this mutation to a store, returning the number of entries
    /// affected.
    ///
    /// This is the single mutation path: the dispatcher calls it after a
    /// durable append, and replay calls it for every recorded mutation.
    pub fn apply(&self, store: &Store) -> usize {
        match self {
            Mutation::Set { key, value } => {
                store.set(key.clone(), value.clone());
                1
            }
            Mutation::Del { key } => store.delete(key),
            Mutation::FlushAll => store.clear(),
        }
    }
}

impl Record {
    pub fn new(seq: u64, mutation: Mutation) -> Self {
        Self { seq, mutation }
    }

    /// Encode this record as a framed byte sequence: CRC + length + payload
    pub fn encode(&self) -> Result<Vec<u8>> {
        let payload = bincode::serialize(self)
            .map_err(|e| LiteError::AofWrite(format!("record serialization failed: {}", e)))?;

        let crc = crc32fast::hash(&payload);

        let mut frame = Vec::with_capacity(FRAME_HEADER_SIZE + payload.len());
        frame.extend_from_slice(&crc.to_le_bytes());
        frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        frame.extend_from_slice(&payload);

        Ok(frame)
    }

    /// Decode a record from a checksum-verified payload
    pub fn decode(payload: &[u8]) -> Result<Self> {
        bincode::deserialize(payload)
            .map_err(|e| LiteError::AofCorruption(format!("undecodable record: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let record = Record::new(
            7,
            Mutation::Set {
                key: "key1".into(),
                value: Value::Str("value1".into()),
            },
        );

        let frame = record.encode().unwrap();
        let payload = &frame[FRAME_HEADER_SIZE..];

        let crc = u32::from_le_bytes(frame[0..4].try_into().unwrap());
        let len = u32::from_le_bytes(frame[4..8].try_into().unwrap());
        assert_eq!(len as usize, payload.len());
        assert_eq!(crc, crc32fast::hash(payload));

        let decoded = Record::decode(payload).unwrap();
        assert_eq!(decoded.seq, 7);
        assert_eq!(
            decoded.mutation,
            Mutation::Set {
                key: "key1".into(),
                value: Value::Str("value1".into()),
            }
        );
    }

    #[test]
    fn apply_matches_store_semantics() {
        let store = Store::new();

        assert_eq!(
            Mutation::Set {
                key: "k".into(),
                value: Value::Int(5)
            }
            .apply(&store),
            1
        );
        assert_eq!(store.get("k"), Some(Value::Int(5)));

        assert_eq!(Mutation::Del { key: "k".into() }.apply(&store), 1);
        assert_eq!(Mutation::Del { key: "k".into() }.apply(&store), 0);

        store.set("a".into(), Value::Int(1));
        store.set("b".into(), Value::Int(2));
        assert_eq!(Mutation::FlushAll.apply(&store), 2);
        assert!(store.is_empty());
    }
}
