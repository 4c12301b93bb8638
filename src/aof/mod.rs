//! Append-Only File (AOF) Module
//!
//! Provides durability through append-only logging of mutations.
//!
//! ## Responsibilities
//! - Append one record per accepted mutation, fsynced before the reply
//! - CRC32 checksums for corruption detection
//! - Sequence numbers for ordering
//! - Startup replay with partial-write handling
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Record 1                                │
//! │ ┌─────────┬─────────┬─────────────────┐ │
//! │ │ CRC (4) │ Len (4) │ Payload (Len)   │ │
//! │ └─────────┴─────────┴─────────────────┘ │
//! ├─────────────────────────────────────────┤
//! │ Record 2                                │
//! │ ┌─────────┬─────────┬─────────────────┐ │
//! │ │ CRC (4) │ Len (4) │ Payload (Len)   │ │
//! │ └─────────┴─────────┴─────────────────┘ │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The payload is a bincode-encoded [`Record`]. A torn write can only
//! truncate the file mid-frame, so replay detects it as a short read (or a
//! bad checksum on the final frame) and discards exactly that record.

mod record;
mod reader;
mod replay;
mod writer;

pub use record::{Mutation, Record, FRAME_HEADER_SIZE};
pub use reader::AofReader;
pub use replay::{AofReplay, ReplayStats};
pub use writer::AofWriter;
