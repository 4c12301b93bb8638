//! In-Memory Store Module
//!
//! The key-value map shared by all client sessions.
//!
//! ## Responsibilities
//! - Hold the live key → value mapping
//! - Preserve the type of each stored value (string vs integer)
//! - Allow many concurrent readers, serialized writers

mod table;
mod value;

pub use table::Store;
pub use value::Value;
