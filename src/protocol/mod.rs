//! Protocol Module
//!
//! The text-based, line-oriented client protocol.
//!
//! ## Wire Format
//!
//! Requests are single lines, tokenized on whitespace:
//!
//! ```text
//! <COMMAND> <arg1> [<arg2>]
//! ```
//!
//! Replies are single lines tagged by type:
//!
//! ```text
//! (nil)
//! (str) <value>
//! (int) <value>
//! (err) <message>
//! ```
//!
//! The KEYS command replies with an `(arr) <n>` header line followed by
//! `n` element lines.

mod command;
mod reply;

pub use command::Command;
pub use reply::Reply;
