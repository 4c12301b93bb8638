//! Network Module
//!
//! TCP server and per-connection session handling.
//!
//! ## Responsibilities
//! - Accept client connections (up to a configured cap)
//! - Run one sequential command loop per client
//! - Keep session failures isolated: a dropped client never affects the
//!   store or other sessions

mod connection;
mod server;

pub use connection::Connection;
pub use server::Server;
