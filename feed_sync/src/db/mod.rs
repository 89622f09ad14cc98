//! Database module for feed_sync
//!
//! This module handles database connections, introspection and writes.

pub mod connection;
pub mod executor;
pub mod maintenance;
pub mod store;

// Re-export key types
pub use connection::DatabaseConnection;
pub use store::Store;
