//! Utilities for feed_sync
//!
//! This module provides logging setup and identifier naming helpers.

pub mod logging;
pub mod naming;

// Re-export key utility functions
pub use logging::init_logging;
pub use naming::{attribute_column, quote_identifier, quote_qualified, ChildColumnNamer};
