//! Document module for feed_sync
//!
//! This module parses feed documents into an owned element tree and loads them
//! from files or URLs.

pub mod node;
pub mod parser;
pub mod source;

pub use node::{Document, Node};
pub use parser::parse_document;
