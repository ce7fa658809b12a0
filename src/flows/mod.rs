//! Flows module - Operations combining the core pieces
//!
//! Provides:
//! - count: Token counts for strings, files and directory trees

pub mod count;
