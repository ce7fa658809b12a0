//! Backends module - Filesystem access
//!
//! Provides:
//! - scan: Directory enumeration with walkdir

pub mod scan;
