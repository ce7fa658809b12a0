//! Core module - Data model and building blocks shared by the flows
//!
//! This module provides:
//! - Error taxonomy and count reports (model)
//! - The tiktoken encoder adapter (tokenizer)
//! - Per-directory ignore patterns (ignore_rules)
//! - Strict UTF-8 file reads (file_reader)
//! - Path helpers (paths)
//! - Plain/JSON rendering (render)

pub mod file_reader;
pub mod ignore_rules;
pub mod model;
pub mod paths;
pub mod render;
pub mod tokenizer;
