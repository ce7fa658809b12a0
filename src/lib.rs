//! token-count library
//!
//! Counts the tokens a language model sees in a string, a file, or a
//! directory tree. Directory walks honor per-directory `.gptignore` /
//! `.gitignore` glob patterns plus a fixed set of default patterns.
//!
//! ```rust,no_run
//! use token_count::core::tokenizer::Encoder;
//! use token_count::flows::count::TokenCounter;
//!
//! let counter = TokenCounter::new(Encoder::for_model("gpt-3.5-turbo")?);
//! let report = counter.count_directory(std::path::Path::new("src"))?;
//! println!("{} tokens in {} files", report.tokens, report.files);
//! # Ok::<(), token_count::core::model::TokenCountError>(())
//! ```

pub mod backends;
pub mod core;
pub mod flows;
