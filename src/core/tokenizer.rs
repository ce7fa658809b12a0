//! Token counting module - Encoder adapter over tiktoken
//!
//! An [`Encoder`] is built once per invocation from a model name and then
//! used for every piece of text. The name may be an OpenAI model
//! (`gpt-3.5-turbo`, `gpt-4o`, `text-davinci-003`, ...) or a raw encoding
//! name (`cl100k_base`, `o200k_base`, ...).
//!
//! Usage:
//! ```rust,ignore
//! let encoder = Encoder::for_model("gpt-3.5-turbo")?;
//! let tokens = encoder.encode_count("hello world")?;
//! ```
//!
//! Text that contains a special token string (`<|endoftext|>`, ...) is
//! rejected rather than encoded, so ordinary input never counts as control
//! tokens.

use std::fmt;
use tiktoken_rs::{cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base, CoreBPE};

use crate::core::model::TokenCountError;

/// Model used when none is given on the command line
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Encoding names accepted directly, in addition to model names
pub const ENCODING_NAMES: &[&str] = &[
    "o200k_base",
    "cl100k_base",
    "p50k_base",
    "p50k_edit",
    "r50k_base",
];

/// A tokenizer bound to one model
pub struct Encoder {
    model: String,
    bpe: CoreBPE,
    /// Special token strings of the encoding, sorted
    special: Vec<String>,
}

impl Encoder {
    /// Build the encoder for `model_name`
    ///
    /// Fails with [`TokenCountError::UnknownModel`] when tiktoken has no
    /// tokenizer for the name.
    pub fn for_model(model_name: &str) -> Result<Self, TokenCountError> {
        let unknown = |reason: String| TokenCountError::UnknownModel {
            model: model_name.to_string(),
            reason,
        };

        let trimmed = model_name.trim();
        if trimmed.is_empty() {
            return Err(unknown("model name is empty".to_string()));
        }

        let loaded = match trimmed.to_lowercase().as_str() {
            "o200k_base" => o200k_base(),
            "cl100k_base" => cl100k_base(),
            "p50k_base" => p50k_base(),
            "p50k_edit" => p50k_edit(),
            "r50k_base" | "gpt2" => r50k_base(),
            _ => tiktoken_rs::get_bpe_from_model(trimmed),
        };

        let bpe = loaded.map_err(|e| {
            unknown(format!(
                "{}. Use an OpenAI model name or one of: {}",
                e,
                ENCODING_NAMES.join(", ")
            ))
        })?;

        let mut special: Vec<String> = bpe
            .special_tokens()
            .into_iter()
            .map(str::to_string)
            .collect();
        special.sort();

        tracing::debug!(model = trimmed, special = special.len(), "loaded tokenizer");

        Ok(Self {
            model: trimmed.to_string(),
            bpe,
            special,
        })
    }

    /// Name the encoder was built from
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Token ids for `text`
    ///
    /// Fails with [`TokenCountError::SpecialToken`] when `text` contains one of
    /// the encoding's special token strings.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>, TokenCountError> {
        if let Some(token) = self.special.iter().find(|t| text.contains(t.as_str())) {
            return Err(TokenCountError::SpecialToken {
                token: token.clone(),
            });
        }
        Ok(self.bpe.encode_ordinary(text))
    }

    /// Number of tokens the model produces for `text`
    pub fn encode_count(&self, text: &str) -> Result<usize, TokenCountError> {
        if text.is_empty() {
            return Ok(0);
        }
        Ok(self.encode(text)?.len())
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
