//! BPE tokenizer implementation using tiktoken

use once_cell::sync::OnceCell;
use tiktoken_rs::CoreBPE;

use super::Provider;
use crate::tokenizer::error::{TokenizerError, TokenizerResult};
use crate::tokenizer::model::Encoding;

// Loaded once per process and shared read-only
static CL100K: OnceCell<CoreBPE> = OnceCell::new();
static O200K: OnceCell<CoreBPE> = OnceCell::new();

fn load(encoding: Encoding) -> TokenizerResult<&'static CoreBPE> {
    let cell = match encoding {
        Encoding::Cl100kBase => &CL100K,
        Encoding::O200kBase => &O200K,
    };

    cell.get_or_try_init(|| match encoding {
        Encoding::Cl100kBase => tiktoken_rs::cl100k_base(),
        Encoding::O200kBase => tiktoken_rs::o200k_base(),
    })
    .map_err(|e| TokenizerError::LoadError {
        encoding: encoding.name(),
        message: e.to_string(),
    })
}

/// Tiktoken-backed provider
pub struct TiktokenProvider {
    bpe: &'static CoreBPE,
}

impl TiktokenProvider {
    /// Create a provider for the given encoding
    pub fn new(encoding: Encoding) -> TokenizerResult<Self> {
        Ok(Self {
            bpe: load(encoding)?,
        })
    }
}

impl Provider for TiktokenProvider {
    fn count_tokens(&self, text: &str) -> TokenizerResult<usize> {
        Ok(self.bpe.encode_ordinary(text).len())
    }
}
