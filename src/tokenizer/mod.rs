//! Tokenizer module for token estimates
//!
//! Token counts are an approximation surfaced to the user, computed with a
//! fixed, named BPE encoding (`cl100k_base` unless configured otherwise).

mod error;
mod model;
mod provider;

// Re-exports for public API
pub use error::{TokenizerError, TokenizerResult};
pub use model::Encoding;

use provider::tiktoken::TiktokenProvider;
use provider::Provider;

/// Result of token counting operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCount {
    /// Number of tokens in the text
    pub tokens: usize,
    /// Encoding used to count
    pub encoding: Encoding,
}

/// Trait defining the interface for tokenizers
pub trait Tokenizer: Send + Sync {
    /// Count tokens in the given text
    fn count_tokens(&self, text: &str) -> TokenizerResult<TokenCount>;
}

/// Create a tokenizer for the specified encoding
pub fn create_tokenizer(encoding: Encoding) -> TokenizerResult<Box<dyn Tokenizer>> {
    let provider = TiktokenProvider::new(encoding)?;
    Ok(Box::new(EncodingTokenizer {
        provider: Box::new(provider),
        encoding,
    }))
}

/// Tokenizer backed by a provider for one encoding
struct EncodingTokenizer {
    provider: Box<dyn Provider>,
    encoding: Encoding,
}

impl Tokenizer for EncodingTokenizer {
    fn count_tokens(&self, text: &str) -> TokenizerResult<TokenCount> {
        Ok(TokenCount {
            tokens: self.provider.count_tokens(text)?,
            encoding: self.encoding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_tokens() {
        let tokenizer = create_tokenizer(Encoding::Cl100kBase).unwrap();
        let count = tokenizer.count_tokens("").unwrap();
        assert_eq!(count.tokens, 0);
        assert_eq!(count.encoding, Encoding::Cl100kBase);
    }

    #[test]
    fn test_cl100k_counts() {
        let tokenizer = create_tokenizer(Encoding::default()).unwrap();
        // "hello" is a single cl100k token
        assert_eq!(tokenizer.count_tokens("hello").unwrap().tokens, 1);

        let count = tokenizer.count_tokens("Hello, world!").unwrap().tokens;
        assert!(count > 1 && count < 10);
    }

    #[test]
    fn test_tokenizer_is_reusable_across_encodings() {
        let a = create_tokenizer(Encoding::Cl100kBase).unwrap();
        let b = create_tokenizer(Encoding::O200kBase).unwrap();
        let from_a = a.count_tokens("fn main() {}").unwrap();
        let from_b = b.count_tokens("fn main() {}").unwrap();
        assert_eq!(from_a.encoding, Encoding::Cl100kBase);
        assert_eq!(from_b.encoding, Encoding::O200kBase);
        assert!(from_a.tokens > 0 && from_b.tokens > 0);
    }
}
