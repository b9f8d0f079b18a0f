//! Encoding definitions and metadata

use clap::ValueEnum;
use strum::{Display, EnumIter, EnumString};

/// Subword encodings available for token estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, Display, EnumString, ValueEnum)]
pub enum Encoding {
    /// GPT-4 / GPT-3.5 family encoding
    #[default]
    #[strum(serialize = "cl100k_base")]
    #[value(name = "cl100k_base", alias = "cl100k")]
    Cl100kBase,

    /// GPT-4o family encoding
    #[strum(serialize = "o200k_base")]
    #[value(name = "o200k_base", alias = "o200k")]
    O200kBase,
}

impl Encoding {
    /// Canonical encoding name, as used by tiktoken
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Cl100kBase => "cl100k_base",
            Encoding::O200kBase => "o200k_base",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_encoding_names_round_trip() {
        for encoding in Encoding::iter() {
            assert_eq!(encoding.to_string(), encoding.name());
            assert_eq!(<Encoding as FromStr>::from_str(encoding.name()).unwrap(), encoding);
        }
        assert!(<Encoding as FromStr>::from_str("p50k_base").is_err());
    }

    #[test]
    fn test_default_is_cl100k() {
        assert_eq!(Encoding::default(), Encoding::Cl100kBase);
        assert_eq!(Encoding::default().name(), "cl100k_base");
    }
}
