//! Global error handling for codetxt
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project. File-level problems (binary content,
//! unreadable files, oversized files) are never errors: the scanner absorbs
//! them into content markers or exclusions.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::git::GitError;
use crate::tokenizer::TokenizerError;

/// Global error type for codetxt operations
#[derive(Error, Debug)]
pub enum CodetxtError {
    /// Filtering removed everything, including the root
    #[error("The source directory is empty or all files were ignored: {}", .0.display())]
    EmptyResult(PathBuf),

    /// A directory could not be listed
    #[error("Failed to list directory {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Git-related errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Tokenizer-related errors
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),

    /// File system errors (stat, canonicalize, output writing)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An include/exclude or ignore pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] ignore::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),
}

/// Specialized Result type for codetxt operations
pub type Result<T> = std::result::Result<T, CodetxtError>;

/// Creates a CodetxtError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CodetxtError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

impl CodetxtError {
    /// Whether this error means "nothing survived filtering"
    pub fn is_empty_result(&self) -> bool {
        matches!(self, CodetxtError::EmptyResult(_))
    }
}
