/*!
 * Error types for Git operations
 */

use thiserror::Error;

/// Errors that can occur during Git operations
#[derive(Error, Debug)]
pub enum GitError {
    /// Source is not a supported remote URL
    #[error("Invalid Git URL: {0}")]
    InvalidUrl(String),

    /// Error cloning a Git repository
    #[error("Failed to clone repository. Is the URL correct and the repository public?\n  Details: {0}")]
    CloneError(git2::Error),

    /// The temporary clone directory could not be created
    #[error("Failed to create temporary directory: {0}")]
    TempDir(#[from] std::io::Error),
}

/// Specialized Result type for Git operations
pub type GitResult<T> = Result<T, GitError>;
