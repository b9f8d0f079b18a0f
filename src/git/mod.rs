/*!
 * Git repository handling functionality
 */

mod error;
mod progress;
mod repository;

// Re-export public items
pub use error::{GitError, GitResult};
pub use progress::{GitProgress, ProgressReporter};
pub use repository::{clone_repository, CloneOptions, ClonedRepository};
