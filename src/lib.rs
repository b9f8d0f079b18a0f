/*!
 * codetxt - Turn a repository into a prompt-friendly text digest for LLMs
 *
 * This library walks a directory with gitignore-aware filtering, builds a
 * pruned and sorted tree and renders it as a single plain-text digest with a
 * summary, a directory diagram and the contents of every text file.
 */

pub mod binary;
pub mod config;
pub mod error;
pub mod formatter;
pub mod git;
pub mod gitignore;
pub mod pattern;
pub mod report;
pub mod scanner;
pub mod source;
pub mod tokenizer;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use indicatif::ProgressBar;

// Re-export main components for easier access
pub use config::{Args, Config};
pub use error::{CodetxtError, Result};
pub use formatter::{Digest, DigestFormatter, DigestStats};
pub use report::{ReportFormat, Reporter, RunReport};
pub use scanner::{ScanStatistics, Scanner};
pub use source::Source;
pub use types::{DirectoryNode, FileContent, FileNode, Node, NodeKind};
pub use utils::format_file_size;

/// Scan `config.target_dir` and format the result, without progress output
pub fn ingest(config: &Config) -> Result<(Node, Digest)> {
    let scanner = Scanner::new(config.clone(), Arc::new(ProgressBar::hidden()))?;
    let root = scanner.scan()?;
    let digest = DigestFormatter::new(config)?.format(&root)?;
    Ok((root, digest))
}
