/*!
 * Digest formatter for codetxt
 *
 * Renders a scanned tree into the plain-text digest: preamble, summary,
 * directory structure and file contents, in that fixed order.
 */

use crate::config::Config;
use crate::error::Result;
use crate::tokenizer::{create_tokenizer, Encoding, Tokenizer};
use crate::types::{FileContent, Node};
use crate::utils::{format_count, format_file_size};

/// Width of the `=` separator lines around each file header
pub const SEPARATOR_WIDTH: usize = 60;

pub const SUMMARY_HEADER: &str = "--- SUMMARY ---";
pub const STRUCTURE_HEADER: &str = "--- DIRECTORY STRUCTURE ---";
pub const CONTENTS_HEADER: &str = "--- FILE CONTENTS ---";

/// Concatenated file contents plus the counts that go into the summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSummary {
    /// Number of text files (empty ones included, markers excluded)
    pub file_count: usize,
    /// Sum of the sizes of those files in bytes
    pub text_size: u64,
    /// All file blocks, end-trimmed
    pub content: String,
}

/// Statistics reported alongside the digest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestStats {
    pub files_analyzed: usize,
    pub text_size: u64,
    /// Estimated token count of the tree and file contents
    pub tokens: usize,
    /// Encoding the estimate was computed with
    pub encoding: Encoding,
}

/// Formatted output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    /// The complete digest
    pub text: String,
    /// The summary block on its own
    pub summary: String,
    pub stats: DigestStats,
}

/// Formatter turning a tree into a digest
pub struct DigestFormatter {
    /// Repository name used in the preamble and summary
    repository: String,
    branch: Option<String>,
    tokenizer: Box<dyn Tokenizer>,
}

impl DigestFormatter {
    /// Create a formatter for the given configuration.
    ///
    /// The repository name is the basename of the configured source.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            repository: crate::source::display_name(&config.source),
            branch: config.branch.clone(),
            tokenizer: create_tokenizer(config.encoding)?,
        })
    }

    /// Format the tree into a digest
    pub fn format(&self, root: &Node) -> Result<Digest> {
        let contents = gather_contents(root);
        let structure = format!("{}\n{}\n", STRUCTURE_HEADER, render_tree(root));

        let token_input = format!("{}{}", structure, contents.content);
        let count = self.tokenizer.count_tokens(&token_input)?;

        let stats = DigestStats {
            files_analyzed: contents.file_count,
            text_size: contents.text_size,
            tokens: count.tokens,
            encoding: count.encoding,
        };
        let summary = self.summary(&stats);

        let preamble = format!(
            "The following is a digest of the repository \"{}\".\n\
             This digest is designed to be easily parsed by Large Language Models.\n",
            self.repository
        );
        let file_contents = format!("{}\n{}", CONTENTS_HEADER, contents.content);

        let text = [preamble, summary.clone(), structure, file_contents].join("\n");

        Ok(Digest {
            text,
            summary,
            stats,
        })
    }

    fn summary(&self, stats: &DigestStats) -> String {
        let mut summary = format!("{}\n", SUMMARY_HEADER);
        summary.push_str(&format!("Repository: {}\n", self.repository));
        if let Some(branch) = &self.branch {
            summary.push_str(&format!("Branch: {}\n", branch));
        }
        summary.push_str(&format!("Files Analyzed: {}\n", stats.files_analyzed));
        summary.push_str(&format!(
            "Total Text Size: {}\n",
            format_file_size(stats.text_size)
        ));
        summary.push_str(&format!(
            "Estimated Tokens (text only): ~{}\n",
            format_count(stats.tokens)
        ));
        summary
    }
}

/// Render the tree diagram, one `\n` terminated line per node
pub fn render_tree(root: &Node) -> String {
    let mut out = String::new();
    out.push_str(root.name());
    if root.is_dir() {
        out.push('/');
    }
    out.push('\n');
    render_children(root.children(), "", &mut out);
    out
}

fn render_children(children: &[Node], prefix: &str, out: &mut String) {
    for (index, child) in children.iter().enumerate() {
        let is_last = index + 1 == children.len();

        out.push_str(prefix);
        out.push_str(if is_last { "└── " } else { "├── " });
        out.push_str(child.name());
        match child {
            Node::Directory(_) => out.push('/'),
            Node::File(file) => {
                if let Some(marker) = file.content.marker() {
                    out.push(' ');
                    out.push_str(marker);
                }
            }
        }
        out.push('\n');

        if child.is_dir() {
            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            render_children(child.children(), &child_prefix, out);
        }
    }
}

/// Concatenate text file contents in tree order and count them
pub fn gather_contents(root: &Node) -> ContentSummary {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    let mut summary = ContentSummary::default();

    for file in root.files() {
        let FileContent::Text(text) = &file.content else {
            continue;
        };

        summary.file_count += 1;
        summary.text_size += file.size;

        if !text.is_empty() {
            summary.content.push_str(&format!(
                "{sep}\nFILE: {}\n{sep}\n{}\n\n",
                file.path,
                text,
                sep = separator
            ));
        }
    }

    let trimmed_len = summary.content.trim_end().len();
    summary.content.truncate(trimmed_len);
    summary
}
