/*!
 * Directory and file scanning functionality
 *
 * The scanner walks the target directory depth first, applies the filters in
 * a fixed precedence and builds the pruned, sorted node tree.
 */

use std::fmt;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

use indicatif::ProgressBar;
use log::{debug, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::binary;
use crate::config::Config;
use crate::error::{CodetxtError, Result};
use crate::gitignore::IgnoreFilter;
use crate::pattern::PatternMatcher;
use crate::source::display_name;
use crate::types::{DirectoryNode, FileContent, FileNode, Node};

/// Why an entry is absent from the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// The entry is the configured output destination
    OutputFile,
    /// Matched by the built-in list or `.gitignore`
    Ignored,
    /// Matched by an exclude pattern
    ExcludePattern,
    /// A file that matches no include pattern
    NotIncluded,
    /// A file larger than the configured maximum
    Oversized,
    /// A directory with nothing left after filtering
    EmptyDirectory,
    /// Symlinked directories, broken links and special files
    Unsupported,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Exclusion::OutputFile => "output file",
            Exclusion::Ignored => "ignore rules",
            Exclusion::ExcludePattern => "exclude pattern",
            Exclusion::NotIncluded => "no include pattern matched",
            Exclusion::Oversized => "larger than maximum size",
            Exclusion::EmptyDirectory => "empty after filtering",
            Exclusion::Unsupported => "unsupported entry type",
        };
        f.write_str(reason)
    }
}

/// Outcome of visiting one filesystem entry
#[derive(Debug)]
pub enum Visit {
    /// The entry survived filtering
    Included(Node),
    /// The entry is absent from the tree
    Excluded(Exclusion),
}

/// Scanner statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Files with decoded text content (including empty files)
    pub text_files: usize,
    /// Files marked as binary
    pub binary_files: usize,
    /// Files marked as unreadable
    pub unreadable_files: usize,
    /// Files skipped for exceeding the size limit
    pub oversized_files: usize,
    /// Entries removed by the output-file check, ignore rules or patterns
    pub excluded_entries: usize,
    /// Directories pruned because nothing inside survived
    pub pruned_directories: usize,
    /// Symlinked directories, broken links and special files skipped
    pub unsupported_entries: usize,
}

impl ScanStatistics {
    fn record(&mut self, visit: &Visit) {
        match visit {
            Visit::Included(Node::File(file)) => match file.content {
                FileContent::Text(_) => self.text_files += 1,
                FileContent::Binary => self.binary_files += 1,
                FileContent::Unreadable => self.unreadable_files += 1,
            },
            Visit::Included(Node::Directory(_)) => {}
            Visit::Excluded(Exclusion::Oversized) => self.oversized_files += 1,
            Visit::Excluded(Exclusion::EmptyDirectory) => self.pruned_directories += 1,
            Visit::Excluded(Exclusion::Unsupported) => self.unsupported_entries += 1,
            Visit::Excluded(_) => self.excluded_entries += 1,
        }
    }
}

/// Entry type after following file symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryType {
    File,
    Directory,
    Unsupported,
}

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Canonical scan root
    root: PathBuf,
    /// Absolute output destination
    output_path: PathBuf,
    ignore_filter: IgnoreFilter,
    include_matcher: Option<PatternMatcher>,
    exclude_matcher: Option<PatternMatcher>,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
    /// Scanner statistics
    statistics: Mutex<ScanStatistics>,
}

impl Scanner {
    /// Create a new scanner, compiling all filters up front
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Result<Self> {
        let root = fs::canonicalize(&config.target_dir)?;
        let output_path = resolve_output_path(&config.output_file)?;

        let ignore_filter = IgnoreFilter::new(&root, config.ignore_rules())?;
        let include_matcher = PatternMatcher::new(&root, &config.include_patterns)?;
        let exclude_matcher = PatternMatcher::new(&root, &config.exclude_patterns)?;

        debug!(
            "Scanner ready: root={}, output={}, ignore rules={}, include={}, exclude={}",
            root.display(),
            output_path.display(),
            ignore_filter.rule_count(),
            include_matcher.as_ref().map_or(0, PatternMatcher::len),
            exclude_matcher.as_ref().map_or(0, PatternMatcher::len),
        );

        Ok(Self {
            config,
            root,
            output_path,
            ignore_filter,
            include_matcher,
            exclude_matcher,
            progress,
            statistics: Mutex::new(ScanStatistics::default()),
        })
    }

    /// Get scanner statistics
    pub fn get_statistics(&self) -> ScanStatistics {
        self.statistics
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    /// Scan the target directory and return the filtered tree.
    ///
    /// Fails with `EmptyResult` when nothing survives filtering, and with a
    /// walk or IO error when a directory cannot be listed or stat'ed.
    pub fn scan(&self) -> Result<Node> {
        match self.visit(&self.root)? {
            Visit::Included(mut node) => {
                node.set_name(display_name(&self.config.source));
                Ok(node)
            }
            Visit::Excluded(reason) => {
                debug!("Root excluded: {}", reason);
                Err(CodetxtError::EmptyResult(self.config.target_dir.clone()))
            }
        }
    }

    /// Visit one entry and everything below it
    fn visit(&self, abs_path: &Path) -> Result<Visit> {
        let visit = self.visit_entry(abs_path)?;
        if let Visit::Excluded(reason) = &visit {
            debug!("Excluded {} ({})", abs_path.display(), reason);
        }
        if let Ok(mut stats) = self.statistics.lock() {
            stats.record(&visit);
        }
        Ok(visit)
    }

    fn visit_entry(&self, abs_path: &Path) -> Result<Visit> {
        if abs_path == self.output_path {
            return Ok(Visit::Excluded(Exclusion::OutputFile));
        }

        let rel_path = relative_path(&self.root, abs_path);
        let metadata = fs::symlink_metadata(abs_path)?;
        let (entry_type, metadata) = match resolve_entry(abs_path, metadata) {
            Some(resolved) => resolved,
            None => return Ok(Visit::Excluded(Exclusion::Unsupported)),
        };

        if !rel_path.is_empty() {
            if let Some(reason) = self.filter(&rel_path, entry_type) {
                return Ok(Visit::Excluded(reason));
            }
        }

        let name = abs_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        match entry_type {
            EntryType::Directory => self.scan_directory(abs_path, name, rel_path),
            EntryType::File => Ok(self.process_file(abs_path, name, rel_path, metadata.len())),
            EntryType::Unsupported => Ok(Visit::Excluded(Exclusion::Unsupported)),
        }
    }

    /// Filter precedence, first match wins
    fn filter(&self, rel_path: &str, entry_type: EntryType) -> Option<Exclusion> {
        let is_dir = entry_type == EntryType::Directory;

        if self.ignore_filter.is_ignored(rel_path, is_dir) {
            return Some(Exclusion::Ignored);
        }

        if let Some(exclude) = &self.exclude_matcher {
            if exclude.is_match(rel_path, is_dir) {
                return Some(Exclusion::ExcludePattern);
            }
        }

        // Directories are always traversed so matching descendants can be found
        if let Some(include) = &self.include_matcher {
            if !is_dir && !include.is_match(rel_path, false) {
                return Some(Exclusion::NotIncluded);
            }
        }

        None
    }

    /// List a directory, visit its children in parallel and prune if empty
    fn scan_directory(&self, abs_path: &Path, name: String, rel_path: String) -> Result<Visit> {
        let entries = WalkDir::new(abs_path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .map(|entry| {
                entry
                    .map(walkdir::DirEntry::into_path)
                    .map_err(|source| CodetxtError::Walk {
                        path: abs_path.to_path_buf(),
                        source,
                    })
            })
            .collect::<Result<Vec<PathBuf>>>()?;

        let visits = entries
            .par_iter()
            .map(|child| self.visit(child))
            .collect::<Result<Vec<Visit>>>()?;

        let children: Vec<Node> = visits
            .into_iter()
            .filter_map(|visit| match visit {
                Visit::Included(node) => Some(node),
                Visit::Excluded(_) => None,
            })
            .collect();

        if children.is_empty() {
            return Ok(Visit::Excluded(Exclusion::EmptyDirectory));
        }

        Ok(Visit::Included(Node::Directory(DirectoryNode::new(
            name, rel_path, children,
        ))))
    }

    /// Size-check and classify a single file
    fn process_file(&self, abs_path: &Path, name: String, rel_path: String, size: u64) -> Visit {
        if size > self.config.max_file_size {
            warn!("Skipping large file: {} ({} bytes)", rel_path, size);
            return Visit::Excluded(Exclusion::Oversized);
        }

        self.progress.inc(1);
        self.progress.set_message(format!("Current file: {}", truncate_name(&name)));

        let content = if size == 0 {
            FileContent::Text(String::new())
        } else {
            binary::classify(abs_path)
        };

        Visit::Included(Node::File(FileNode {
            name,
            path: rel_path,
            size,
            content,
        }))
    }
}

/// Determine the entry type, following symlinks that point at files
fn resolve_entry(abs_path: &Path, metadata: Metadata) -> Option<(EntryType, Metadata)> {
    let file_type = metadata.file_type();
    if file_type.is_dir() {
        return Some((EntryType::Directory, metadata));
    }
    if file_type.is_file() {
        return Some((EntryType::File, metadata));
    }
    if !file_type.is_symlink() {
        return Some((EntryType::Unsupported, metadata));
    }

    match fs::metadata(abs_path) {
        Ok(target) if target.is_file() => Some((EntryType::File, target)),
        Ok(_) => {
            debug!("Not following directory symlink {}", abs_path.display());
            None
        }
        Err(e) => {
            warn!("Skipping broken symlink {}: {}", abs_path.display(), e);
            None
        }
    }
}

/// Path of `abs_path` relative to `root`, `/` separated; empty for the root
pub fn relative_path(root: &Path, abs_path: &Path) -> String {
    abs_path
        .strip_prefix(root)
        .unwrap_or(abs_path)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve the output destination to an absolute, canonical path when possible
fn resolve_output_path(output: &Path) -> io::Result<PathBuf> {
    let absolute = if output.is_absolute() {
        output.to_path_buf()
    } else {
        std::env::current_dir()?.join(output)
    };

    if let Ok(canonical) = fs::canonicalize(&absolute) {
        return Ok(canonical);
    }

    // The file may not exist yet; canonicalize its parent instead
    if let (Some(parent), Some(file_name)) = (absolute.parent(), absolute.file_name()) {
        if let Ok(parent) = fs::canonicalize(parent) {
            return Ok(parent.join(file_name));
        }
    }
    Ok(absolute)
}

/// Truncate long names for the progress message
fn truncate_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() > 40 {
        let tail: String = chars[chars.len() - 37..].iter().collect();
        format!("...{}", tail)
    } else {
        name.to_string()
    }
}
