/*!
 * Ignore filter: built-in default patterns merged with the root `.gitignore`
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::gitignore::GitignoreBuilder;
use log::{debug, warn};

use crate::error::Result;
use crate::pattern::PatternMatcher;
use crate::utils::DEFAULT_IGNORE;

/// Which rule sources feed the ignore filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreRules {
    /// Use the built-in default ignore list
    pub defaults: bool,
    /// Use the `.gitignore` at the scan root
    pub gitignore: bool,
}

impl IgnoreRules {
    /// Built-in defaults plus the root `.gitignore`
    pub fn all() -> Self {
        Self {
            defaults: true,
            gitignore: true,
        }
    }

    /// No rules at all: the filter matches nothing
    pub fn none() -> Self {
        Self {
            defaults: false,
            gitignore: false,
        }
    }
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::all()
    }
}

/// Gitignore-style predicate over paths relative to the scan root
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    matcher: PatternMatcher,
}

impl IgnoreFilter {
    /// Build the filter for a scan root.
    ///
    /// Only the `.gitignore` directly under `root` is consulted. A missing
    /// file falls back to the defaults; unreadable files and invalid lines
    /// are skipped with a warning.
    pub fn new(root: &Path, rules: IgnoreRules) -> Result<Self> {
        if !rules.defaults && !rules.gitignore {
            return Ok(Self::disabled());
        }

        let mut builder = GitignoreBuilder::new(root);

        if rules.defaults {
            for pattern in DEFAULT_IGNORE {
                builder.add_line(None, pattern)?;
            }
        }

        if rules.gitignore {
            let gitignore_path = root.join(".gitignore");
            if let Some(content) = read_gitignore(&gitignore_path) {
                add_gitignore_lines(&mut builder, &gitignore_path, &content);
            }
        }

        Ok(Self {
            matcher: PatternMatcher::from_gitignore(builder.build()?),
        })
    }

    /// A filter that ignores nothing
    pub fn disabled() -> Self {
        Self {
            matcher: PatternMatcher::empty(),
        }
    }

    /// Whether the relative path is ignored
    pub fn is_ignored(&self, rel_path: &str, is_dir: bool) -> bool {
        self.matcher.is_match(rel_path, is_dir)
    }

    /// Number of active rules
    pub fn rule_count(&self) -> usize {
        self.matcher.len()
    }
}

fn read_gitignore(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No .gitignore at {}, using built-in rules only", path.display());
            None
        }
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

fn add_gitignore_lines(builder: &mut GitignoreBuilder, path: &Path, content: &str) {
    let from = PathBuf::from(path);
    for line in content.lines() {
        if let Err(e) = builder.add_line(Some(from.clone()), line) {
            warn!("Skipping invalid pattern in {}: {}", path.display(), e);
        }
    }
}
