/*!
 * Glob pattern matching with gitignore semantics
 *
 * Include/exclude patterns and the ignore filter share one rule language,
 * compiled with the `ignore` crate's gitignore matcher.
 */

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;

use crate::error::Result;

/// A compiled list of gitignore-style patterns
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    inner: Gitignore,
}

impl PatternMatcher {
    /// Compile patterns into a matcher.
    ///
    /// Returns `Ok(None)` for an empty list: the matcher is "not configured",
    /// which callers must treat as no constraint at all.
    pub fn new<I, S>(root: &Path, patterns: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new(root);
        let mut count = 0;
        for pattern in patterns {
            builder.add_line(None, pattern.as_ref())?;
            count += 1;
        }

        if count == 0 {
            return Ok(None);
        }

        Ok(Some(Self {
            inner: builder.build()?,
        }))
    }

    /// Wrap an already built gitignore matcher
    pub(crate) fn from_gitignore(inner: Gitignore) -> Self {
        Self { inner }
    }

    /// A matcher that never matches
    pub fn empty() -> Self {
        Self {
            inner: Gitignore::empty(),
        }
    }

    /// Check a `/` separated path relative to the root.
    ///
    /// The path matches when it, or any of its parent directories, is
    /// matched by the last applicable rule. Negated (`!`) rules re-include.
    pub fn is_match(&self, rel_path: &str, is_dir: bool) -> bool {
        if rel_path.is_empty() || self.inner.is_empty() {
            return false;
        }

        matches!(
            self.inner.matched_path_or_any_parents(rel_path, is_dir),
            Match::Ignore(_)
        )
    }

    /// Number of compiled rules
    pub fn len(&self) -> usize {
        self.inner.num_ignores() as usize + self.inner.num_whitelists() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
