/*!
 * Source argument handling: local directory or remote repository URL
 */

use std::fmt;
use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::error::Result;

/// Where the digest content comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Local directory, resolved to an absolute path
    Local(PathBuf),
    /// Remote repository URL, cloned before scanning
    Remote(String),
}

impl Source {
    /// Classify a source argument.
    ///
    /// Anything starting with `http://` or `https://` is remote; everything
    /// else is a local path resolved against the current directory, with
    /// `.` and `..` components removed.
    pub fn parse(arg: &str) -> Result<Self> {
        if is_remote(arg) {
            return Ok(Source::Remote(arg.to_string()));
        }

        let path = Path::new(arg);
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(Source::Local(normalize(&absolute)))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Source::Remote(_))
    }

    /// Name shown for the repository: the last path segment of the source
    pub fn display_name(&self) -> String {
        display_name(&self.to_string())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Local(path) => write!(f, "{}", path.display()),
            Source::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Lexically resolve `.` and `..` in an absolute path
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Whether a source argument names a remote repository
pub fn is_remote(arg: &str) -> bool {
    arg.starts_with("http://") || arg.starts_with("https://")
}

/// Basename of a source identifier (URL or path).
///
/// Trailing separators are ignored; `.`/`..` components are resolved
/// lexically. Falls back to the raw identifier when no segment exists.
pub fn display_name(source: &str) -> String {
    if is_remote(source) {
        if let Ok(url) = Url::parse(source) {
            let last = url
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .map(str::to_string);
            if let Some(name) = last {
                return name;
            }
            if let Some(host) = url.host_str() {
                return host.to_string();
            }
        }
        return source.to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    for component in Path::new(source).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().to_string()),
            Component::ParentDir => {
                parts.pop();
            }
            _ => {}
        }
    }
    parts.pop().unwrap_or_else(|| source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote_and_local() {
        let remote = Source::parse("https://github.com/user/repo").unwrap();
        assert!(remote.is_remote());
        assert_eq!(remote.to_string(), "https://github.com/user/repo");

        let local = Source::parse("some/dir").unwrap();
        match &local {
            Source::Local(path) => {
                assert!(path.is_absolute());
                assert!(path.ends_with("some/dir"));
            }
            Source::Remote(_) => panic!("expected local source"),
        }
        assert!(!Source::parse("git@github.com:user/repo.git").unwrap().is_remote());
    }

    #[test]
    fn test_parse_resolves_relative_components() {
        let cwd = std::env::current_dir().unwrap();
        let expected_name = cwd.file_name().unwrap().to_string_lossy().to_string();

        for arg in [".", "./", "sub/..", "./sub/../."] {
            let source = Source::parse(arg).unwrap();
            assert_eq!(source, Source::Local(cwd.clone()), "argument {:?}", arg);
            assert_eq!(source.display_name(), expected_name);
        }

        let nested = Source::parse("a/./b/../c").unwrap();
        assert_eq!(nested, Source::Local(cwd.join("a").join("c")));
        assert_eq!(nested.display_name(), "c");
    }

    #[test]
    fn test_remote_display_name() {
        let source = Source::parse("https://github.com/user/my-repo").unwrap();
        assert_eq!(source.display_name(), "my-repo");
    }

    #[test]
    fn test_display_name_for_urls() {
        assert_eq!(display_name("https://github.com/user/repo"), "repo");
        assert_eq!(display_name("https://github.com/user/repo/"), "repo");
        assert_eq!(display_name("https://github.com/user/repo.git"), "repo.git");
        assert_eq!(display_name("https://example.com"), "example.com");
    }

    #[test]
    fn test_display_name_for_paths() {
        assert_eq!(display_name("/home/me/project"), "project");
        assert_eq!(display_name("/home/me/project/"), "project");
        assert_eq!(display_name("/home/me/project/sub/.."), "project");
        assert_eq!(display_name("/"), "/");
    }
}
