/*!
 * Shallow clone of a remote repository into a temporary directory
 */

use std::path::Path;

use git2::{Cred, FetchOptions, RemoteCallbacks};
use log::debug;
use tempfile::TempDir;

use super::error::{GitError, GitResult};
use super::progress::{GitProgress, ProgressReporter};

/// Prefix of the temporary clone directory
const TEMP_PREFIX: &str = "codetxt-";

/// Options for cloning
#[derive(Debug, Clone, Copy, Default)]
pub struct CloneOptions<'a> {
    /// Branch to check out instead of the remote default
    pub branch: Option<&'a str>,
    /// Token passed through as HTTPS credentials
    pub token: Option<&'a str>,
}

/// A cloned repository living in a temporary directory.
///
/// The directory is deleted when this value is dropped, on success and
/// error paths alike.
#[derive(Debug)]
pub struct ClonedRepository {
    dir: TempDir,
}

impl ClonedRepository {
    /// Path to the working tree
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Clone `url` with depth 1 into a fresh temporary directory
pub fn clone_repository<P: ProgressReporter>(
    url: &str,
    options: CloneOptions<'_>,
    progress: Option<&P>,
) -> GitResult<ClonedRepository> {
    if !crate::source::is_remote(url) {
        return Err(GitError::InvalidUrl(url.to_string()));
    }

    let dir = tempfile::Builder::new().prefix(TEMP_PREFIX).tempdir()?;
    debug!("Cloning {} into {}", url, dir.path().display());

    let mut callbacks = RemoteCallbacks::new();

    if let Some(token) = options.token {
        // libgit2 re-invokes the callback after a rejected credential
        let mut attempted = false;
        callbacks.credentials(move |_url, _username, _allowed| {
            if attempted {
                return Err(git2::Error::from_str("authentication failed with the provided token"));
            }
            attempted = true;
            Cred::userpass_plaintext("x-access-token", token)
        });
    }

    if let Some(reporter) = progress {
        callbacks.transfer_progress(|stats| {
            let progress = GitProgress {
                total_objects: stats.total_objects(),
                received_objects: stats.received_objects(),
                received_bytes: stats.received_bytes(),
            };
            reporter.report(&progress);
            true
        });
    }

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);
    fetch_options.depth(1);

    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fetch_options);
    if let Some(branch) = options.branch {
        builder.branch(branch);
    }

    builder
        .clone(url, dir.path())
        .map_err(GitError::CloneError)?;

    Ok(ClonedRepository { dir })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_local_paths() {
        let result = clone_repository::<fn(&GitProgress)>(
            "/tmp/not-a-url",
            CloneOptions::default(),
            None,
        );
        assert!(matches!(result, Err(GitError::InvalidUrl(_))));
    }
}
