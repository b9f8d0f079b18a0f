/*!
 * Configuration handling for codetxt
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::gitignore::IgnoreRules;
use crate::tokenizer::Encoding;
use crate::{bail, ensure};

/// Default maximum file size: 10 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default output file name
pub const DEFAULT_OUTPUT_FILE: &str = "code.txt";

/// Command-line arguments for codetxt
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codetxt",
    version = env!("CARGO_PKG_VERSION"),
    about = "Turn any Git repository into a prompt-friendly text ingest for LLMs.",
    long_about = "Walks a local directory or a shallow clone of a remote repository and writes a single text digest: a summary, the directory tree and the contents of every text file."
)]
pub struct Args {
    /// Repository URL or local directory path (e.g. ".")
    #[clap(required_unless_present = "generate")]
    pub source: Option<String>,

    /// Output file path. Use '-' for stdout
    #[clap(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: String,

    /// Maximum file size to process in bytes
    #[clap(
        short = 's',
        long,
        default_value_t = DEFAULT_MAX_FILE_SIZE,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub max_size: u64,

    /// Branch to clone and ingest
    #[clap(short, long)]
    pub branch: Option<String>,

    /// Gitignore-style patterns to include; when set, only matching files are kept
    #[clap(long, num_args = 1..)]
    pub include_pattern: Vec<String>,

    /// Gitignore-style patterns to exclude
    #[clap(long, num_args = 1..)]
    pub exclude_pattern: Vec<String>,

    /// Include files and directories matched by .gitignore and the built-in ignore list
    #[clap(long)]
    pub include_gitignored: bool,

    /// With --include-gitignored, still apply the built-in ignore list
    #[clap(long, requires = "include_gitignored")]
    pub keep_default_ignores: bool,

    /// Personal access token passed to the clone step
    #[clap(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Overwrite an existing output file without asking
    #[clap(short, long)]
    pub force: bool,

    /// Encoding used for the token estimate
    #[clap(long, value_enum, default_value_t = Encoding::default())]
    pub encoding: Encoding,

    /// Number of threads to use for scanning
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Ingestion configuration consumed by the scanner and formatter
#[derive(Clone, Debug)]
pub struct Config {
    /// Local directory to scan (already cloned for remote sources)
    pub target_dir: PathBuf,

    /// Intended output destination, never ingested itself
    pub output_file: PathBuf,

    /// Files larger than this many bytes are skipped
    pub max_file_size: u64,

    /// Patterns to include (if empty, include all)
    pub include_patterns: Vec<String>,

    /// Patterns to exclude
    pub exclude_patterns: Vec<String>,

    /// Bypass `.gitignore` filtering
    pub include_gitignored: bool,

    /// Keep the built-in ignore list even when bypassing `.gitignore`
    pub keep_default_ignores: bool,

    /// Original source argument (URL or path), used to name the root
    pub source: String,

    /// Branch name, shown in the summary only
    pub branch: Option<String>,

    /// Encoding for the token estimate
    pub encoding: Encoding,

    /// Number of threads to use for scanning
    pub num_threads: usize,
}

impl Config {
    /// Library defaults for scanning `target_dir`
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        let target_dir = target_dir.into();
        Self {
            source: target_dir.to_string_lossy().to_string(),
            output_file: target_dir.join(DEFAULT_OUTPUT_FILE),
            target_dir,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            include_gitignored: false,
            keep_default_ignores: false,
            branch: None,
            encoding: Encoding::default(),
            num_threads: 4,
        }
    }

    /// Create configuration from command-line arguments.
    ///
    /// `target_dir` is the local directory to scan, which differs from the
    /// source argument when the source was cloned.
    pub fn from_args(args: &Args, source: &str, target_dir: PathBuf) -> Self {
        Self {
            target_dir,
            output_file: PathBuf::from(&args.output),
            max_file_size: args.max_size,
            include_patterns: args.include_pattern.clone(),
            exclude_patterns: args.exclude_pattern.clone(),
            include_gitignored: args.include_gitignored,
            keep_default_ignores: args.keep_default_ignores,
            source: source.to_string(),
            branch: args.branch.clone(),
            encoding: args.encoding,
            num_threads: args.threads,
        }
    }

    /// Rule sources for the ignore filter
    pub fn ignore_rules(&self) -> IgnoreRules {
        if self.include_gitignored {
            IgnoreRules {
                defaults: self.keep_default_ignores,
                gitignore: false,
            }
        } else {
            IgnoreRules::all()
        }
    }

    /// Whether output goes to stdout instead of a file
    pub fn writes_to_stdout(&self) -> bool {
        self.output_file.as_os_str() == "-"
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.exists() {
            bail!(PathNotFound, "{}", self.target_dir.display());
        }
        ensure!(
            self.target_dir.is_dir(),
            Config,
            "Target is not a directory: {}",
            self.target_dir.display()
        );
        ensure!(
            self.max_file_size > 0,
            Config,
            "Maximum file size must be a positive number of bytes"
        );

        // Check if output file directory exists
        if !self.writes_to_stdout() {
            if let Some(parent) = self.output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    bail!(
                        Config,
                        "Output directory not found: {}",
                        parent.display()
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["codetxt", "."]).unwrap();
        assert_eq!(args.source.as_deref(), Some("."));
        assert_eq!(args.output, "code.txt");
        assert_eq!(args.max_size, 10_485_760);
        assert_eq!(args.encoding, Encoding::Cl100kBase);
        assert!(!args.include_gitignored);
        assert!(args.include_pattern.is_empty());
    }

    #[test]
    fn test_args_reject_bad_max_size() {
        assert!(Args::try_parse_from(["codetxt", ".", "-s", "ten"]).is_err());
        assert!(Args::try_parse_from(["codetxt", ".", "--max-size", "0"]).is_err());
    }

    #[test]
    fn test_args_patterns() {
        let args = Args::try_parse_from([
            "codetxt",
            ".",
            "--include-pattern",
            "**/*.md",
            "src/",
            "--exclude-pattern",
            "*.lock",
        ])
        .unwrap();
        assert_eq!(args.include_pattern, vec!["**/*.md", "src/"]);
        assert_eq!(args.exclude_pattern, vec!["*.lock"]);
    }

    #[test]
    fn test_keep_default_ignores_requires_include_gitignored() {
        assert!(Args::try_parse_from(["codetxt", ".", "--keep-default-ignores"]).is_err());
    }

    #[test]
    fn test_ignore_rules() {
        let mut config = Config::new("/tmp");
        assert_eq!(config.ignore_rules(), IgnoreRules::all());

        config.include_gitignored = true;
        assert_eq!(config.ignore_rules(), IgnoreRules::none());

        config.keep_default_ignores = true;
        assert_eq!(
            config.ignore_rules(),
            IgnoreRules {
                defaults: true,
                gitignore: false
            }
        );
    }

    #[test]
    fn test_validate() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path());
        assert!(config.validate().is_ok());

        let missing = Config::new(dir.path().join("missing"));
        assert!(missing.validate().is_err());

        let mut bad_output = Config::new(dir.path());
        bad_output.output_file = dir.path().join("nope").join("out.txt");
        assert!(bad_output.validate().is_err());

        let mut stdout = Config::new(dir.path());
        stdout.output_file = PathBuf::from("-");
        assert!(stdout.writes_to_stdout());
        assert!(stdout.validate().is_ok());
    }
}
