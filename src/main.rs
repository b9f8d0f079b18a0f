/*!
 * Command-line interface for codetxt
 */

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use rayon::ThreadPoolBuilder;

use codetxt::config::{Args, Config};
use codetxt::error::Result;
use codetxt::formatter::DigestFormatter;
use codetxt::git::{clone_repository, CloneOptions, ClonedRepository, GitProgress};
use codetxt::report::{ReportFormat, Reporter, RunReport};
use codetxt::scanner::Scanner;
use codetxt::source::Source;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();

    if let Some(shell) = args.generate {
        generate(shell, &mut Args::command(), "codetxt", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let source_arg = args.source.as_deref().unwrap_or(".");
    let source = Source::parse(source_arg)?;
    debug!("Source: {}", source);

    // Dropping the clone removes its temporary directory
    let _cloned: Option<ClonedRepository>;
    let target_dir = match &source {
        Source::Local(path) => {
            _cloned = None;
            path.clone()
        }
        Source::Remote(url) => {
            let repo = clone_remote(url, args)?;
            let path = repo.path().to_path_buf();
            _cloned = Some(repo);
            path
        }
    };

    let config = Config::from_args(args, &source.to_string(), target_dir);
    config.validate()?;

    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()
    {
        warn!("Failed to set thread pool size: {}", e);
    }

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template(
                "{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos} files  \
                 Elapsed: {elapsed_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("Scanning");
    progress.set_message(source.display_name());

    let start_time = Instant::now();

    let scanner = Scanner::new(config.clone(), Arc::new(progress.clone()))?;
    let root = scanner.scan()?;

    progress.set_prefix("Formatting");
    let digest = DigestFormatter::new(&config)?.format(&root)?;
    let duration = start_time.elapsed();
    progress.finish_and_clear();

    if config.writes_to_stdout() {
        let mut stdout = io::stdout().lock();
        stdout.write_all(digest.text.as_bytes())?;
        stdout.flush()?;
    } else {
        if !args.force && config.output_file.exists() && !confirm_overwrite(&config.output_file)? {
            eprintln!("Aborted: {} was not overwritten.", config.output_file.display());
            return Ok(());
        }
        fs::write(&config.output_file, &digest.text)?;
        eprintln!("\n{}", digest.summary.trim_end());
    }

    let report = RunReport {
        output_file: config.output_file.display().to_string(),
        duration,
        scan: scanner.get_statistics(),
        digest: digest.stats,
    };
    Reporter::new(ReportFormat::ConsoleTable).print_report(&report);

    Ok(())
}

/// Shallow clone a remote source with a progress spinner on stderr
fn clone_remote(url: &str, args: &Args) -> Result<ClonedRepository> {
    let progress = ProgressBar::new_spinner();
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("Cloning");
    progress.set_message(url.to_string());

    let reporter = |p: &GitProgress| {
        progress.set_message(format!(
            "{} {}% ({})",
            url,
            p.percentage(),
            p.formatted_bytes()
        ));
    };

    let options = CloneOptions {
        branch: args.branch.as_deref(),
        token: args.token.as_deref(),
    };
    let cloned = clone_repository(url, options, Some(&reporter));
    progress.finish_and_clear();

    Ok(cloned?)
}

/// Ask on stdin whether an existing output file may be replaced
fn confirm_overwrite(path: &Path) -> io::Result<bool> {
    eprint!(
        "Output file {} already exists. Overwrite? [y/N] ",
        path.display()
    );
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
