/*!
 * Tests for codetxt end-to-end functionality
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use tempfile::{tempdir, TempDir};

use crate::config::Config;
use crate::error::Result;
use crate::formatter::{DigestFormatter, CONTENTS_HEADER};
use crate::ingest;
use crate::scanner::Scanner;
use crate::types::{FileContent, Node};

// Helper function to create a test directory structure
fn setup_test_directory() -> io::Result<TempDir> {
    let temp_dir = tempdir()?;

    fs::create_dir_all(temp_dir.path().join("src").join("util"))?;
    fs::create_dir_all(temp_dir.path().join("docs"))?;
    fs::create_dir_all(temp_dir.path().join("node_modules").join("pkg"))?;

    let mut readme = File::create(temp_dir.path().join("README.md"))?;
    writeln!(readme, "# Project")?;

    let mut main = File::create(temp_dir.path().join("src").join("main.rs"))?;
    writeln!(main, "fn main() {{\n    println!(\"hi\");\n}}")?;

    let mut util = File::create(temp_dir.path().join("src").join("util").join("mod.rs"))?;
    writeln!(util, "pub fn helper() {{}}")?;

    let mut guide = File::create(temp_dir.path().join("docs").join("guide.md"))?;
    writeln!(guide, "Read me first")?;

    let mut dep = File::create(temp_dir.path().join("node_modules").join("pkg").join("index.js"))?;
    writeln!(dep, "module.exports = {{}};")?;

    let mut logo = File::create(temp_dir.path().join("logo.png"))?;
    logo.write_all(b"not really a png")?;

    Ok(temp_dir)
}

fn write(dir: &Path, rel: &str, content: &[u8]) -> io::Result<()> {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

fn scan(config: &Config) -> Result<Node> {
    Scanner::new(config.clone(), Arc::new(ProgressBar::hidden()))?.scan()
}

fn paths(root: &Node) -> Vec<String> {
    root.files().iter().map(|f| f.path.clone()).collect()
}

fn assert_tree_invariants(node: &Node) {
    if let Node::Directory(dir) = node {
        assert!(!dir.children.is_empty(), "empty directory {}", dir.path);
        let sum: u64 = dir.children.iter().map(Node::size).sum();
        assert_eq!(dir.size, sum, "size mismatch for {}", dir.path);
        for pair in dir.children.windows(2) {
            assert_eq!(
                Node::display_order(&pair[0], &pair[1]),
                std::cmp::Ordering::Less,
                "{} should sort before {}",
                pair[0].name(),
                pair[1].name()
            );
        }
        dir.children.iter().for_each(assert_tree_invariants);
    }
}

#[test]
fn test_basic_ingest() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = Config::new(temp_dir.path());

    let (root, digest) = ingest(&config)?;

    assert_tree_invariants(&root);
    assert_eq!(
        paths(&root),
        vec![
            "docs/guide.md",
            "src/util/mod.rs",
            "src/main.rs",
            "README.md",
            "logo.png"
        ]
    );
    assert!(digest.text.contains("FILE: src/main.rs"));
    assert!(digest.text.contains("println!(\"hi\");"));
    assert!(digest.text.contains("└── logo.png [binary]\n"));
    assert!(!digest.text.contains("node_modules"));
    assert_eq!(digest.stats.files_analyzed, 4);

    Ok(())
}

#[test]
fn test_repeated_digests_are_identical() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = Config::new(temp_dir.path());

    let (_, first) = ingest(&config)?;
    let (_, second) = ingest(&config)?;
    assert_eq!(first.text, second.text);

    Ok(())
}

#[test]
fn test_exclude_wins_over_include() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut config = Config::new(temp_dir.path());
    config.include_patterns = vec!["*.rs".to_string()];
    config.exclude_patterns = vec!["src/util/".to_string()];

    let root = scan(&config)?;
    assert_eq!(paths(&root), vec!["src/main.rs"]);

    Ok(())
}

#[test]
fn test_include_patterns_are_optional() -> Result<()> {
    let temp_dir = setup_test_directory()?;

    let unconstrained = scan(&Config::new(temp_dir.path()))?;
    assert!(paths(&unconstrained).contains(&"docs/guide.md".to_string()));

    let mut config = Config::new(temp_dir.path());
    config.include_patterns = vec!["docs/**".to_string()];
    let root = scan(&config)?;
    assert_eq!(paths(&root), vec!["docs/guide.md"]);
    assert_tree_invariants(&root);

    Ok(())
}

#[test]
fn test_gitignore_is_respected_and_bypassable() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    fs::write(temp_dir.path().join(".gitignore"), "docs/\n*.png\n")?;

    let respected = scan(&Config::new(temp_dir.path()))?;
    let respected_paths = paths(&respected);
    assert!(!respected_paths.contains(&"docs/guide.md".to_string()));
    assert!(!respected_paths.contains(&"logo.png".to_string()));

    // Bypassing drops the built-in list as well
    let mut bypass = Config::new(temp_dir.path());
    bypass.include_gitignored = true;
    let all_paths = paths(&scan(&bypass)?);
    assert!(all_paths.contains(&"docs/guide.md".to_string()));
    assert!(all_paths.contains(&"node_modules/pkg/index.js".to_string()));
    assert!(all_paths.contains(&".gitignore".to_string()));

    // Keeping the defaults still hides node_modules
    bypass.keep_default_ignores = true;
    let kept_paths = paths(&scan(&bypass)?);
    assert!(kept_paths.contains(&"docs/guide.md".to_string()));
    assert!(!kept_paths.contains(&"node_modules/pkg/index.js".to_string()));

    Ok(())
}

#[test]
fn test_output_file_is_never_ingested() -> Result<()> {
    let temp_dir = setup_test_directory()?;
    let output = temp_dir.path().join("digest.md");
    fs::write(&output, "previous run")?;

    let mut config = Config::new(temp_dir.path());
    config.output_file = output;
    config.include_patterns = vec!["*.md".to_string()];

    let root = scan(&config)?;
    assert_eq!(paths(&root), vec!["docs/guide.md", "README.md"]);

    Ok(())
}

#[test]
fn test_null_byte_sniffing() -> Result<()> {
    let temp_dir = tempdir()?;
    let mut data = b"looks like text".to_vec();
    data.push(0);
    data.extend_from_slice(b"but is not");
    write(temp_dir.path(), "data.txt", &data)?;
    write(temp_dir.path(), "plain.txt", b"plain")?;

    let (root, digest) = ingest(&Config::new(temp_dir.path()))?;
    let files = root.files();
    assert_eq!(files[0].content, FileContent::Binary);
    assert_eq!(files[1].content, FileContent::Text("plain".to_string()));
    assert!(!digest.text.contains("looks like text"));
    assert!(digest.text.contains("├── data.txt [binary]\n"));

    Ok(())
}

#[test]
fn test_invalid_utf8_is_unreadable() -> Result<()> {
    let temp_dir = tempdir()?;
    write(temp_dir.path(), "latin1.txt", &[0x63, 0x61, 0x66, 0xe9])?;

    let (root, digest) = ingest(&Config::new(temp_dir.path()))?;
    assert_eq!(root.files()[0].content, FileContent::Unreadable);
    assert!(digest.text.contains("└── latin1.txt [unreadable]\n"));
    assert_eq!(digest.stats.files_analyzed, 0);

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_permission_denied_file_is_unreadable() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempdir()?;
    write(temp_dir.path(), "open.txt", b"visible")?;
    write(temp_dir.path(), "secret.txt", b"hidden")?;
    let secret = temp_dir.path().join("secret.txt");
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o000))?;

    // Privileged users can still read the file
    let privileged = fs::read(&secret).is_ok();
    let result = ingest(&Config::new(temp_dir.path()));
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o644))?;
    if privileged {
        return Ok(());
    }

    let (root, digest) = result?;
    let secret_node = root
        .files()
        .into_iter()
        .find(|f| f.path == "secret.txt")
        .cloned();
    assert_eq!(secret_node.map(|f| f.content), Some(FileContent::Unreadable));
    assert!(digest.text.contains("└── secret.txt [unreadable]\n"));
    assert!(digest.text.contains("FILE: open.txt\n"));
    assert!(!digest.text.contains("FILE: secret.txt"));
    assert!(!digest.text.contains("hidden"));
    assert_eq!(digest.stats.files_analyzed, 1);

    Ok(())
}

#[test]
fn test_invalid_pattern_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let mut config = Config::new(temp_dir.path());
    config.exclude_patterns = vec!["src/[".to_string()];

    let result = Scanner::new(config, Arc::new(ProgressBar::hidden()));
    assert!(matches!(result, Err(crate::CodetxtError::Pattern(_))));
}

#[test]
fn test_scenario_a_single_text_file() -> Result<()> {
    let temp_dir = tempdir()?;
    write(temp_dir.path(), "a.txt", b"hello")?;

    let mut config = Config::new(temp_dir.path());
    config.include_gitignored = true;
    let root = scan(&config)?;
    let digest = DigestFormatter::new(&config)?.format(&root)?;

    let contents = digest
        .text
        .split_once(CONTENTS_HEADER)
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    let separator = "=".repeat(60);
    assert_eq!(
        contents,
        format!("\n{sep}\nFILE: a.txt\n{sep}\nhello", sep = separator)
    );
    assert_eq!(contents.matches("FILE: ").count(), 1);
    assert!(digest.summary.contains("Files Analyzed: 1\n"));
    assert!(digest.summary.contains("Total Text Size: 5 Bytes\n"));

    Ok(())
}

#[test]
fn test_scenario_b_default_ignores() -> Result<()> {
    let temp_dir = tempdir()?;
    write(temp_dir.path(), "node_modules/pkg/index.js", b"module.exports = 1;")?;
    write(temp_dir.path(), "src/app.js", b"console.log(1);")?;

    let root = scan(&Config::new(temp_dir.path()))?;
    assert_eq!(paths(&root), vec!["src/app.js"]);
    assert_eq!(root.children().len(), 1);

    Ok(())
}

#[test]
fn test_scenario_c_binary_extension() -> Result<()> {
    let temp_dir = tempdir()?;
    write(temp_dir.path(), "img.png", b"plain text in disguise")?;
    write(temp_dir.path(), "notes.txt", b"remember")?;

    let (_, digest) = ingest(&Config::new(temp_dir.path()))?;
    assert!(digest.text.contains("img.png [binary]"));
    assert!(!digest.text.contains("plain text in disguise"));
    assert!(!digest.text.contains("FILE: img.png"));
    assert!(digest.text.contains("FILE: notes.txt"));

    Ok(())
}

#[test]
fn test_scenario_d_include_pattern() -> Result<()> {
    let temp_dir = tempdir()?;
    write(temp_dir.path(), "readme.md", b"# hi")?;
    write(temp_dir.path(), "index.js", b"let x;")?;

    let mut config = Config::new(temp_dir.path());
    config.include_patterns = vec!["**/*.md".to_string()];
    let root = scan(&config)?;
    assert_eq!(paths(&root), vec!["readme.md"]);

    Ok(())
}

#[test]
fn test_scenario_e_only_empty_directory() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::create_dir(temp_dir.path().join("empty"))?;

    let err = scan(&Config::new(temp_dir.path())).unwrap_err();
    assert!(err.is_empty_result());
    assert!(ingest(&Config::new(temp_dir.path())).is_err());

    Ok(())
}
