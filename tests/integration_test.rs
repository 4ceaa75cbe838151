//! Integration tests for the kfs CLI
//!
//! These tests verify end-to-end functionality by creating temporary base
//! directories and running complete command workflows, both through the
//! library and through the built binary.

use kfs::{
    DEFAULT_DB_NAME, KfsError, commands,
    db::DbError,
    index::{IndexOptions, create_index},
    workspace::Workspace,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Helper function to create a test file below `base`
fn create_test_file(base: &Path, relative: &str) -> PathBuf {
    let path = base.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"content").unwrap();
    path
}

/// Run the kfs binary in `dir`, isolated from the user's config and env
fn kfs(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kfs"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("KFS_DATABASE_NAME")
        .env_remove("KFS_IGNORE")
        .env_remove("KFS_QUIET")
        .env_remove("KFS_FOLLOW_LINKS")
        .env_remove("KFS_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_tag_and_list_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().canonicalize().unwrap();
    let a = create_test_file(&base, "a.txt");
    let b = create_test_file(&base, "sub/b.txt");

    let workspace = commands::init(&base, DEFAULT_DB_NAME, true).unwrap();
    let db = workspace.open(true).unwrap();

    let report = create_index(&db, &workspace, &IndexOptions::default()).unwrap();
    assert_eq!(report.new, 2);

    commands::tag(&db, &workspace, &["bank:chase".into()], &[], &[a, b], true).unwrap();

    let tagged: Vec<String> = db
        .files_with_tag("bank:chase")
        .unwrap()
        .iter()
        .map(kfs::db::File::display_path)
        .collect();
    assert_eq!(tagged, vec!["a.txt", "sub/b.txt"]);
    assert!(db.files_with_tag("bank:citi").unwrap().is_empty());

    let report = create_index(&db, &workspace, &IndexOptions::default()).unwrap();
    assert_eq!(report.new, 0);
    assert_eq!(report.existing, 2);
}

#[test]
fn test_discovery_from_subdirectory() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().canonicalize().unwrap();
    commands::init(&base, DEFAULT_DB_NAME, true).unwrap();
    let nested = base.join("deep").join("er");
    fs::create_dir_all(&nested).unwrap();

    let workspace = Workspace::discover(&nested, DEFAULT_DB_NAME);

    assert!(workspace.is_initialized());
    assert_eq!(workspace.base_dir(), base.as_path());
}

#[test]
fn test_tag_before_index_fails() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().canonicalize().unwrap();
    let a = create_test_file(&base, "a.txt");
    let workspace = commands::init(&base, DEFAULT_DB_NAME, true).unwrap();
    let db = workspace.open(true).unwrap();

    let result = commands::tag(&db, &workspace, &["bank:chase".into()], &[], &[a], true);

    assert!(matches!(result, Err(KfsError::DbError(DbError::FileNotIndexed(_)))));
}

#[test]
fn test_cli_version() {
    let dir = tempfile::tempdir().unwrap();

    let output = kfs(dir.path(), &["version"]);

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("kfs version:"));
}

#[test]
fn test_cli_init_inside_existing_base_fails() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();

    assert!(kfs(dir.path(), &["init"]).status.success());
    assert!(dir.path().join(DEFAULT_DB_NAME).exists());

    let output = kfs(&sub, &["init"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Already initialized"));
    assert!(!sub.join(DEFAULT_DB_NAME).exists());
}

#[test]
fn test_cli_index_without_database_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = kfs(dir.path(), &["index"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("kfs init"));
    assert!(!dir.path().join(DEFAULT_DB_NAME).exists());
}

#[test]
fn test_cli_full_flow() {
    let dir = tempfile::tempdir().unwrap();
    create_test_file(dir.path(), "a.txt");
    create_test_file(dir.path(), "sub/b.txt");

    assert!(kfs(dir.path(), &["init"]).status.success());
    assert!(kfs(dir.path(), &["index"]).status.success());

    let output = kfs(dir.path(), &["tag", "--add", "bank:chase", "a.txt", "sub/b.txt"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let sub = dir.path().join("sub");
    let output = kfs(&sub, &["tag", "-a", "year:2024", "b.txt"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let output = kfs(dir.path(), &["-q", "list", "--tag", "bank:chase"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "a.txt\nsub/b.txt\n");

    let output = kfs(dir.path(), &["-q", "list", "--tag", "year:2024"]);
    assert_eq!(stdout(&output), "sub/b.txt\n");

    let output = kfs(dir.path(), &["-q", "list", "--tag", "bank:citi"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");

    let output = kfs(dir.path(), &["list", "--format", "json"]);
    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
}

#[test]
fn test_cli_tag_unindexed_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(kfs(dir.path(), &["init"]).status.success());
    create_test_file(dir.path(), "late.txt");

    let output = kfs(dir.path(), &["tag", "--add", "bank:chase", "late.txt"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("kfs index"));
}

#[test]
fn test_cli_cleanup_removes_deleted_files() {
    let dir = tempfile::tempdir().unwrap();
    create_test_file(dir.path(), "a.txt");
    let gone = create_test_file(dir.path(), "gone.txt");
    assert!(kfs(dir.path(), &["init"]).status.success());
    assert!(kfs(dir.path(), &["index"]).status.success());
    fs::remove_file(gone).unwrap();

    assert!(kfs(dir.path(), &["cleanup", "--yes"]).status.success());

    let output = kfs(dir.path(), &["-q", "list"]);
    assert_eq!(stdout(&output), "a.txt\n");
}

#[test]
fn test_cli_tags_and_status_counts() {
    let dir = tempfile::tempdir().unwrap();
    create_test_file(dir.path(), "a.txt");
    create_test_file(dir.path(), "sub/b.txt");
    assert!(kfs(dir.path(), &["init"]).status.success());
    assert!(kfs(dir.path(), &["index"]).status.success());
    let output = kfs(dir.path(), &["tag", "-a", "bank:chase", "a.txt", "sub/b.txt"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(kfs(dir.path(), &["tag", "-a", "urgent", "a.txt"]).status.success());

    let output = kfs(dir.path(), &["tags"]);
    assert!(output.status.success());
    let listing = stdout(&output);
    assert!(listing.contains("bank:chase (used by 2 file(s))"));
    assert!(listing.contains(":urgent (used by 1 file(s))"));

    let output = kfs(dir.path(), &["-q", "tags"]);
    assert_eq!(stdout(&output), ":urgent\nbank:chase\n");

    let output = kfs(dir.path(), &["-q", "status"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "2\t2\t3\n");
}

#[test]
fn test_cli_version_ignores_broken_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join(".config").join("kfs");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "database_name = [not toml").unwrap();

    let output = kfs(dir.path(), &["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("kfs version:"));

    let output = kfs(dir.path(), &["status"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Configuration error"));
}

#[test]
fn test_cli_quiet_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("kfs.toml");
    fs::write(&config, "quiet = true\n").unwrap();
    let config = config.to_str().unwrap();

    let output = kfs(dir.path(), &["--config", config, "init"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    assert!(dir.path().join(DEFAULT_DB_NAME).exists());
}
