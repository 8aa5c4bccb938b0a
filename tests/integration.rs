use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn lootbook_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("lootbook");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    // Content tree: two categories, one description document, one
    // uncategorized resource, and two invalid documents.
    let content = root.join("resources");
    fs::create_dir_all(content.join("maps")).unwrap();
    fs::create_dir_all(content.join("tools")).unwrap();
    fs::create_dir_all(content.join("drafts")).unwrap();

    fs::write(
        content.join("maps/map-genie.md"),
        "# Map Genie\n\n\
         **Website:** [mapgenie.io](https://mapgenie.example/tarkov)\n\
         **Category:** Maps > Interactive\n\n\
         ## Overview\n\n\
         Interactive maps with loot and extract markers.\n\n\
         ## Details\n\n\
         | Platform | Web |\n\
         | Audience | All players |\n\
         | Price | Free |\n",
    )
    .unwrap();
    fs::write(
        content.join("maps/_category.md"),
        "---\ndescription: \"Everything cartographic.\"\n---\n",
    )
    .unwrap();
    fs::write(
        content.join("tools/quest-log.md"),
        "# Quest Log\n\
         **Website:** [Site](https://a.example)\n\
         **Website:** [Alt](https://b.example)\n\
         **Category:** Tools > Trackers\n\n\
         Track quest progress across raids.\n",
    )
    .unwrap();
    fs::write(
        content.join("stray.md"),
        "# Stray Resource\n**Website:** [x](https://stray.example)\n",
    )
    .unwrap();
    fs::write(content.join("no-link.md"), "# Named But Linkless\ntext\n").unwrap();
    fs::write(content.join("notes.txt"), "not a markdown document").unwrap();
    fs::write(
        content.join("drafts/wip.md"),
        "# WIP\n**Website:** [x](https://wip.example)\n",
    )
    .unwrap();

    let config_content = format!(
        r#"[content]
root = "{root}/resources"
exclude_globs = ["drafts/**"]
follow_symlinks = false

[server]
bind = "127.0.0.1:7431"

[site]
base_url = "https://loot.example"
title = "Lootbook"
"#,
        root = root.display()
    );

    let config_path = config_dir.join("lootbook.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_lootbook(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = lootbook_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run lootbook binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_check_counts() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_lootbook(&config_path, &["check"]);
    assert!(success, "check failed: stdout={}, stderr={}", stdout, stderr);
    // map-genie under Maps, quest-log under Tools, stray under
    // Uncategorized; the linkless doc and the excluded draft don't count.
    assert!(stdout.contains("categories: 3"), "got: {}", stdout);
    assert!(stdout.contains("resources:  3"), "got: {}", stdout);
    assert!(stdout.contains("ok"));
}

#[test]
fn test_check_missing_root_fails() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("lootbook.toml");
    fs::write(
        &config_path,
        format!("[content]\nroot = \"{}/nope\"\n", tmp.path().display()),
    )
    .unwrap();

    let (_, stderr, success) = run_lootbook(&config_path, &["check"]);
    assert!(!success, "check should fail when the root is missing");
    assert!(
        stderr.contains("does not exist"),
        "should name the problem, got: {}",
        stderr
    );
}

#[test]
fn test_stats_breakdown() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_lootbook(&config_path, &["stats"]);
    assert!(success);
    assert!(stdout.contains("Maps"));
    assert!(stdout.contains("Tools"));
    assert!(stdout.contains("Uncategorized"));
    assert!(stdout.contains("CATEGORY"));
}

#[test]
fn test_search_finds_by_name() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_lootbook(&config_path, &["search", "genie"]);
    assert!(success);
    assert!(stdout.contains("Map Genie"), "got: {}", stdout);
    assert!(stdout.contains("Maps > Interactive"));
}

#[test]
fn test_search_finds_by_subcategory() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_lootbook(&config_path, &["search", "trackers"]);
    assert!(success);
    assert!(stdout.contains("Quest Log"), "got: {}", stdout);
}

#[test]
fn test_search_empty_query() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_lootbook(&config_path, &["search", ""]);
    assert!(success, "Empty query should not panic");
    assert!(stdout.contains("No results"));
}

#[test]
fn test_search_no_results() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_lootbook(&config_path, &["search", "xyznonexistent"]);
    assert!(success);
    assert!(stdout.contains("No results"));
}

#[test]
fn test_search_deterministic() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout1, _, _) = run_lootbook(&config_path, &["search", "e"]);
    let (stdout2, _, _) = run_lootbook(&config_path, &["search", "e"]);
    assert_eq!(
        stdout1, stdout2,
        "Search results should be deterministic across runs"
    );
}

#[test]
fn test_search_limit() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_lootbook(&config_path, &["search", "e", "--limit", "1"]);
    assert!(success);
    assert!(stdout.contains("1 result(s)"), "got: {}", stdout);
}

#[test]
fn test_get_resource() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_lootbook(&config_path, &["get", "maps", "map-genie"]);
    assert!(success);
    assert!(stdout.contains("name:        Map Genie"));
    assert!(stdout.contains("url:         https://mapgenie.example/tarkov"));
    assert!(stdout.contains("platform:    Web"));
    assert!(stdout.contains("price:       Free"));
}

#[test]
fn test_get_resource_with_multiple_links() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_lootbook(&config_path, &["get", "tools", "quest-log"]);
    assert!(success);
    assert!(stdout.contains("url:         https://a.example"));
    assert!(stdout.contains("Links (2)"));
    assert!(stdout.contains("Alt — https://b.example"));
}

#[test]
fn test_get_uncategorized_defaults() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) =
        run_lootbook(&config_path, &["get", "uncategorized", "stray-resource"]);
    assert!(success, "got: {}", stdout);
    assert!(stdout.contains("category:    Uncategorized (uncategorized)"));
    assert!(stdout.contains("subcategory: General (general)"));
}

#[test]
fn test_get_missing_resource() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_lootbook(&config_path, &["get", "maps", "nonexistent"]);
    assert!(!success, "get with missing slug should fail");
    assert!(
        stderr.contains("not found"),
        "Should report not found, got: {}",
        stderr
    );
}

#[test]
fn test_excluded_draft_not_in_catalog() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_lootbook(&config_path, &["search", "WIP"]);
    assert!(success);
    assert!(
        stdout.contains("No results"),
        "excluded draft leaked into the catalog: {}",
        stdout
    );
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("missing.toml");

    let (_, stderr, success) = run_lootbook(&config_path, &["check"]);
    assert!(!success);
    assert!(
        stderr.contains("Failed to read config file"),
        "got: {}",
        stderr
    );
}
