//! CLI integration tests for resforge.
//!
//! These tests run the binary against temporary resource trees.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the resforge binary command, isolated from the user's global config.
fn resforge(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("resforge").unwrap();
    cmd.env("HOME", home).env_remove("RESFORGE_CONFIG");
    cmd
}

/// Create a temporary directory for test resource trees.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn strings(keys: &[&str]) -> String {
    let mut out = String::from("<resources>\n");
    for key in keys {
        out.push_str(&format!("    <string name=\"{key}\">{key}</string>\n"));
    }
    out.push_str("</resources>\n");
    out
}

/// A small valid resource tree.
fn sample_tree() -> TempDir {
    let tmp = temp_dir();
    let root = tmp.path().join("res");
    write(&root, "values/strings.xml", &strings(&["app_name", "1st", "class"]));
    write(&root, "values-fr/strings.xml", &strings(&["app_name"]));
    write(&root, "drawable/logo.xml", "<vector/>");
    write(&root, "drawable-dark/logo.xml", "<vector/>");
    write(&root, "files/data.json", "{}");
    tmp
}

// ============================================================================
// resforge check
// ============================================================================

#[test]
fn test_check_valid_tree() {
    let tmp = sample_tree();

    resforge(tmp.path())
        .args(["check", "--root", "res"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Checked 4 resources (6 variants)"));
}

#[test]
fn test_check_duplicate_variant_fails() {
    let tmp = sample_tree();
    write(
        &tmp.path().join("res"),
        "values/more.xml",
        &strings(&["app_name"]),
    );

    resforge(tmp.path())
        .args(["check", "--root", "res"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "duplicate variant for `string:app_name`",
        ))
        .stderr(predicate::str::contains("values/more.xml"))
        .stderr(predicate::str::contains("could not build the resource registry"));
}

#[test]
fn test_check_unknown_qualifier_fails() {
    let tmp = sample_tree();
    write(&tmp.path().join("res"), "drawable-rent/logo.xml", "<vector/>");

    resforge(tmp.path())
        .args(["check", "--root", "res"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("contains unknown qualifier: 'rent'."));
}

#[test]
fn test_check_lenient_accepts_unknown_qualifier() {
    let tmp = sample_tree();
    write(&tmp.path().join("res"), "drawable-rent/logo.xml", "<vector/>");

    resforge(tmp.path())
        .args(["check", "--root", "res", "--lenient"])
        .current_dir(tmp.path())
        .assert()
        .success();
}

#[test]
fn test_check_missing_default_warns() {
    let tmp = sample_tree();
    write(&tmp.path().join("res"), "values-de/extra.xml", &strings(&["only_de"]));

    resforge(tmp.path())
        .args(["check", "--root", "res"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:"))
        .stderr(predicate::str::contains("`string:only_de` has no default variant"))
        .stderr(predicate::str::contains("(qualified: de)"));

    resforge(tmp.path())
        .args(["check", "--root", "res", "--require-defaults"])
        .current_dir(tmp.path())
        .assert()
        .failure();
}

#[test]
fn test_check_project_config() {
    let tmp = sample_tree();
    write(&tmp.path().join("res"), "drawable-rent/logo.xml", "<vector/>");
    write(
        &tmp.path().join("res"),
        ".resforge/config.toml",
        "[generator]\nstrict_qualifiers = false\n",
    );

    resforge(tmp.path())
        .args(["check", "--root", "res"])
        .current_dir(tmp.path())
        .assert()
        .success();
}

#[test]
fn test_check_invalid_project_config_fails() {
    let tmp = temp_dir();
    let root = tmp.path().join("res");
    write(&root, "values-fr/strings.xml", &strings(&["only_fr"]));
    write(
        &root,
        ".resforge/config.toml",
        "[generator]\nrequire_defaults = true\nexperimental_types = [\"image\"]\n",
    );

    resforge(tmp.path())
        .args(["check", "--root", "res"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));
}

#[test]
fn test_check_invalid_values_file() {
    let tmp = sample_tree();
    write(&tmp.path().join("res"), "values/broken.xml", "invalid");

    resforge(tmp.path())
        .args(["check", "--root", "res"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "values/broken.xml is not valid. Check the file content.",
        ));
}

#[test]
fn test_check_missing_root() {
    let tmp = temp_dir();

    resforge(tmp.path())
        .args(["check", "--root", "nope"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}

// ============================================================================
// resforge generate
// ============================================================================

#[test]
fn test_generate_writes_manifest() {
    let tmp = sample_tree();

    resforge(tmp.path())
        .args(["generate", "--root", "res", "--out", "out/manifest.json"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let manifest = fs::read_to_string(tmp.path().join("out/manifest.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&manifest).unwrap();

    let ids: Vec<&str> = json["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["drawable:logo", "string:1st", "string:app_name", "string:class"]
    );

    let identifiers: Vec<&str> = json["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["identifier"].as_str().unwrap())
        .collect();
    assert_eq!(identifiers, vec!["logo", "_1st", "app_name", "class_"]);
    assert_eq!(json["shards"][0]["name"], "Drawable0");
    assert_eq!(json["shards"][1]["name"], "String0");
}

#[test]
fn test_generate_rust_identifiers() {
    let tmp = temp_dir();
    write(
        &tmp.path().join("res"),
        "values/strings.xml",
        &strings(&["type", "class"]),
    );

    resforge(tmp.path())
        .args([
            "generate",
            "--root",
            "res",
            "--out",
            "manifest.json",
            "--language",
            "rust",
        ])
        .current_dir(tmp.path())
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("manifest.json")).unwrap())
            .unwrap();
    assert_eq!(json["language"], "rust");
    assert_eq!(json["entries"][0]["identifier"], "class");
    assert_eq!(json["entries"][1]["identifier"], "type_");
}

#[test]
fn test_generate_shards() {
    let tmp = temp_dir();
    let keys: Vec<String> = (0..25).map(|i| format!("str_{i}")).collect();
    let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
    write(&tmp.path().join("res"), "values/strings.xml", &strings(&keys));

    resforge(tmp.path())
        .args([
            "generate",
            "--root",
            "res",
            "--out",
            "manifest.json",
            "--shard-capacity",
            "10",
        ])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated 25 resources in 3 shards"));
}

#[test]
fn test_generate_failure_writes_nothing() {
    let tmp = sample_tree();
    write(&tmp.path().join("res"), "image/logo.png", "");

    resforge(tmp.path())
        .args(["generate", "--root", "res", "--out", "manifest.json"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown resource type: 'image'."));

    assert!(!tmp.path().join("manifest.json").exists());
}

// ============================================================================
// resforge qualifier
// ============================================================================

#[test]
fn test_qualifier_canonical_form() {
    let tmp = temp_dir();

    resforge(tmp.path())
        .args(["qualifier", "dark-en-rUS"])
        .assert()
        .success()
        .stdout(predicate::str::contains("canonical: en-rUS-dark"))
        .stdout(predicate::str::contains("region"));
}

#[test]
fn test_qualifier_errors() {
    let tmp = temp_dir();

    resforge(tmp.path())
        .args(["qualifier", "rUS-en"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Region qualifier must be declared after language: 'en-rUS'.",
        ));

    resforge(tmp.path())
        .args(["qualifier", "en-fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "contains repetitive qualifiers: 'en' and 'fr'.",
        ));
}

// ============================================================================
// resforge completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = temp_dir();

    resforge(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("resforge"));
}
