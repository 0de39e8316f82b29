//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global: REPLACE (global defines the real baseline)
//! - Global → Project: UNION with negation support
//! - Any → Env vars: REPLACE (explicit user override, see config_env_test.rs)

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use reacttree::application::ApplicationError;
use reacttree::config::{project_config_path, Settings};
use reacttree::domain::MatchMode;
use reacttree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn write_global(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("reacttree.toml");
    fs::write(&path, content).expect("write global config");
    path
}

fn write_project(dir: &TempDir, content: &str) {
    fs::write(project_config_path(dir.path()), content).expect("write project config");
}

#[test]
fn given_no_config_files_when_load_then_returns_defaults() {
    let project = TempDir::new().unwrap();

    let settings = Settings::load_from(None, Some(project.path())).expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_project_config_with_extensions_when_load_then_unions_with_defaults() {
    let project = TempDir::new().unwrap();
    write_project(&project, "extensions = [\".mjs\"]\n");

    let settings = Settings::load_from(None, Some(project.path())).expect("load settings");

    assert_eq!(
        settings.extensions,
        strings(&[".js", ".jsx", ".mjs", ".ts", ".tsx"])
    );
}

#[test]
fn given_global_extensions_when_load_then_replaces_defaults() {
    let global_dir = TempDir::new().unwrap();
    let global = write_global(&global_dir, "extensions = [\".jsx\"]\nmemoize = true\n");

    let settings = Settings::load_from(Some(&global), None).expect("load settings");

    assert_eq!(settings.extensions, strings(&[".jsx"]));
    assert!(settings.memoize);
}

#[test]
fn given_global_and_project_when_load_then_project_unions_and_negates() {
    let global_dir = TempDir::new().unwrap();
    let global = write_global(
        &global_dir,
        "extensions = [\".jsx\", \".tsx\"]\nignore_elements = [\"Fragment\"]\nmax_depth = 8\n",
    );
    let project = TempDir::new().unwrap();
    write_project(
        &project,
        "extensions = [\"!.tsx\", \".vue\"]\nmatch_mode = \"word\"\nmax_depth = 3\n",
    );

    let settings = Settings::load_from(Some(&global), Some(project.path())).expect("load settings");

    assert_eq!(settings.extensions, strings(&[".jsx", ".vue"]));
    assert_eq!(settings.ignore_elements, strings(&["Fragment"]));
    assert_eq!(settings.match_mode, MatchMode::Word);
    assert_eq!(settings.max_depth, Some(3), "project scalar wins");
}

#[test]
fn given_source_root_with_tilde_when_load_then_expands_home() {
    let project = TempDir::new().unwrap();
    write_project(&project, "source_root = \"~/web/src\"\n");

    let settings = Settings::load_from(None, Some(project.path())).expect("load settings");

    let home = std::env::var("HOME").expect("HOME should be set");
    assert_eq!(settings.source_root, Some(PathBuf::from(home).join("web/src")));
}

#[test]
fn given_unknown_key_when_load_then_fails_with_config_error() {
    let project = TempDir::new().unwrap();
    write_project(&project, "extension = [\".js\"]\n");

    let result = Settings::load_from(None, Some(project.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_invalid_match_mode_when_load_then_fails_with_config_error() {
    let project = TempDir::new().unwrap();
    write_project(&project, "match_mode = \"fuzzy\"\n");

    let result = Settings::load_from(None, Some(project.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}
