//! Shared fixtures for integration tests

#![allow(dead_code)]

pub mod dom;
pub mod registry;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub use dom::create_vuepress_page;
pub use registry::{GatedRegistry, MockRegistry};

/// Write a config and a package.json side by side in a temporary project.
///
/// Returns the directory guard and the config path.
pub fn create_project(config: serde_json::Value, package: serde_json::Value) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();

    fs::write(
        temp_dir.path().join("package.json"),
        serde_json::to_string_pretty(&package).unwrap(),
    )
    .unwrap();

    let config_path = temp_dir.path().join("version-menu.json");
    fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    (temp_dir, config_path)
}
