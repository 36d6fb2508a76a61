use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::foundation::error::{StoreError, StoreResult};

pub const BUNDLE_RELEASE_ARGS: [&str; 4] = ["clean", "bundleRelease", "-x", "test"];

pub fn gradle_wrapper() -> &'static str {
    if cfg!(windows) {
        "gradlew.bat"
    } else {
        "./gradlew"
    }
}

/// Runs `gradlew clean bundleRelease -x test` in `project_dir`.
///
/// Gradle output is inherited so the user sees build progress directly.
#[tracing::instrument]
pub fn build_release_bundle(project_dir: &Path) -> StoreResult<()> {
    let wrapper = wrapper_path(project_dir);
    if !wrapper.is_file() {
        return Err(StoreError::build(format!(
            "gradle wrapper not found at '{}'",
            wrapper.display()
        )));
    }

    let wrapper = std::path::absolute(&wrapper)
        .map_err(|e| StoreError::build(format!("resolve '{}': {e}", wrapper.display())))?;

    tracing::info!(wrapper = %wrapper.display(), "building release bundle");
    let status = Command::new(&wrapper)
        .args(BUNDLE_RELEASE_ARGS)
        .current_dir(project_dir)
        .status()
        .map_err(|e| StoreError::build(format!("failed to run {}: {e}", gradle_wrapper())))?;

    if !status.success() {
        return Err(StoreError::build(format!(
            "gradle exited with {status}; fix the build errors and try again"
        )));
    }
    Ok(())
}

fn wrapper_path(project_dir: &Path) -> PathBuf {
    project_dir.join(gradle_wrapper().trim_start_matches("./"))
}
