use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;

use crate::{
    foundation::error::{StoreError, StoreResult},
    publish::track::{ReleaseStatus, Track},
};

pub const DEFAULT_PACKAGE_NAME: &str = "com.lokosoft.mealplanner";
pub const DEFAULT_BUNDLE_PATH: &str = "app/build/outputs/bundle/release/app-release.aab";
pub const DEFAULT_CREDENTIALS_PATH: &str = "play-console-credentials.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    pub package_name: String,
    pub bundle_path: PathBuf,
    pub credentials_path: PathBuf,
    pub project_dir: PathBuf,
    pub track: Track,
    pub release_status: ReleaseStatus,
    /// Share of users for a staged rollout, in (0, 1).
    pub user_fraction: Option<f64>,
    pub skip_build: bool,
    pub timeout_secs: u64,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            bundle_path: PathBuf::from(DEFAULT_BUNDLE_PATH),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            project_dir: PathBuf::from("."),
            track: Track::default(),
            release_status: ReleaseStatus::default(),
            user_fraction: None,
            skip_build: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl PublishConfig {
    /// Loads a JSON config; missing fields keep their defaults.
    pub fn from_path(path: &Path) -> StoreResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open publish config '{}'", path.display()))?;
        let cfg: PublishConfig = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| StoreError::config(format!("parse '{}': {e}", path.display())))?;
        Ok(cfg)
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.package_name.trim().is_empty() {
            return Err(StoreError::config("package name must not be empty"));
        }
        if !is_package_name(&self.package_name) {
            return Err(StoreError::config(format!(
                "'{}' is not a valid application id",
                self.package_name
            )));
        }
        if self.timeout_secs == 0 {
            return Err(StoreError::config("timeout must be > 0 seconds"));
        }
        match (self.release_status.is_staged_rollout(), self.user_fraction) {
            (true, None) => {
                return Err(StoreError::config(format!(
                    "release status '{}' requires a user fraction",
                    self.release_status
                )));
            }
            (false, Some(_)) => {
                return Err(StoreError::config(format!(
                    "user fraction only applies to inProgress or halted releases, not '{}'",
                    self.release_status
                )));
            }
            (_, Some(f)) if !(f > 0.0 && f < 1.0) => {
                return Err(StoreError::config(format!(
                    "user fraction must be between 0 and 1 (exclusive), got {f}"
                )));
            }
            _ => {}
        }
        Ok(())
    }

    /// Bundle path as seen from the current directory.
    pub fn resolved_bundle_path(&self) -> PathBuf {
        if self.bundle_path.is_absolute() {
            self.bundle_path.clone()
        } else {
            self.project_dir.join(&self.bundle_path)
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Android application ids: at least two dot-separated segments, each starting with a
// letter and containing only [A-Za-z0-9_].
fn is_package_name(name: &str) -> bool {
    let mut segments = 0;
    for seg in name.split('.') {
        let mut chars = seg.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return false,
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return false;
        }
        segments += 1;
    }
    segments >= 2
}
