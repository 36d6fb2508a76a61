use std::{path::Path, time::Duration};

use anyhow::Context as _;
use reqwest::{blocking::Client, header::CONTENT_TYPE};

use crate::{
    foundation::error::{StoreError, StoreResult},
    publish::{
        auth::AccessToken,
        track::{ReleaseStatus, Track},
    },
};

pub const API_BASE: &str = "https://androidpublisher.googleapis.com/androidpublisher/v3";
pub const UPLOAD_BASE: &str = "https://androidpublisher.googleapis.com/upload/androidpublisher/v3";

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEdit {
    pub id: String,
    #[serde(default)]
    pub expiry_time_seconds: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedBundle {
    pub version_code: i64,
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRelease {
    pub version_codes: Vec<String>,
    pub status: ReleaseStatus,
    /// Rollout share in (0, 1); the API requires it for `inProgress` and `halted`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_fraction: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TrackUpdate {
    pub track: Track,
    pub releases: Vec<TrackRelease>,
}

impl TrackUpdate {
    pub fn single(
        track: Track,
        version_code: i64,
        status: ReleaseStatus,
        user_fraction: Option<f64>,
    ) -> Self {
        Self {
            track,
            releases: vec![TrackRelease {
                version_codes: vec![version_code.to_string()],
                status,
                user_fraction,
            }],
        }
    }
}

/// The subset of the Android Publisher `edits` resource used to ship a bundle.
pub trait EditsApi {
    fn insert_edit(&mut self, package: &str) -> StoreResult<AppEdit>;

    fn upload_bundle(
        &mut self,
        package: &str,
        edit_id: &str,
        bundle: Vec<u8>,
    ) -> StoreResult<UploadedBundle>;

    fn update_track(
        &mut self,
        package: &str,
        edit_id: &str,
        update: &TrackUpdate,
    ) -> StoreResult<()>;

    fn commit_edit(&mut self, package: &str, edit_id: &str) -> StoreResult<()>;
}

/// Blocking HTTP client for the Play Developer API.
pub struct HttpEditsApi {
    client: Client,
    token: AccessToken,
    api_base: String,
    upload_base: String,
}

/// Blocking client shared by the token exchange and the edits calls.
pub fn build_client(timeout: Duration) -> StoreResult<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

impl HttpEditsApi {
    pub fn new(token: AccessToken, timeout: Duration) -> StoreResult<Self> {
        Ok(Self::with_client(build_client(timeout)?, token))
    }

    pub fn with_client(client: Client, token: AccessToken) -> Self {
        Self {
            client,
            token,
            api_base: API_BASE.to_string(),
            upload_base: UPLOAD_BASE.to_string(),
        }
    }

    /// Points the client at another host; used for local API emulators.
    pub fn with_base_urls(
        mut self,
        api_base: impl Into<String>,
        upload_base: impl Into<String>,
    ) -> Self {
        self.api_base = api_base.into();
        self.upload_base = upload_base.into();
        self
    }

    fn edits_url(&self, package: &str) -> String {
        format!(
            "{}/applications/{package}/edits",
            self.api_base.trim_end_matches('/')
        )
    }
}

fn check_status(
    what: &str,
    response: reqwest::blocking::Response,
) -> StoreResult<reqwest::blocking::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(StoreError::api(format!("{what} failed: HTTP {status}: {}", body.trim())))
}

impl EditsApi for HttpEditsApi {
    fn insert_edit(&mut self, package: &str) -> StoreResult<AppEdit> {
        let response = self
            .client
            .post(self.edits_url(package))
            .bearer_auth(self.token.secret())
            .json(&serde_json::json!({}))
            .send()?;
        Ok(check_status("edits.insert", response)?.json()?)
    }

    fn upload_bundle(
        &mut self,
        package: &str,
        edit_id: &str,
        bundle: Vec<u8>,
    ) -> StoreResult<UploadedBundle> {
        let url = format!(
            "{}/applications/{package}/edits/{edit_id}/bundles",
            self.upload_base.trim_end_matches('/')
        );
        let response = self
            .client
            .post(url)
            .bearer_auth(self.token.secret())
            .query(&[("uploadType", "media")])
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bundle)
            .send()?;
        Ok(check_status("edits.bundles.upload", response)?.json()?)
    }

    fn update_track(
        &mut self,
        package: &str,
        edit_id: &str,
        update: &TrackUpdate,
    ) -> StoreResult<()> {
        let url = format!("{}/{edit_id}/tracks/{}", self.edits_url(package), update.track);
        let response = self
            .client
            .put(url)
            .bearer_auth(self.token.secret())
            .json(update)
            .send()?;
        check_status("edits.tracks.update", response)?;
        Ok(())
    }

    fn commit_edit(&mut self, package: &str, edit_id: &str) -> StoreResult<()> {
        let url = format!("{}/{edit_id}:commit", self.edits_url(package));
        let response = self
            .client
            .post(url)
            .bearer_auth(self.token.secret())
            .send()?;
        check_status("edits.commit", response)?;
        Ok(())
    }
}

pub fn read_bundle(path: &Path) -> StoreResult<Vec<u8>> {
    if !path.is_file() {
        return Err(StoreError::config(format!(
            "bundle not found at '{}'",
            path.display()
        )));
    }
    let bytes = std::fs::read(path).with_context(|| format!("read bundle '{}'", path.display()))?;
    Ok(bytes)
}
