use sha2::Digest as _;

use crate::{
    foundation::error::{StoreError, StoreResult},
    publish::{
        api::{EditsApi, HttpEditsApi, TrackUpdate, build_client, read_bundle},
        auth::obtain_access_token,
        config::PublishConfig,
        gradle::build_release_bundle,
        track::{ReleaseStatus, Track},
    },
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PublishReport {
    pub package_name: String,
    pub edit_id: String,
    pub version_code: i64,
    pub track: Track,
    pub status: ReleaseStatus,
}

/// Full release: optional Gradle build, authentication, then the edit sequence.
pub fn run_publish(cfg: &PublishConfig) -> StoreResult<PublishReport> {
    cfg.validate()?;

    if cfg.skip_build {
        tracing::info!("skipping gradle build");
    } else {
        build_release_bundle(&cfg.project_dir)?;
    }

    let client = build_client(cfg.timeout())?;
    let token = obtain_access_token(&client, &cfg.credentials_path)?;
    let bundle = read_bundle(&cfg.resolved_bundle_path())?;
    let mut api = HttpEditsApi::with_client(client, token);
    publish_bundle(&mut api, cfg, bundle)
}

/// insert edit -> upload bundle -> assign track -> commit. Stops at the first failure;
/// an edit that is not committed expires on the Play side.
#[tracing::instrument(skip(api, cfg, bundle), fields(package = %cfg.package_name, track = %cfg.track))]
pub fn publish_bundle(
    api: &mut dyn EditsApi,
    cfg: &PublishConfig,
    bundle: Vec<u8>,
) -> StoreResult<PublishReport> {
    let package = cfg.package_name.as_str();

    let edit = api.insert_edit(package)?;
    tracing::info!(edit_id = %edit.id, "edit created");

    let local = sha256_hex(&bundle);
    tracing::info!(bytes = bundle.len(), sha256 = %local, "uploading bundle");
    let uploaded = api.upload_bundle(package, &edit.id, bundle)?;
    if let Some(remote) = uploaded.sha256.as_deref()
        && !remote.eq_ignore_ascii_case(&local)
    {
        return Err(StoreError::api(format!(
            "uploaded bundle digest mismatch (local {local}, remote {remote})"
        )));
    }
    tracing::info!(version_code = uploaded.version_code, "bundle uploaded");

    let update = TrackUpdate::single(
        cfg.track,
        uploaded.version_code,
        cfg.release_status,
        cfg.user_fraction,
    );
    api.update_track(package, &edit.id, &update)?;
    tracing::info!(status = %cfg.release_status, "assigned to track");

    api.commit_edit(package, &edit.id)?;
    tracing::info!("changes committed");

    Ok(PublishReport {
        package_name: cfg.package_name.clone(),
        edit_id: edit.id,
        version_code: uploaded.version_code,
        track: cfg.track,
        status: cfg.release_status,
    })
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
