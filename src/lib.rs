//! Release helpers for shipping a mobile app to the store.
//!
//! - **Canvas fitting**: scale any raster image to cover a fixed canvas (512x512 for store
//!   icons), keep its aspect ratio, center it on a transparent background and crop whatever
//!   overflows. See [`fit`].
//! - **Play publishing**: build an Android App Bundle with the Gradle wrapper and push it to a
//!   Google Play release track through the Android Publisher API. See [`run_publish`].
//!
//! Neither path retries: every failure is surfaced as a [`StoreError`].
#![forbid(unsafe_code)]

mod canvas;
mod foundation;
mod publish;

pub use canvas::composite::{over, paste_over, premultiply_in_place, unpremultiply_in_place};
pub use canvas::fit::{CanvasResult, fit};
pub use canvas::output::ensure_parent_dir;
pub use canvas::plan::{FitPlan, ICON_SIZE, MAX_SCALED_PIXELS, TargetSpec};
pub use canvas::source::SourceImage;
pub use foundation::error::{StoreError, StoreResult};
pub use publish::api::{
    API_BASE, AppEdit, EditsApi, HttpEditsApi, TrackRelease, TrackUpdate, UPLOAD_BASE,
    UploadedBundle, build_client, read_bundle,
};
pub use publish::auth::{
    ACCESS_TOKEN_ENV, ANDROID_PUBLISHER_SCOPE, AccessToken, DEFAULT_TOKEN_URI, ServiceAccountKey,
    exchange_service_account_token, obtain_access_token,
};
pub use publish::config::{
    DEFAULT_BUNDLE_PATH, DEFAULT_CREDENTIALS_PATH, DEFAULT_PACKAGE_NAME, DEFAULT_TIMEOUT_SECS,
    PublishConfig,
};
pub use publish::gradle::{BUNDLE_RELEASE_ARGS, build_release_bundle, gradle_wrapper};
pub use publish::publisher::{PublishReport, publish_bundle, run_publish, sha256_hex};
pub use publish::track::{ReleaseStatus, Track};
