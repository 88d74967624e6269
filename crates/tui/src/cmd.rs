//! # Command Execution Layer
//!
//! This module turns [`Effect`]s into API calls. It is the boundary where the
//! pure state updates of the app meet side effects:
//! - listing plugins and running commands through the [`WerkstattApi`]
//! - reading files from disk for upload
//! - fetching uploads and writing them into the download directory
//!
//! Every effect runs as its own Tokio task. The result comes back as an
//! [`ExecOutcome`] whose failures carry the display message of the error.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::{FutureExt, future::BoxFuture};
use tracing::{debug, warn};
use werkstatt_api::{ApiError, FileUpload, WerkstattApi, sanitize_filename};
use werkstatt_types::{Effect, ExecOutcome, UploadResult};

/// Spawn `effect` on the runtime. The returned future resolves with the
/// outcome; a panicking task is reported as a failure of the same operation.
pub fn spawn(api: Arc<dyn WerkstattApi>, download_dir: PathBuf, effect: Effect) -> BoxFuture<'static, ExecOutcome> {
    let fallback = effect.clone();
    let handle = tokio::spawn(execute(api, effect, download_dir));
    async move {
        match handle.await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(%error, "execution task failed");
                failed_outcome(fallback, format!("Execution task failed: {error}"))
            }
        }
    }
    .boxed()
}

/// Run a single effect to completion.
pub async fn execute(api: Arc<dyn WerkstattApi>, effect: Effect, download_dir: PathBuf) -> ExecOutcome {
    match effect {
        Effect::LoadPlugins => ExecOutcome::PluginsLoaded(api.get_plugins().await.map_err(report("plugins"))),
        Effect::RunCommand { plugin, command, args } => {
            debug!(%plugin, %command, args = args.len(), "running command");
            ExecOutcome::CommandFinished(api.run_command(&plugin, &command, &args).await.map_err(report("run")))
        }
        Effect::UploadFile(path) => ExecOutcome::FileUploaded(upload(api.as_ref(), &path).await.map_err(report("upload"))),
        Effect::DownloadFile { filename, blob_url } => {
            let result = download(api.as_ref(), &filename, blob_url, &download_dir)
                .await
                .map_err(report("download"));
            ExecOutcome::FileDownloaded { filename, result }
        }
    }
}

fn report(operation: &'static str) -> impl Fn(ApiError) -> String {
    move |error| {
        warn!(operation, %error, "operation failed");
        error.to_string()
    }
}

fn failed_outcome(effect: Effect, message: String) -> ExecOutcome {
    match effect {
        Effect::LoadPlugins => ExecOutcome::PluginsLoaded(Err(message)),
        Effect::RunCommand { .. } => ExecOutcome::CommandFinished(Err(message)),
        Effect::UploadFile(_) => ExecOutcome::FileUploaded(Err(message)),
        Effect::DownloadFile { filename, .. } => ExecOutcome::FileDownloaded {
            filename,
            result: Err(message),
        },
    }
}

async fn upload(api: &dyn WerkstattApi, path: &Path) -> Result<UploadResult, ApiError> {
    let file = FileUpload::from_path(path).await?;
    api.upload_file(file).await
}

/// Fetch `filename` and write it below `download_dir`. Blob URLs are fetched
/// as recorded; any other URL is resolved again first.
async fn download(
    api: &dyn WerkstattApi,
    filename: &str,
    blob_url: Option<String>,
    download_dir: &Path,
) -> Result<PathBuf, ApiError> {
    let url = match blob_url {
        Some(url) => url,
        None => api.get_download_url(filename).await?,
    };
    let bytes = api.download(&url).await?;

    tokio::fs::create_dir_all(download_dir).await.map_err(|source| ApiError::Io {
        path: download_dir.to_path_buf(),
        source,
    })?;
    let target = download_dir.join(sanitize_filename(filename));
    tokio::fs::write(&target, &bytes).await.map_err(|source| ApiError::Io {
        path: target.clone(),
        source,
    })?;
    debug!(path = %target.display(), size = bytes.len(), "download written");
    Ok(target)
}
