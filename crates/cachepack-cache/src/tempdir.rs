//! Scratch directories for archive staging.

use cachepack_core::env::{RUNNER_TEMP, USERPROFILE};
use cachepack_core::{EnvSource, Platform, Result};
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

/// Base directory that temp directories are created under.
///
/// `RUNNER_TEMP` wins when set. Otherwise the platform's home root is used
/// with `actions/temp` appended.
pub fn temp_root(env: &dyn EnvSource, platform: Platform) -> PathBuf {
    if let Some(dir) = env.var(RUNNER_TEMP).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    let base = match platform {
        Platform::Windows => env
            .var(USERPROFILE)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "C:\\".to_string()),
        Platform::Macos => "/Users".to_string(),
        Platform::Linux => "/home".to_string(),
    };
    PathBuf::from(base).join("actions").join("temp")
}

/// Create a fresh, uniquely named directory under [`temp_root`].
pub async fn create_temp_directory(env: &dyn EnvSource, platform: Platform) -> Result<PathBuf> {
    let dest = temp_root(env, platform).join(Uuid::new_v4().to_string());
    tokio::fs::create_dir_all(&dest).await?;
    info!(path = %dest.display(), "Created temp directory");
    Ok(dest)
}
