//! Archive file helpers.

use cachepack_core::Result;
use std::path::Path;

/// Size of an archive on disk.
pub async fn archive_file_size_in_bytes(path: impl AsRef<Path>) -> Result<u64> {
    let metadata = tokio::fs::metadata(path).await?;
    Ok(metadata.len())
}

/// Delete a single file.
pub async fn unlink_file(path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::remove_file(path).await?;
    Ok(())
}
