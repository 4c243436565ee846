//! Upload and download option defaults.
//!
//! Callers pass partially filled option records. A field overrides its
//! default only when present and of the expected type; a wrong-typed value
//! is dropped while deserializing and the default is kept.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_UPLOAD_CONCURRENCY: usize = 4;
pub const DEFAULT_UPLOAD_CHUNK_SIZE: u64 = 32 * 1024 * 1024;
pub const DEFAULT_USE_AZURE_SDK: bool = true;
pub const DEFAULT_DOWNLOAD_CONCURRENCY: usize = 8;
pub const DEFAULT_TIMEOUT_IN_MS: u64 = 30_000;

/// Deserialize an optional field, mapping a value of the wrong type to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Partial upload options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOptionsOverride {
    /// Number of parallel chunk uploads.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub upload_concurrency: Option<usize>,
    /// Maximum chunk size in bytes.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub upload_chunk_size: Option<u64>,
}

impl UploadOptionsOverride {
    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn overlay(&self, other: &Self) -> Self {
        Self {
            upload_concurrency: other.upload_concurrency.or(self.upload_concurrency),
            upload_chunk_size: other.upload_chunk_size.or(self.upload_chunk_size),
        }
    }
}

/// Resolved upload options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOptions {
    pub upload_concurrency: usize,
    pub upload_chunk_size: u64,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            upload_concurrency: DEFAULT_UPLOAD_CONCURRENCY,
            upload_chunk_size: DEFAULT_UPLOAD_CHUNK_SIZE,
        }
    }
}

/// Partial download options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadOptionsOverride {
    /// Download through the Azure Storage SDK instead of plain HTTP.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub use_azure_sdk: Option<bool>,
    /// Number of parallel downloads when using the SDK.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub download_concurrency: Option<usize>,
    /// Per-request timeout in milliseconds.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timeout_in_ms: Option<u64>,
}

impl DownloadOptionsOverride {
    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn overlay(&self, other: &Self) -> Self {
        Self {
            use_azure_sdk: other.use_azure_sdk.or(self.use_azure_sdk),
            download_concurrency: other.download_concurrency.or(self.download_concurrency),
            timeout_in_ms: other.timeout_in_ms.or(self.timeout_in_ms),
        }
    }
}

/// Resolved download options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadOptions {
    pub use_azure_sdk: bool,
    pub download_concurrency: usize,
    pub timeout_in_ms: u64,
}

impl DownloadOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_ms)
    }
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            use_azure_sdk: DEFAULT_USE_AZURE_SDK,
            download_concurrency: DEFAULT_DOWNLOAD_CONCURRENCY,
            timeout_in_ms: DEFAULT_TIMEOUT_IN_MS,
        }
    }
}

/// Fill in upload defaults for any field `copy` leaves unset.
pub fn get_upload_options(copy: Option<&UploadOptionsOverride>) -> UploadOptions {
    let mut result = UploadOptions::default();

    if let Some(copy) = copy {
        if let Some(concurrency) = copy.upload_concurrency {
            result.upload_concurrency = concurrency;
        }
        if let Some(chunk_size) = copy.upload_chunk_size {
            result.upload_chunk_size = chunk_size;
        }
    }

    debug!("Upload concurrency: {}", result.upload_concurrency);
    debug!("Upload chunk size: {}", result.upload_chunk_size);

    result
}

/// Fill in download defaults for any field `copy` leaves unset.
pub fn get_download_options(copy: Option<&DownloadOptionsOverride>) -> DownloadOptions {
    let mut result = DownloadOptions::default();

    if let Some(copy) = copy {
        if let Some(use_azure_sdk) = copy.use_azure_sdk {
            result.use_azure_sdk = use_azure_sdk;
        }
        if let Some(concurrency) = copy.download_concurrency {
            result.download_concurrency = concurrency;
        }
        if let Some(timeout) = copy.timeout_in_ms {
            result.timeout_in_ms = timeout;
        }
    }

    debug!("Use Azure SDK: {}", result.use_azure_sdk);
    debug!("Download concurrency: {}", result.download_concurrency);
    debug!("Request timeout (ms): {}", result.timeout_in_ms);

    result
}
