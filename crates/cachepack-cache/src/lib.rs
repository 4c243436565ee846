//! Support utilities for cache archiving: compression detection, path
//! resolution, temp directories and transfer option defaults.

pub mod compression;
pub mod constants;
pub mod fs;
pub mod options;
pub mod paths;
pub mod tempdir;
pub mod types;
pub mod version;

pub use compression::{get_compression_method, select_compression};
pub use constants::{DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY, SOCKET_TIMEOUT};
pub use fs::{archive_file_size_in_bytes, unlink_file};
pub use options::{
    DownloadOptions, DownloadOptionsOverride, UploadOptions, UploadOptionsOverride,
    get_download_options, get_upload_options,
};
pub use paths::resolve_paths;
pub use tempdir::{create_temp_directory, temp_root};
pub use types::{CacheFilename, CompressionMethod, cache_file_name};
pub use version::{SystemTools, ToolProbe, get_version};
