//! Compression method selection from the installed toolchain.

use crate::types::CompressionMethod;
use crate::version::{SystemTools, ToolProbe};
use cachepack_core::Platform;
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;
use tracing::{debug, info};

/// First zstd release with long-distance matching (`--long`).
pub const MIN_LONG_MODE_VERSION: Version = Version::new(1, 3, 2);

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"v?(\d+\.\d+\.\d+(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?)")
        .expect("version regex is valid")
});

/// Extract the first `x.y.z[-pre]` version from tool output.
pub fn parse_tool_version(output: &str) -> Option<Version> {
    let caps = VERSION_RE.captures(output.trim())?;
    Version::parse(&caps[1]).ok()
}

/// Whether `tar --version` output identifies GNU tar.
pub fn is_gnu_tar(version_output: &str) -> bool {
    version_output.to_lowercase().contains("gnu tar")
}

pub async fn is_gnu_tar_installed<P: ToolProbe + ?Sized>(probe: &P) -> bool {
    is_gnu_tar(&probe.version("tar").await)
}

pub fn is_zstd_installed<P: ToolProbe + ?Sized>(probe: &P) -> bool {
    probe.is_installed("zstd")
}

/// Pick the zstd variant for a probed `zstd --version` output.
pub fn method_for_zstd_version(version_output: &str) -> CompressionMethod {
    match parse_tool_version(version_output) {
        Some(version) if version >= MIN_LONG_MODE_VERSION => CompressionMethod::Zstd,
        _ => CompressionMethod::ZstdWithoutLong,
    }
}

/// Select the compression method for this host.
///
/// Never fails: anything that cannot be probed degrades toward gzip.
pub async fn select_compression<P: ToolProbe + ?Sized>(
    platform: Platform,
    probe: &P,
) -> CompressionMethod {
    // zstd archives from non-GNU tar do not extract reliably on Windows
    if platform.is_windows() && !is_gnu_tar_installed(probe).await {
        debug!("GNU tar not found on Windows, using gzip");
        return CompressionMethod::Gzip;
    }

    if !is_zstd_installed(probe) {
        debug!("zstd not found on PATH, using gzip");
        return CompressionMethod::Gzip;
    }

    let version_output = probe.version("zstd").await;
    let method = method_for_zstd_version(&version_output);
    info!(%platform, method = %method, "Selected compression method");
    method
}

/// Select the compression method for the current host.
pub async fn get_compression_method() -> CompressionMethod {
    select_compression(Platform::current(), &SystemTools).await
}
