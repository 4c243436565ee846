//! Compression method and archive file name types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compression strategy for a cache archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompressionMethod {
    Gzip,
    /// zstd older than 1.3.2, which has no `--long` support.
    ZstdWithoutLong,
    Zstd,
}

impl CompressionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionMethod::Gzip => "gzip",
            CompressionMethod::ZstdWithoutLong => "zstd-without-long",
            CompressionMethod::Zstd => "zstd",
        }
    }

    /// The archive file name for this method.
    pub fn cache_filename(&self) -> CacheFilename {
        match self {
            CompressionMethod::Gzip => CacheFilename::Gzip,
            CompressionMethod::ZstdWithoutLong | CompressionMethod::Zstd => CacheFilename::Zstd,
        }
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Archive file name, one per compression family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheFilename {
    Gzip,
    Zstd,
}

impl CacheFilename {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheFilename::Gzip => "cache.tgz",
            CacheFilename::Zstd => "cache.tzst",
        }
    }
}

impl fmt::Display for CacheFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Archive file name for a compression method.
pub fn cache_file_name(method: CompressionMethod) -> &'static str {
    method.cache_filename().as_str()
}
