//! Command handlers.

use crate::config::CliConfig;
use cachepack_cache::{
    DownloadOptionsOverride, UploadOptionsOverride, archive_file_size_in_bytes, cache_file_name,
    create_temp_directory, get_compression_method, get_download_options, get_upload_options,
    get_version, resolve_paths, unlink_file,
};
use cachepack_core::{Platform, ProcessEnv};
use console::style;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Detect the compression method.
pub async fn compression() -> Result<(), Box<dyn std::error::Error>> {
    let method = get_compression_method().await;

    println!("{} Compression: {}", style("✓").green(), style(method).bold());
    println!("  Platform: {}", Platform::current());
    println!("  Archive: {}", cache_file_name(method));
    Ok(())
}

/// Print a tool's version output.
pub async fn version(app: &str) -> Result<(), Box<dyn std::error::Error>> {
    let output = get_version(app).await;

    if output.is_empty() {
        println!("{} {} version unknown", style("!").yellow(), app);
    } else {
        println!("{}", output);
    }
    Ok(())
}

/// Resolve patterns and print one path per line.
pub fn resolve(patterns: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let paths = resolve_paths(patterns, &ProcessEnv)?;

    if paths.is_empty() {
        eprintln!("{} No paths matched", style("i").blue());
    }
    for path in paths {
        println!("{}", path);
    }
    Ok(())
}

/// Create a temp directory and print its path.
pub async fn temp_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = create_temp_directory(&ProcessEnv, Platform::current()).await?;
    println!("{}", dir.display());
    Ok(())
}

/// Parse a partial options record given on the command line.
pub fn parse_override<T>(json: Option<&str>) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    match json {
        Some(text) => serde_json::from_str(text),
        None => Ok(T::default()),
    }
}

/// Show resolved upload options.
pub fn upload_options(
    config: &CliConfig,
    json: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let cli: UploadOptionsOverride = parse_override(json)?;
    let options = get_upload_options(Some(&config.upload.overlay(&cli)));
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

/// Show resolved download options.
pub fn download_options(
    config: &CliConfig,
    json: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let cli: DownloadOptionsOverride = parse_override(json)?;
    let options = get_download_options(Some(&config.download.overlay(&cli)));
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

/// Print an archive's size.
pub async fn size(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = archive_file_size_in_bytes(path).await?;
    println!("{}", bytes);
    Ok(())
}

/// Delete an archive.
pub async fn remove(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    unlink_file(path).await?;
    println!("{} Removed {}", style("✓").green(), path.display());
    Ok(())
}

/// Show configuration.
pub fn show_config(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Current configuration:");
    print!("{}", serde_yaml::to_string(config)?);

    if let Ok(path) = CliConfig::config_path() {
        println!("\nConfig file: {}", path.display());
    }

    Ok(())
}
