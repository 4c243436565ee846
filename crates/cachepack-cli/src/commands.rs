//! CLI command definitions.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Detect the compression method for this host
    Compression,

    /// Print a tool's --version output
    Version {
        /// Executable name
        app: String,
    },

    /// Resolve glob patterns to workspace-relative paths
    Resolve {
        /// Glob patterns; prefix with ! to exclude
        #[arg(required = true)]
        patterns: Vec<String>,
    },

    /// Create a fresh temp directory
    TempDir,

    /// Show resolved transfer options
    Options {
        #[command(subcommand)]
        command: OptionsCommands,
    },

    /// Print the size of an archive in bytes
    Size {
        /// Archive path
        path: PathBuf,
    },

    /// Delete an archive
    Rm {
        /// Archive path
        path: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum OptionsCommands {
    /// Upload options
    Upload {
        /// Partial options as JSON, e.g. '{"uploadConcurrency": 8}'
        #[arg(long)]
        json: Option<String>,
    },

    /// Download options
    Download {
        /// Partial options as JSON, e.g. '{"timeoutInMs": 60000}'
        #[arg(long)]
        json: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
}
