//! Tool presence and version probing.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Run `<app> --version` and return its trimmed combined output.
///
/// The exit code is ignored. If the process cannot be spawned the result is
/// the empty string, the same as a tool that printed nothing.
pub async fn get_version(app: &str) -> String {
    debug!("Checking {} --version", app);

    let output = Command::new(app)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    let combined = match output {
        Ok(output) => {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            text
        }
        Err(e) => {
            debug!(app, error = %e, "Version probe failed");
            String::new()
        }
    };

    let trimmed = combined.trim().to_string();
    debug!("{}", trimmed);
    trimmed
}

/// Queries the host for installed tools.
#[async_trait]
pub trait ToolProbe: Send + Sync {
    /// Trimmed `--version` output, empty when unknown.
    async fn version(&self, app: &str) -> String;

    /// Whether `app` resolves on PATH.
    fn is_installed(&self, app: &str) -> bool;
}

/// Probes the real host: PATH lookup and process spawning.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTools;

#[async_trait]
impl ToolProbe for SystemTools {
    async fn version(&self, app: &str) -> String {
        get_version(app).await
    }

    fn is_installed(&self, app: &str) -> bool {
        which::which(app).is_ok()
    }
}
