//! Access to process environment state.
//!
//! Helpers that read environment variables or the working directory take an
//! [`EnvSource`] instead of touching the process directly, so callers can
//! supply a fixed environment.

use std::collections::HashMap;
use std::path::PathBuf;

/// Temp root provided by the runner.
pub const RUNNER_TEMP: &str = "RUNNER_TEMP";
/// Windows home directory.
pub const USERPROFILE: &str = "USERPROFILE";
/// Checkout root that archived paths are made relative to.
pub const GITHUB_WORKSPACE: &str = "GITHUB_WORKSPACE";

/// Source of environment variables and the current directory.
pub trait EnvSource: Send + Sync {
    /// Look up a variable. Unset and non-unicode values are both `None`.
    fn var(&self, key: &str) -> Option<String>;

    /// The directory relative patterns are rooted at.
    fn current_dir(&self) -> std::io::Result<PathBuf>;

    /// Home directory used for `~` expansion.
    fn home_dir(&self) -> Option<PathBuf> {
        self.var("HOME")
            .filter(|v| !v.is_empty())
            .or_else(|| self.var(USERPROFILE).filter(|v| !v.is_empty()))
            .map(PathBuf::from)
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// A fixed, map-backed environment.
#[derive(Debug, Clone)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
    current_dir: PathBuf,
}

impl StaticEnv {
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            current_dir: current_dir.into(),
        }
    }

    /// Set a variable, builder style.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvSource for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        Ok(self.current_dir.clone())
    }
}
