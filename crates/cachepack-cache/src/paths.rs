//! Glob pattern resolution to workspace-relative paths.
//!
//! Archive entries are stored relative to the workspace root rather than as
//! absolute paths, so a cache saved on one machine restores on another with
//! a different checkout location.
//!
//! Pattern syntax:
//! - one pattern per entry, or several separated by newlines
//! - surrounding whitespace is trimmed; blank lines and `#` comments are skipped
//! - a leading `!` excludes matches; the last pattern matching a path decides
//! - a leading `~` expands to the home directory
//! - a directory matches only itself; a trailing `**` matches its descendants,
//!   and an excluded trailing `**` removes the directory as well

use cachepack_core::env::GITHUB_WORKSPACE;
use cachepack_core::{EnvSource, Error, Result};
use glob::{MatchOptions, Pattern};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: !cfg!(windows),
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

/// A parsed include or exclude pattern, rooted at an absolute directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    /// Absolute glob in the syntax of the `glob` crate.
    pub glob: String,
    /// Whether matches of this pattern are removed from the result.
    pub negate: bool,
    /// The pattern ended in `**`, so it also covers the directory itself
    /// when excluding.
    pub trailing_globstar: bool,
}

impl SearchPattern {
    /// Parse one trimmed, non-comment pattern line.
    pub fn parse(line: &str, root: &Path, env: &dyn EnvSource) -> Result<Self> {
        let negations = line.chars().take_while(|c| *c == '!').count();
        let negate = negations % 2 == 1;
        let body = line[negations..].trim_start();

        let expanded = expand_home(body, env)?;
        let absolute = if Path::new(&expanded).is_absolute() {
            expanded
        } else {
            format!(
                "{}/{}",
                Pattern::escape(&root.to_string_lossy()),
                expanded
            )
        };

        Ok(Self {
            glob: with_descendants(&absolute),
            negate,
            trailing_globstar: globstar_base(&absolute).is_some(),
        })
    }

    /// Compile into matchers over lexically normalized absolute paths.
    fn compile(&self) -> Result<Matcher> {
        let mut globs = vec![normalize_glob(&self.glob)];
        if self.negate && self.trailing_globstar {
            if let Some(base) = self.glob.strip_suffix("/**/*") {
                globs.push(normalize_glob(base));
            }
        }

        let patterns = globs
            .iter()
            .map(|glob| {
                Pattern::new(glob).map_err(|e| Error::InvalidPattern {
                    pattern: glob.clone(),
                    message: e.msg.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Matcher {
            negate: self.negate,
            patterns,
        })
    }
}

struct Matcher {
    negate: bool,
    patterns: Vec<Pattern>,
}

impl Matcher {
    fn matches(&self, path: &Path, options: MatchOptions) -> bool {
        self.patterns.iter().any(|p| p.matches_path_with(path, options))
    }
}

/// Whether a normalized path survives the ordered pattern list.
fn is_included(matchers: &[Matcher], path: &Path, options: MatchOptions) -> bool {
    matchers.iter().fold(false, |included, m| {
        if m.matches(path, options) {
            !m.negate
        } else {
            included
        }
    })
}

fn normalize_glob(glob: &str) -> String {
    normalize(Path::new(glob)).to_string_lossy().into_owned()
}

fn expand_home(pattern: &str, env: &dyn EnvSource) -> Result<String> {
    let rest = match pattern.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return Ok(pattern.to_string()),
    };
    let home = env.home_dir().ok_or_else(|| Error::InvalidPattern {
        pattern: pattern.to_string(),
        message: "unable to determine home directory".to_string(),
    })?;
    Ok(format!("{}{}", Pattern::escape(&home.to_string_lossy()), rest))
}

/// The directory part of a pattern ending in a `**` segment.
fn globstar_base(pattern: &str) -> Option<&str> {
    let trimmed = pattern.trim_end_matches(['/', '\\']);
    trimmed
        .strip_suffix("/**")
        .or_else(|| trimmed.strip_suffix("\\**"))
}

/// A trailing `**` segment matches everything beneath the directory. The
/// `glob` crate only yields directories for a trailing `**`, so extend it.
fn with_descendants(pattern: &str) -> String {
    match globstar_base(pattern) {
        Some(base) => format!("{}/**/*", base),
        None => pattern.to_string(),
    }
}

/// Split pattern input into parsed patterns, skipping blanks and comments.
pub fn parse_patterns<S: AsRef<str>>(
    patterns: &[S],
    root: &Path,
    env: &dyn EnvSource,
) -> Result<Vec<SearchPattern>> {
    let mut parsed = Vec::new();
    for input in patterns {
        for line in input.as_ref().lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            parsed.push(SearchPattern::parse(line, root, env)?);
        }
    }
    Ok(parsed)
}

/// Resolve glob patterns to paths relative to the workspace root.
///
/// Relative patterns are rooted at the current directory. Results keep match
/// order and are not deduplicated. Separators are always `/`.
pub fn resolve_paths<S: AsRef<str>>(patterns: &[S], env: &dyn EnvSource) -> Result<Vec<String>> {
    let cwd = env.current_dir()?;
    let workspace = match env.var(GITHUB_WORKSPACE).filter(|w| !w.is_empty()) {
        Some(w) => cwd.join(w),
        None => cwd.clone(),
    };

    let parsed = parse_patterns(patterns, &cwd, env)?;
    let options = match_options();

    let matchers = parsed
        .iter()
        .map(SearchPattern::compile)
        .collect::<Result<Vec<_>>>()?;

    let mut paths = Vec::new();
    for pattern in parsed.iter().filter(|p| !p.negate) {
        let entries = glob::glob_with(&pattern.glob, options).map_err(|e| Error::InvalidPattern {
            pattern: pattern.glob.clone(),
            message: e.msg.to_string(),
        })?;

        for entry in entries {
            let file = entry.map_err(|e| Error::GlobTraversal {
                path: e.path().display().to_string(),
                message: e.error().to_string(),
            })?;

            let file = normalize(&file);
            if !is_included(&matchers, &file, options) {
                continue;
            }

            let relative_file = to_slash(&relative_path(&workspace, &file));
            debug!("Matched: {}", relative_file);
            paths.push(relative_file);
        }
    }

    Ok(paths)
}

/// Lexically normalize a path: drop `.` and fold `..` into its parent.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Path from `base` to `target`, both absolute. Equal paths give an empty path.
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base = normalize(base);
    let target = normalize(target);

    let base_parts: Vec<Component<'_>> = base.components().collect();
    let target_parts: Vec<Component<'_>> = target.components().collect();

    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part);
    }
    relative
}

/// Join path components with `/` regardless of the host separator.
fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cachepack_core::StaticEnv;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn workspace() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("dir/nested")).unwrap();
        fs::write(dir.path().join("dir/file.txt"), b"a").unwrap();
        fs::write(dir.path().join("dir/nested/deep.txt"), b"b").unwrap();
        fs::write(dir.path().join("dir/skip.log"), b"c").unwrap();
        fs::write(dir.path().join("a.txt"), b"d").unwrap();
        fs::write(dir.path().join("b.txt"), b"e").unwrap();
        fs::write(dir.path().join(".hidden"), b"f").unwrap();
        dir
    }

    fn env_at(root: &Path) -> StaticEnv {
        StaticEnv::new(root).with_var(GITHUB_WORKSPACE, root.to_string_lossy())
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/ws"), Path::new("/ws/dir/file.txt")),
            PathBuf::from("dir/file.txt")
        );
        assert_eq!(
            relative_path(Path::new("/ws/sub"), Path::new("/ws/other/f")),
            PathBuf::from("../other/f")
        );
        assert_eq!(
            relative_path(Path::new("/ws/./a/.."), Path::new("/ws/x")),
            PathBuf::from("x")
        );
        assert_eq!(relative_path(Path::new("/ws"), Path::new("/ws")), PathBuf::new());
    }

    #[test]
    fn test_with_descendants() {
        assert_eq!(with_descendants("/ws/dir/**"), "/ws/dir/**/*");
        assert_eq!(with_descendants("/ws/dir/**/"), "/ws/dir/**/*");
        assert_eq!(with_descendants("/ws/**/*.txt"), "/ws/**/*.txt");
        assert_eq!(with_descendants("/ws/dir"), "/ws/dir");
    }

    #[test]
    fn test_parse_patterns_skips_comments_and_blanks() {
        let env = StaticEnv::new("/ws");
        let parsed = parse_patterns(
            &["# header\n\n  dir/**  \n!dir/skip.log\n!!a.txt"],
            Path::new("/ws"),
            &env,
        )
        .unwrap();

        assert_eq!(
            parsed,
            vec![
                SearchPattern {
                    glob: "/ws/dir/**/*".into(),
                    negate: false,
                    trailing_globstar: true,
                },
                SearchPattern {
                    glob: "/ws/dir/skip.log".into(),
                    negate: true,
                    trailing_globstar: false,
                },
                SearchPattern {
                    glob: "/ws/a.txt".into(),
                    negate: false,
                    trailing_globstar: false,
                },
            ]
        );
    }

    #[test]
    fn test_home_expansion() {
        let env = StaticEnv::new("/ws").with_var("HOME", "/home/runner");
        let parsed = parse_patterns(&["~/.cargo/registry"], Path::new("/ws"), &env).unwrap();
        assert_eq!(parsed[0].glob, "/home/runner/.cargo/registry");

        let parsed = parse_patterns(&["~user/x"], Path::new("/ws"), &env).unwrap();
        assert_eq!(parsed[0].glob, "/ws/~user/x");
    }

    #[test]
    fn test_home_expansion_without_home_fails() {
        let env = StaticEnv::new("/ws");
        let err = parse_patterns(&["~/.npm"], Path::new("/ws"), &env).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_trailing_globstar_matches_descendants() {
        let ws = tempfile::tempdir().unwrap();
        fs::create_dir_all(ws.path().join("dir")).unwrap();
        fs::write(ws.path().join("dir/file.txt"), b"x").unwrap();

        let paths = resolve_paths(&["dir/**"], &env_at(ws.path())).unwrap();
        assert_eq!(paths, vec!["dir/file.txt".to_string()]);
    }

    #[test]
    fn test_directory_matches_only_itself() {
        let ws = workspace();
        let paths = resolve_paths(&["dir"], &env_at(ws.path())).unwrap();
        assert_eq!(paths, vec!["dir".to_string()]);
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let ws = workspace();
        let paths = resolve_paths(&["b.txt", "a.txt", "b.txt"], &env_at(ws.path())).unwrap();
        assert_eq!(paths, vec!["b.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_descendants_use_forward_slashes() {
        let ws = workspace();
        let mut paths = resolve_paths(&["dir/**"], &env_at(ws.path())).unwrap();
        paths.sort();
        assert_eq!(
            paths,
            vec!["dir/file.txt", "dir/nested", "dir/nested/deep.txt", "dir/skip.log"]
        );
        assert!(paths.iter().all(|p| !p.contains('\\')));
    }

    #[test]
    fn test_exclusions_remove_matches() {
        let ws = workspace();
        let mut paths = resolve_paths(&["dir/*\n!dir/*.log"], &env_at(ws.path())).unwrap();
        paths.sort();
        assert_eq!(paths, vec!["dir/file.txt", "dir/nested"]);
    }

    #[test]
    fn test_later_include_overrides_exclusion() {
        let ws = workspace();
        let mut paths =
            resolve_paths(&["dir/*", "!dir/*.log", "dir/skip.log"], &env_at(ws.path())).unwrap();
        paths.sort();
        paths.dedup();
        assert_eq!(paths, vec!["dir/file.txt", "dir/nested", "dir/skip.log"]);

        let paths =
            resolve_paths(&["dir/*.txt", "!dir/*", "dir/skip.log"], &env_at(ws.path())).unwrap();
        assert_eq!(paths, vec!["dir/skip.log"]);
    }

    #[test]
    fn test_exclusion_before_include_has_no_effect() {
        let ws = workspace();
        let paths = resolve_paths(&["!a.txt", "*.txt"], &env_at(ws.path())).unwrap();
        assert_eq!(paths, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_exclusion_with_parent_segments() {
        let ws = workspace();
        let env = StaticEnv::new(ws.path().join("dir"))
            .with_var(GITHUB_WORKSPACE, ws.path().to_string_lossy());
        let absolute = ws.path().join("a.txt").to_string_lossy().into_owned();

        let paths = resolve_paths(&[absolute.as_str(), "!../a.txt"], &env).unwrap();
        assert!(paths.is_empty());

        let paths = resolve_paths(&["../*.txt", "!../b.txt"], &env).unwrap();
        assert_eq!(paths, vec!["a.txt"]);
    }

    #[test]
    fn test_excluded_globstar_covers_directory() {
        let ws = workspace();
        let mut paths = resolve_paths(&["*", "!dir/**"], &env_at(ws.path())).unwrap();
        paths.sort();
        assert_eq!(paths, vec![".hidden", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_wildcard_matches_dotfiles() {
        let ws = workspace();
        let paths = resolve_paths(&["?hidden"], &env_at(ws.path())).unwrap();
        assert_eq!(paths, vec![".hidden"]);
    }

    #[test]
    fn test_relative_to_workspace_not_cwd() {
        let ws = workspace();
        let env = StaticEnv::new(ws.path().join("dir"))
            .with_var(GITHUB_WORKSPACE, ws.path().to_string_lossy());
        let paths = resolve_paths(&["file.txt", "../a.txt"], &env).unwrap();
        assert_eq!(paths, vec!["dir/file.txt", "a.txt"]);
    }

    #[test]
    fn test_workspace_defaults_to_cwd() {
        let ws = workspace();
        let env = StaticEnv::new(ws.path().join("dir"));
        let paths = resolve_paths(&["nested/deep.txt"], &env).unwrap();
        assert_eq!(paths, vec!["nested/deep.txt"]);
    }

    #[test]
    fn test_match_outside_workspace() {
        let ws = workspace();
        let env = StaticEnv::new(ws.path())
            .with_var(GITHUB_WORKSPACE, ws.path().join("dir").to_string_lossy());
        let paths = resolve_paths(&["a.txt"], &env).unwrap();
        assert_eq!(paths, vec!["../a.txt"]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let ws = workspace();
        let empty: [&str; 0] = [];
        assert!(resolve_paths(&["missing/**"], &env_at(ws.path())).unwrap().is_empty());
        assert!(resolve_paths(&empty, &env_at(ws.path())).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pattern_propagates() {
        let ws = workspace();
        let err = resolve_paths(&["dir/***"], &env_at(ws.path())).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }
}
