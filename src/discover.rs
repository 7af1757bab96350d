//! Source file discovery.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

/// Errors that can occur while listing source files.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("invalid extension pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },
    #[error("cannot read directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Build a file-name matcher such as `*.py` for each allowed extension.
fn build_matcher(extensions: &[String]) -> Result<GlobSet, DiscoveryError> {
    let mut builder = GlobSetBuilder::new();
    for ext in extensions {
        let pattern = format!("*{}", ext);
        let glob = Glob::new(&pattern).map_err(|source| DiscoveryError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| DiscoveryError::Pattern {
        pattern: extensions.join(","),
        source,
    })
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn is_candidate(path: &Path, matcher: &GlobSet) -> bool {
    path.file_name().is_some_and(|name| {
        !is_hidden(&name.to_string_lossy()) && matcher.is_match(name)
    })
}

/// Collect files under `root` whose name ends in one of `extensions`.
///
/// Only the immediate directory is listed unless `recursive` is set. Hidden
/// files and directories are skipped, as shell globbing does. The result is
/// sorted by path; an empty result is not an error.
///
/// Only a failure to read `root` itself is an error. An entry below it that
/// cannot be inspected (dangling symlink, link loop, unreadable directory)
/// is still returned when its name matches, so analysis records it as a
/// failed file; otherwise it is skipped with a warning.
pub fn discover_files(
    root: &Path,
    extensions: &[String],
    recursive: bool,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let matcher = build_matcher(extensions)?;

    let mut walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();

    for entry in walker.into_iter().filter_entry(|e| {
        // The root itself may be "." or a dotted path; only filter below it.
        e.depth() == 0 || !is_hidden(&e.file_name().to_string_lossy())
    }) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                match err.path() {
                    Some(path) if is_candidate(path, &matcher) => files.push(path.to_path_buf()),
                    _ => warn!(error = %err, "skipping unreadable entry"),
                }
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if matcher.is_match(entry.file_name()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXTENSIONS;
    use std::fs;
    use tempfile::TempDir;

    fn default_exts() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_discover_allowed_extensions() {
        let temp = TempDir::new().unwrap();
        for name in ["main.py", "app.js", "style.css", "lib.c", "lib.cpp", "README.md", "data.json"] {
            fs::write(temp.path().join(name), "x").unwrap();
        }

        let files = discover_files(temp.path(), &default_exts(), false).unwrap();
        assert_eq!(
            names(&files),
            vec!["app.js", "lib.c", "lib.cpp", "main.py", "style.css"]
        );
    }

    #[test]
    fn test_non_recursive_by_default() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("top.py"), "x").unwrap();
        fs::create_dir(temp.path().join("pkg")).unwrap();
        fs::write(temp.path().join("pkg").join("inner.py"), "x").unwrap();

        let flat = discover_files(temp.path(), &default_exts(), false).unwrap();
        assert_eq!(names(&flat), vec!["top.py"]);

        let deep = discover_files(temp.path(), &default_exts(), true).unwrap();
        assert_eq!(names(&deep), vec!["inner.py", "top.py"]);
    }

    #[test]
    fn test_skips_hidden_and_directories() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".eslintrc.js"), "x").unwrap();
        fs::create_dir(temp.path().join("weird.py")).unwrap();
        fs::create_dir(temp.path().join(".venv")).unwrap();
        fs::write(temp.path().join(".venv").join("site.py"), "x").unwrap();
        fs::write(temp.path().join("real.ts"), "x").unwrap();

        let files = discover_files(temp.path(), &default_exts(), true).unwrap();
        assert_eq!(names(&files), vec!["real.ts"]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.txt"), "x").unwrap();
        fs::write(temp.path().join("Makefile"), "x").unwrap();

        let files = discover_files(temp.path(), &default_exts(), false).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("LOUD.PY"), "x").unwrap();

        let files = discover_files(temp.path(), &default_exts(), false).unwrap();
        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_with_allowed_extension_is_kept() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("good.py"), "x").unwrap();
        symlink(temp.path().join("gone.py"), temp.path().join("link.py")).unwrap();

        let files = discover_files(temp.path(), &default_exts(), false).unwrap();
        assert_eq!(names(&files), vec!["good.py", "link.py"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_with_other_extension_is_skipped() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("good.py"), "x").unwrap();
        symlink(temp.path().join("gone.txt"), temp.path().join("notes.txt")).unwrap();

        let files = discover_files(temp.path(), &default_exts(), false).unwrap();
        assert_eq!(names(&files), vec!["good.py"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_skipped_when_recursive() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("top.py"), "x").unwrap();
        let pkg = temp.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        fs::write(pkg.join("inner.py"), "x").unwrap();
        symlink(temp.path(), pkg.join("back")).unwrap();

        let files = discover_files(temp.path(), &default_exts(), true).unwrap();
        assert_eq!(names(&files), vec!["inner.py", "top.py"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped_when_recursive() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("top.py"), "x").unwrap();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("inner.py"), "x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        let readable = fs::read_dir(&locked).is_ok();

        let result = discover_files(temp.path(), &default_exts(), true);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        let files = result.unwrap();

        // Privileged users can still list the directory.
        if readable {
            eprintln!("locked directory stayed readable; checking the full listing instead");
            assert_eq!(names(&files), vec!["inner.py", "top.py"]);
            return;
        }
        assert_eq!(names(&files), vec!["top.py"]);
    }

    #[test]
    fn test_missing_root_is_error() {
        let temp = TempDir::new().unwrap();
        let result = discover_files(&temp.path().join("absent"), &default_exts(), false);
        assert!(matches!(result, Err(DiscoveryError::Walk(_))));
    }
}
