//! Built-in removal of build artifacts and caches
//!
//! Walks the workspace breadth-first and deletes every entry whose path,
//! relative to the root, matches one of the patterns. Matching directories are
//! removed whole and not descended into. Entries that vanish before they can be
//! deleted count as removed.

use std::collections::VecDeque;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::types::{TendError, TendResult};

/// Directories never walked into or deleted
const SKIPPED_DIRS: &[&str] = &[".git"];

fn build_glob_set(patterns: &[String]) -> TendResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            TendError::Config(format!("Invalid remove pattern '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| TendError::Config(format!("Invalid remove patterns: {}", e)))
}

/// Delete everything under `root` matching `patterns`, returning the removed paths
pub fn remove_matching(root: &Path, patterns: &[String]) -> TendResult<Vec<PathBuf>> {
    let matcher = build_glob_set(patterns)?;
    let mut removed = Vec::new();

    let mut queue = VecDeque::new();
    queue.push_back(root.to_path_buf());

    while let Some(current_dir) = queue.pop_front() {
        let entries = match std::fs::read_dir(&current_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(TendError::Remove { path: current_dir, source: e }),
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(TendError::Remove {
                        path: current_dir,
                        source: e,
                    })
                }
            };
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(TendError::Remove { path, source: e }),
            };

            if file_type.is_dir()
                && SKIPPED_DIRS
                    .iter()
                    .any(|skipped| entry.file_name() == **skipped)
            {
                continue;
            }

            let relative_path = path.strip_prefix(root).unwrap_or(&path);
            if matcher.is_match(relative_path) {
                let result = if file_type.is_dir() {
                    std::fs::remove_dir_all(&path)
                } else {
                    std::fs::remove_file(&path)
                };

                match result {
                    Ok(()) => {
                        tracing::debug!(path = %path.display(), "removed");
                        removed.push(path);
                    }
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        tracing::warn!(path = %path.display(), "already gone");
                    }
                    Err(e) => return Err(TendError::Remove { path, source: e }),
                }
            } else if file_type.is_dir() {
                queue.push_back(path);
            }
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn seed(root: &Path) {
        std::fs::create_dir_all(root.join("pkg/__pycache__")).unwrap();
        std::fs::create_dir_all(root.join("pkg/sub/__pycache__")).unwrap();
        std::fs::create_dir_all(root.join(".git/objects")).unwrap();
        std::fs::write(root.join("pkg/__pycache__/mod.cpython-312.pyc"), "x").unwrap();
        std::fs::write(root.join("pkg/sub/__pycache__/a.pyc"), "x").unwrap();
        std::fs::write(root.join("pkg/stray.pyc"), "x").unwrap();
        std::fs::write(root.join("pkg/mod.py"), "print()").unwrap();
        std::fs::write(root.join(".git/objects/keep.pyc"), "x").unwrap();
        std::fs::write(root.join(".coverage"), "x").unwrap();
    }

    #[test]
    fn removes_matching_files_and_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        seed(root);

        let removed =
            remove_matching(root, &patterns(&["**/*.pyc", "**/__pycache__", ".coverage"])).unwrap();

        assert_eq!(removed.len(), 4, "removed: {:?}", removed);
        assert!(!root.join("pkg/__pycache__").exists());
        assert!(!root.join("pkg/sub/__pycache__").exists());
        assert!(!root.join("pkg/stray.pyc").exists());
        assert!(!root.join(".coverage").exists());
        assert!(root.join("pkg/mod.py").exists(), "sources must survive");
        assert!(
            root.join(".git/objects/keep.pyc").exists(),
            ".git must never be touched"
        );
    }

    #[test]
    fn second_run_is_a_no_op() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        seed(root);
        let patterns = patterns(&["**/*.pyc", "**/__pycache__"]);

        remove_matching(root, &patterns).unwrap();
        let removed = remove_matching(root, &patterns).unwrap();

        assert!(removed.is_empty());
    }

    #[test]
    fn root_relative_patterns_do_not_match_nested_paths() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("htmlcov")).unwrap();
        std::fs::create_dir_all(root.join("docs/htmlcov")).unwrap();

        remove_matching(root, &patterns(&["htmlcov"])).unwrap();

        assert!(!root.join("htmlcov").exists());
        assert!(root.join("docs/htmlcov").exists());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_a_remove_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        let locked = root.join("locked");
        std::fs::create_dir_all(&locked).unwrap();
        std::fs::write(locked.join("a.pyc"), "x").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users read through the mode bits
        let readable = std::fs::read_dir(&locked).is_ok();
        let result = remove_matching(root, &patterns(&["**/*.pyc"]));
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        match result {
            Err(TendError::Remove { path, .. }) => assert_eq!(path, locked),
            other => panic!("expected a remove error, got {:?}", other),
        }
        assert!(locked.join("a.pyc").exists());
    }

    #[test]
    fn missing_root_is_not_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let removed =
            remove_matching(&temp_dir.path().join("absent"), &patterns(&["**/*.pyc"])).unwrap();
        assert!(removed.is_empty());
    }
}
