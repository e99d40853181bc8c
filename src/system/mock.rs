//! Mock system implementation for testing

use super::{System, WalkEntry, is_hidden_name};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory implementation of System trait for testing
///
/// `MockSystem` provides an in-memory filesystem, perfect for fast,
/// isolated unit tests without side effects.
///
/// # Example
/// ```
/// use gomu::system::{mock::MockSystem, System};
/// use std::path::Path;
///
/// let system = MockSystem::new()
///     .with_file("/work/api/go.mod", b"module example.com/api\n").unwrap()
///     .with_dir("/work/empty").unwrap();
///
/// let entries = system.walk_dir(Path::new("/work"), false, false).unwrap();
/// assert_eq!(entries.len(), 3);
/// assert_eq!(
///     system.read_to_string(Path::new("/work/api/go.mod")).unwrap(),
///     "module example.com/api\n"
/// );
/// ```
#[derive(Clone)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
}

struct MockSystemState {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
    branches: HashMap<PathBuf, String>,
}

impl MockSystem {
    /// Create a new `MockSystem` with only the root directory
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockSystemState {
                files: HashMap::new(),
                dirs: HashSet::from([PathBuf::from("/")]),
                branches: HashMap::new(),
            })),
        }
    }

    /// Add a file with contents (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The state lock is poisoned
    #[inline]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> io::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;

        if let Some(parent) = path_buf.parent() {
            Self::ensure_parent_dirs(&mut state.dirs, parent);
        }

        state.files.insert(path_buf, contents.to_vec());
        drop(state);
        Ok(self)
    }

    /// Add a directory (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The state lock is poisoned
    #[inline]
    pub fn with_dir<P: AsRef<Path>>(self, path: P) -> io::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        Self::ensure_parent_dirs(&mut state.dirs, &path_buf);
        drop(state);
        Ok(self)
    }

    /// Mark a directory as a repository checkout on `branch` (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The state lock is poisoned
    #[inline]
    pub fn with_branch<P: AsRef<Path>>(self, repo_dir: P, branch: &str) -> io::Result<Self> {
        let path_buf = repo_dir.as_ref().to_path_buf();
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        Self::ensure_parent_dirs(&mut state.dirs, &path_buf);
        state.branches.insert(path_buf, branch.to_owned());
        drop(state);
        Ok(self)
    }

    fn ensure_parent_dirs(dirs: &mut HashSet<PathBuf>, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor == Path::new("") {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Whether any component below `root` is hidden
    fn has_hidden_component(root: &Path, path: &Path) -> bool {
        path.strip_prefix(root).is_ok_and(|relative| {
            relative.components().any(|component| match component {
                Component::Normal(name) => name.to_str().is_some_and(is_hidden_name),
                _ => false,
            })
        })
    }
}

impl Default for MockSystem {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    #[inline]
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        let bytes = state.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })?;
        drop(state);
        String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {e}")))
    }

    #[inline]
    fn walk_dir(
        &self,
        path: &Path,
        _follow_links: bool,
        hidden: bool,
    ) -> io::Result<Vec<WalkEntry>> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {}", path.display()),
            ));
        }

        let dirs = state.dirs.iter().map(|dir| WalkEntry {
            path: dir.clone(),
            is_file: false,
            is_dir: true,
        });
        let files = state.files.keys().map(|file| WalkEntry {
            path: file.clone(),
            is_file: true,
            is_dir: false,
        });

        let mut entries: Vec<WalkEntry> = dirs
            .chain(files)
            .filter(|entry| entry.path != path && entry.path.starts_with(path))
            .filter(|entry| hidden || !Self::has_hidden_component(path, &entry.path))
            .collect();
        drop(state);

        // Sort entries by path for deterministic output
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(entries)
    }

    #[inline]
    fn git_branch(&self, dir: &Path) -> Option<String> {
        let state = self.state.read().ok()?;
        // Nearest enclosing repository wins, like `git2::Repository::discover`
        dir.ancestors()
            .find_map(|ancestor| state.branches.get(ancestor).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_dir_lists_descendants_only() {
        let system = MockSystem::new()
            .with_file("/work/a/go.mod", b"module a")
            .unwrap()
            .with_file("/other/go.mod", b"module other")
            .unwrap();

        let entries = system.walk_dir(Path::new("/work"), false, false).unwrap();
        let paths: Vec<&Path> = entries.iter().map(|e| e.path.as_path()).collect();

        assert_eq!(
            paths,
            vec![Path::new("/work/a"), Path::new("/work/a/go.mod")]
        );
    }

    #[test]
    fn test_walk_dir_skips_hidden() {
        let system = MockSystem::new()
            .with_file("/work/.cache/go.mod", b"module hidden")
            .unwrap()
            .with_file("/work/b/go.mod", b"module b")
            .unwrap();

        let visible = system.walk_dir(Path::new("/work"), false, false).unwrap();
        assert!(visible.iter().all(|e| !e.path.starts_with("/work/.cache")));

        let all = system.walk_dir(Path::new("/work"), false, true).unwrap();
        assert!(all.iter().any(|e| e.path.starts_with("/work/.cache")));
    }

    #[test]
    fn test_walk_missing_dir() {
        let system = MockSystem::new();
        assert!(system.walk_dir(Path::new("/nope"), false, false).is_err());
    }

    #[test]
    fn test_git_branch_from_enclosing_repo() {
        let system = MockSystem::new()
            .with_branch("/work/repo", "develop")
            .unwrap()
            .with_dir("/work/repo/sub")
            .unwrap();
        assert_eq!(
            system.git_branch(Path::new("/work/repo/sub")),
            Some("develop".to_owned())
        );
        assert_eq!(system.git_branch(Path::new("/work")), None);
    }

    #[test]
    fn test_read_to_string() {
        let system = MockSystem::new()
            .with_file("/work/go.mod", b"module root")
            .unwrap();
        assert_eq!(
            system.read_to_string(Path::new("/work/go.mod")).unwrap(),
            "module root"
        );
        assert!(system.read_to_string(Path::new("/work/go.sum")).is_err());
    }
}
