//! System abstraction for filesystem operations
//!
//! This module provides a unified trait for the filesystem and repository
//! reads the workspace engine performs, allowing for easy testing with mock implementations.

use std::io;
use std::path::{Path, PathBuf};

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Entry from directory walking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub is_file: bool,
    pub is_dir: bool,
}

/// Unified trait for system operations
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std::fs`, `walkdir` and `git2`
/// - `MockSystem`: Test implementation using in-memory storage
pub trait System: Send + Sync {
    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Recursively walk a directory, returning all entries
    ///
    /// # Arguments
    /// * `path` - Root path to start walking from
    /// * `follow_links` - Whether to follow symbolic links
    /// * `hidden` - Whether to include hidden files and descend into hidden directories
    ///
    /// # Returns
    /// Entries sorted by path, excluding the root itself
    fn walk_dir(&self, path: &Path, follow_links: bool, hidden: bool)
    -> io::Result<Vec<WalkEntry>>;

    /// Short name of the branch checked out in the repository containing
    /// `dir`; `None` outside a repository or on a detached head
    fn git_branch(&self, dir: &Path) -> Option<String>;
}

/// Whether a file name is hidden (dot-prefixed)
#[must_use]
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}
