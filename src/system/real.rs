//! Real system implementation using `std::fs`, `walkdir` and `git2`

use super::{System, WalkEntry, is_hidden_name};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Production implementation of System trait
///
/// This implementation directly delegates to the standard library's
/// filesystem functions and to `walkdir` for recursion.
#[derive(Debug, Clone, Copy)]
pub struct RealSystem;

impl RealSystem {
    /// Create a new `RealSystem` instance
    #[must_use]
    pub const fn new() -> Self {
        return Self;
    }
}

impl Default for RealSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RealSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn walk_dir(
        &self,
        path: &Path,
        follow_links: bool,
        hidden: bool,
    ) -> io::Result<Vec<WalkEntry>> {
        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {}", path.display()),
            ));
        }

        let entries = WalkDir::new(path)
            .min_depth(1)
            .follow_links(follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                hidden || !entry.file_name().to_str().is_some_and(is_hidden_name)
            })
            .filter_map(Result::ok)
            .map(|entry| {
                let file_type = entry.file_type();
                WalkEntry {
                    is_file: file_type.is_file(),
                    is_dir: file_type.is_dir(),
                    path: entry.into_path(),
                }
            });

        let mut entries: Vec<WalkEntry> = entries.collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn git_branch(&self, dir: &Path) -> Option<String> {
        let repository = git2::Repository::discover(dir).ok()?;
        let head = repository.head().ok()?;
        if !head.is_branch() {
            return None;
        }
        head.shorthand().map(str::to_owned)
    }
}
