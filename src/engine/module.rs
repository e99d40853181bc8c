//! Go module discovery
//!
//! Finds every `go.mod` below the target directories and reads its module
//! path. Hidden directories and `vendor` trees are never searched.

use crate::system::System;
use anyhow::{Context as _, Result};
use regex::Regex;
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

const MANIFEST: &str = "go.mod";
const VENDOR: &str = "vendor";

/// A module found in one of the target directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoModule {
    /// Module path from the `module` directive
    pub name: String,
    /// Directory holding the manifest
    pub dir: PathBuf,
    /// Checked out branch, when the directory is in a git repository
    pub branch: Option<String>,
}

impl GoModule {
    /// Whether a dependency filter selects this module, either by full module
    /// path or by its last path segment
    #[must_use]
    pub fn matches(&self, filter: &str) -> bool {
        self.name == filter || self.name.rsplit('/').next() == Some(filter)
    }
}

/// Modules found plus the directories that could not be searched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleScan {
    pub modules: Vec<GoModule>,
    pub errors: Vec<String>,
}

impl ModuleScan {
    /// Modules selected by dependency filters; all of them when `filters` is
    /// empty
    #[must_use]
    pub fn select(&self, filters: &[String]) -> Vec<GoModule> {
        self.modules
            .iter()
            .filter(|module| filters.is_empty() || filters.iter().any(|f| module.matches(f)))
            .cloned()
            .collect()
    }
}

/// Reads module paths out of `go.mod` contents
#[derive(Debug, Clone)]
pub struct ManifestParser {
    module_line: Regex,
}

impl ManifestParser {
    /// Create a parser
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The module directive pattern fails to compile
    #[inline]
    pub fn new() -> Result<Self> {
        let module_line = Regex::new(r#"(?m)^\s*module\s+"?([^\s"]+)"?"#)
            .context("Invalid module directive pattern")?;
        return Ok(Self { module_line });
    }

    /// Module path declared in a manifest, if any
    #[must_use]
    pub fn module_path(&self, contents: &str) -> Option<String> {
        self.module_line
            .captures(contents)
            .and_then(|captures| captures.get(1))
            .map(|path| path.as_str().to_owned())
    }
}

/// Find the modules below `target_dirs`, sorted by module path and
/// de-duplicated
pub fn discover_modules(
    system: &dyn System,
    parser: &ManifestParser,
    target_dirs: &[String],
) -> ModuleScan {
    let mut scan = ModuleScan::default();

    for target in target_dirs {
        let root = Path::new(target);
        let entries = match system.walk_dir(root, false, false) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Cannot search {}: {}", root.display(), err);
                scan.errors
                    .push(format!("cannot search directory '{target}': {err}"));
                continue;
            }
        };

        let manifests = entries
            .into_iter()
            .filter(|entry| entry.is_file && entry.path.file_name() == Some(OsStr::new(MANIFEST)))
            .filter(|entry| !in_vendor_tree(root, &entry.path))
            .map(|entry| entry.path);

        for manifest in manifests {
            let Some(dir) = manifest.parent().map(Path::to_path_buf) else {
                continue;
            };
            match system.read_to_string(&manifest) {
                Ok(contents) => match parser.module_path(&contents) {
                    Some(name) => {
                        debug!("Found module {} in {}", name, dir.display());
                        let branch = system.git_branch(&dir);
                        scan.modules.push(GoModule { name, dir, branch });
                    }
                    None => debug!("No module directive in {}", manifest.display()),
                },
                Err(err) => scan
                    .errors
                    .push(format!("cannot read '{}': {err}", manifest.display())),
            }
        }
    }

    scan.modules.sort_by(|a, b| a.name.cmp(&b.name));
    scan.modules.dedup_by(|a, b| a.name == b.name);
    scan
}

fn in_vendor_tree(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root).is_ok_and(|relative| {
        relative
            .components()
            .any(|component| component == Component::Normal(OsStr::new(VENDOR)))
    })
}
