//! Sync engine contract
//!
//! The dispatcher hands a resolved `Options` record to a `SyncEngine` and
//! reads back a `SyncReport`. Engines collect errors instead of failing fast.

pub mod mock;
pub mod module;
pub mod workspace;

pub use mock::RecordingEngine;
pub use module::{GoModule, ManifestParser, ModuleScan, discover_modules};
pub use workspace::WorkspaceEngine;

use crate::cli::options::Options;
use serde::Serialize;

/// Counters accumulated during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    pub processed: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl SyncStats {
    /// One-line summary of the run
    #[must_use]
    pub fn format(&self, action: &str, branch: Option<&str>) -> String {
        let mut summary = format!(
            "{action}: {} processed, {} updated, {} skipped",
            self.processed, self.updated, self.skipped
        );
        if let Some(branch) = branch {
            summary.push_str(&format!(" (branch {branch})"));
        }
        summary
    }
}

/// Outcome of an engine run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub stats: SyncStats,
    pub errors: Vec<String>,
}

impl SyncReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// External collaborator that walks the dependency chain
pub trait SyncEngine {
    /// Drop any cached dependency-resolution state
    fn clean_cache(&mut self);

    /// Perform the action named in `options`
    fn run(&mut self, options: &Options) -> SyncReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_format() {
        let stats = SyncStats {
            processed: 3,
            updated: 1,
            skipped: 2,
        };
        assert_eq!(
            stats.format("sync", None),
            "sync: 3 processed, 1 updated, 2 skipped"
        );
        assert_eq!(
            stats.format("pull", Some("feature/x")),
            "pull: 3 processed, 1 updated, 2 skipped (branch feature/x)"
        );
    }

    #[test]
    fn test_report_cleanliness() {
        let mut report = SyncReport::default();
        assert!(report.is_clean());
        report.errors.push("boom".to_owned());
        assert!(!report.is_clean());
    }
}
