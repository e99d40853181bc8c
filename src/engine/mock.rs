//! Recording engine for tests

use super::{SyncEngine, SyncReport};
use crate::cli::options::Options;

/// Engine double that remembers what it was asked to do
///
/// # Example
/// ```
/// use gomu::engine::{RecordingEngine, SyncEngine, SyncReport};
///
/// let mut engine = RecordingEngine::new(SyncReport::default());
/// engine.clean_cache();
/// assert_eq!(engine.cache_cleans, 1);
/// assert!(engine.runs.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    /// Report returned by every `run`
    pub report: SyncReport,
    /// Options received, in call order
    pub runs: Vec<Options>,
    pub cache_cleans: usize,
    /// Number of `run` calls that happened after at least one cache clean
    pub runs_after_clean: usize,
}

impl RecordingEngine {
    #[must_use]
    pub fn new(report: SyncReport) -> Self {
        Self {
            report,
            ..Self::default()
        }
    }
}

impl SyncEngine for RecordingEngine {
    fn clean_cache(&mut self) {
        self.cache_cleans += 1;
    }

    fn run(&mut self, options: &Options) -> SyncReport {
        if self.cache_cleans > 0 {
            self.runs_after_clean += 1;
        }
        self.runs.push(options.clone());
        self.report.clone()
    }
}
