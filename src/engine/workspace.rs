//! Engine over the local workspace
//!
//! Discovers the Go modules below the target directories and answers `list`
//! itself. Actions that mutate repositories or manifests are recorded as
//! errors; they need an engine with version-control support.

use super::module::{GoModule, ManifestParser, ModuleScan, discover_modules};
use super::{SyncEngine, SyncReport, SyncStats};
use crate::cli::options::{LogLevel, Options};
use crate::system::System;
use anyhow::Result;
use std::io::Write;
use tracing::{debug, info};

/// Discovery results for one set of target directories
#[derive(Debug)]
struct CachedScan {
    targets: Vec<String>,
    scan: ModuleScan,
}

/// Engine that reads the workspace through a `System`
pub struct WorkspaceEngine<'src, W: Write> {
    system: &'src dyn System,
    parser: ManifestParser,
    out: W,
    cache: Option<CachedScan>,
}

impl<'src, W: Write> WorkspaceEngine<'src, W> {
    /// Create an engine printing listings to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The manifest parser cannot be built
    #[inline]
    pub fn new(system: &'src dyn System, out: W) -> Result<Self> {
        Ok(Self {
            system,
            parser: ManifestParser::new()?,
            out,
            cache: None,
        })
    }

    /// Whether a discovery result is currently cached
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Give back the output sink
    #[must_use]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Modules selected by `options`, discovering them if needed
    fn modules(&mut self, options: &Options) -> (Vec<GoModule>, Vec<String>) {
        let stale = self
            .cache
            .as_ref()
            .is_none_or(|cached| cached.targets != options.target_directories);
        if stale {
            debug!(
                "Discovering modules in {:?}",
                options.target_directories
            );
            let scan = discover_modules(self.system, &self.parser, &options.target_directories);
            self.cache = Some(CachedScan {
                targets: options.target_directories.clone(),
                scan,
            });
        }

        let Some(cached) = self.cache.as_ref() else {
            return (Vec::new(), Vec::new());
        };
        let modules = cached.scan.select(&options.filter_dependencies);
        (modules, cached.scan.errors.clone())
    }

    fn list(&mut self, modules: &[GoModule], log_level: LogLevel, report: &mut SyncReport) {
        info!("Listing {} module(s)", modules.len());
        for module in modules {
            let line = if log_level == LogLevel::NameOnly {
                module.name.clone()
            } else {
                match module.branch.as_deref() {
                    Some(branch) => {
                        format!("{}  {}  [{branch}]", module.name, module.dir.display())
                    }
                    None => format!("{}  {}", module.name, module.dir.display()),
                }
            };
            if let Err(err) = writeln!(self.out, "{line}") {
                report.errors.push(format!("cannot write listing: {err}"));
                return;
            }
            report.stats.processed += 1;
        }
    }
}

impl<W: Write> SyncEngine for WorkspaceEngine<'_, W> {
    fn clean_cache(&mut self) {
        debug!("Clearing cached module discovery");
        self.cache = None;
    }

    fn run(&mut self, options: &Options) -> SyncReport {
        let (modules, errors) = self.modules(options);
        let mut report = SyncReport {
            stats: SyncStats::default(),
            errors,
        };

        if options.action == "list" {
            self.list(&modules, options.log_level, &mut report);
        } else {
            report.stats.skipped = modules.len();
            report.errors.push(format!(
                "action '{}' needs a version-control sync engine; the workspace engine only lists modules",
                options.action
            ));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    fn options(action: &str) -> Options {
        Options {
            action: action.to_owned(),
            filter_dependencies: Vec::new(),
            target_directories: vec!["/work".to_owned()],
            branch: None,
            commit_message: None,
            commit: false,
            pull_request: false,
            tag: false,
            log_level: LogLevel::NameOnly,
        }
    }

    #[test]
    fn test_clean_cache_forces_rediscovery() {
        let system = MockSystem::new()
            .with_file("/work/a/go.mod", b"module example.com/a")
            .unwrap();
        let mut engine = WorkspaceEngine::new(&system, Vec::new()).unwrap();

        assert!(engine.run(&options("list")).is_clean());
        assert!(engine.is_cached());

        engine.clean_cache();
        assert!(!engine.is_cached());
    }

    #[test]
    fn test_non_list_action_is_reported() {
        let system = MockSystem::new()
            .with_file("/work/a/go.mod", b"module example.com/a")
            .unwrap();
        let mut engine = WorkspaceEngine::new(&system, Vec::new()).unwrap();

        let report = engine.run(&options("sync"));
        assert_eq!(report.stats.skipped, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("'sync'"));
        assert!(engine.into_output().is_empty());
    }
}
