//! `Gomu` - A CLI tool for synchronizing Go module dependencies
//!
//! This library turns a gomu argument vector into a validated `Options`
//! record, then either answers `help`/`version` itself or hands the record to
//! a sync engine and reports its statistics.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod system;
pub mod utils;

use anyhow::Result;
use cli::{Dispatcher, Registry};
use config::{AppContext, init_logging};
use engine::WorkspaceEngine;
use std::ffi::OsStr;
use std::io;
use system::RealSystem;

/// Main entry point for the gomu library
///
/// `args` excludes the program name; arguments that are not UTF-8 are
/// reported as parse errors.
///
/// # Errors
///
/// Returns an error if:
/// - The flag/action registry is inconsistent
/// - The arguments cannot be parsed or name an unsupported action
/// - The sync engine reports errors
/// - Output cannot be written
pub fn run<S: AsRef<OsStr>>(args: &[S]) -> Result<()> {
    let context = AppContext::new();
    let registry = Registry::new()?;
    let dispatcher = Dispatcher::new(&registry, &context);
    let mut stdout = io::stdout();

    let options = dispatcher.parse(args, &mut stdout)?;
    init_logging(options.log_level);

    let system = RealSystem::new();
    let mut engine = WorkspaceEngine::new(&system, io::stdout())?;
    dispatcher.dispatch(options, &mut engine, &mut stdout)
}
