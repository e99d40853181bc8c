//! Dispatcher
//!
//! Turns parse results and resolved actions into exit paths. Every failure
//! comes back as a `GomuError` so the caller can pick the exit code; usage
//! and status output are written to the sink handed in.

use crate::cli::help::{render_help, render_usage};
use crate::cli::options::Options;
use crate::cli::parser;
use crate::cli::registry::{Behavior, Registry};
use crate::config::AppContext;
use crate::engine::SyncEngine;
use crate::error::GomuError;
use anyhow::Result;
use std::ffi::OsStr;
use std::io::Write;
use tracing::{debug, info};

/// Routes an invocation to help, version or the sync engine
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'src> {
    registry: &'src Registry,
    context: &'src AppContext,
}

impl<'src> Dispatcher<'src> {
    #[must_use]
    pub const fn new(registry: &'src Registry, context: &'src AppContext) -> Self {
        return Self { registry, context };
    }

    /// Parse the argument vector, printing full usage before failing
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An argument is not UTF-8 or the arguments cannot be parsed
    ///   (`GomuError::Parse`)
    /// - Usage cannot be written
    #[inline]
    pub fn parse<S: AsRef<OsStr>, O: Write>(&self, args: &[S], out: &mut O) -> Result<Options> {
        let parsed = parser::utf8_args(args)
            .and_then(|args| parser::parse(self.registry, args.as_slice()));
        match parsed {
            Ok(options) => Ok(options),
            Err(err) => {
                write!(out, "{}", render_usage(self.registry, self.context))?;
                Err(GomuError::from(err).into())
            }
        }
    }

    /// Carry out the resolved action
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The action is not supported (`GomuError::UnsupportedAction`)
    /// - The engine reports errors (`GomuError::Sync`)
    /// - Output cannot be written
    pub fn dispatch<O: Write>(
        &self,
        options: Options,
        engine: &mut dyn SyncEngine,
        out: &mut O,
    ) -> Result<()> {
        if options.action.trim().is_empty() {
            write!(out, "{}", render_usage(self.registry, self.context))?;
            return Ok(());
        }

        let Some(spec) = self.registry.action(&options.action) else {
            write!(out, "{}", render_usage(self.registry, self.context))?;
            return Err(GomuError::unsupported_action(options.action).into());
        };

        match spec.behavior {
            Behavior::PrintVersion => {
                writeln!(out, "{}", self.context.version_line())?;
                Ok(())
            }
            Behavior::PrintHelp => {
                let topic = options.filter_dependencies.first().map(String::as_str);
                write!(out, "{}", render_help(self.registry, self.context, topic))?;
                Ok(())
            }
            Behavior::RunEngine { clean_cache } => {
                debug!("Options: {}", serde_json::to_string(&options)?);
                if clean_cache {
                    info!("Cleaning module cache before {}", options.action);
                    engine.clean_cache();
                }

                let report = engine.run(&options);
                let summary = report
                    .stats
                    .format(&options.action, options.branch.as_deref());
                let show_status = options.log_level.shows_status();

                if report.is_clean() {
                    if show_status {
                        writeln!(out, "All clean!")?;
                        writeln!(out, "{summary}")?;
                    }
                    return Ok(());
                }

                if show_status {
                    writeln!(out, "{summary}")?;
                }
                Err(GomuError::Sync {
                    errors: report.errors,
                }
                .into())
            }
        }
    }
}
