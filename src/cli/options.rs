//! Options record and the resolver that finalizes it

use crate::error::ParseError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Output verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    Silent,
    /// Bare names only, for `|` chaining
    NameOnly,
    Error,
    Warn,
    #[default]
    Normal,
    Debug,
}

impl LogLevel {
    /// Filter directive for the tracing subscriber
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Silent => "off",
            Self::NameOnly | Self::Error => "error",
            Self::Warn => "warn",
            Self::Normal => "info",
            Self::Debug => "debug",
        }
    }

    /// Whether status lines (summaries, "All clean!") should be printed
    #[must_use]
    pub const fn shows_status(self) -> bool {
        !matches!(self, Self::Silent | Self::NameOnly)
    }
}

impl FromStr for LogLevel {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "silent" => Ok(Self::Silent),
            "name-only" | "nameonly" => Ok(Self::NameOnly),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "normal" | "info" => Ok(Self::Normal),
            "debug" => Ok(Self::Debug),
            _ => Err(ParseError::InvalidLogLevel {
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Silent => "SILENT",
            Self::NameOnly => "NAMEONLY",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Normal => "NORMAL",
            Self::Debug => "DEBUG",
        };
        f.write_str(name)
    }
}

/// Resolved configuration for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Lower-cased action identifier, never empty
    pub action: String,
    /// Dependency name filters, in argument order
    pub filter_dependencies: Vec<String>,
    /// Directories to crawl, never empty
    pub target_directories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
    pub commit: bool,
    pub pull_request: bool,
    pub tag: bool,
    pub log_level: LogLevel,
}

/// Options as the parser accumulates them, before resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftOptions {
    pub action: Option<String>,
    pub arguments: Vec<String>,
    pub target_directories: Vec<String>,
    pub branch: Option<String>,
    pub commit_message: Option<String>,
    pub commit: bool,
    pub pull_request: bool,
    pub tag: bool,
    name_only: bool,
    log_level: Option<LogLevel>,
}

impl DraftOptions {
    /// Switch to name-only output; later log-level assignments are ignored
    #[inline]
    pub fn set_name_only(&mut self) {
        self.name_only = true;
        self.log_level = Some(LogLevel::NameOnly);
    }

    /// Assign an explicit log level unless name-only output is already on
    #[inline]
    pub fn set_log_level(&mut self, level: LogLevel) {
        if self.name_only {
            return;
        }
        self.log_level = Some(level);
    }

    #[must_use]
    pub const fn name_only(&self) -> bool {
        self.name_only
    }

    #[must_use]
    pub const fn log_level(&self) -> Option<LogLevel> {
        self.log_level
    }
}

/// Apply defaults and normalization to a draft
///
/// # Errors
///
/// Returns an error if:
/// - No action was found, or the action is the empty string
#[inline]
pub fn resolve(draft: DraftOptions) -> Result<Options, ParseError> {
    let action = match draft.action {
        Some(action) if !action.is_empty() => action.to_lowercase(),
        _ => return Err(ParseError::unable_to_parse_action(None)),
    };

    let target_directories = if draft.target_directories.is_empty() {
        vec![".".to_owned()]
    } else {
        draft.target_directories
    };

    let log_level = if draft.name_only {
        LogLevel::NameOnly
    } else {
        draft.log_level.unwrap_or_default()
    };

    return Ok(Options {
        action,
        filter_dependencies: draft.arguments,
        target_directories,
        branch: draft.branch,
        commit_message: draft.commit_message,
        commit: draft.commit,
        pull_request: draft.pull_request,
        tag: draft.tag,
        log_level,
    });
}
