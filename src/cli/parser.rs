//! Argument vector parser
//!
//! Walks the arguments left to right against the registry. Flags are global
//! and single-dash (`-b`, `-branch`); value-taking flags claim the next bare
//! token. The first free bare token is the action and the rest are dependency
//! filters, except that a free bare token in last position becomes the action
//! when none has been seen yet (`gomu -i hatchify sync`).

use crate::cli::options::{DraftOptions, Options, resolve};
use crate::cli::registry::{Flag, FlagKind, FlagSpec, Registry};
use crate::error::ParseError;
use std::ffi::OsStr;

/// Parser position relative to flag values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Bare tokens are the action or positional arguments
    ExpectingFlagOrAction,
    /// The previous token was a value-taking flag that still needs its value
    ExpectingFlagValue(&'static FlagSpec),
    /// A list flag got a value; further bare tokens keep appending to it
    CollectingValues(&'static FlagSpec),
}

impl ParserState {
    /// Whether the previous flag, if any, has received its value
    #[must_use]
    pub const fn has_trailing(&self) -> bool {
        !matches!(self, Self::ExpectingFlagValue(_))
    }
}

/// Whether a token is spelled like a flag
#[must_use]
#[inline]
pub fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

/// Borrow every argument as UTF-8
///
/// # Errors
///
/// Returns an error if:
/// - Any argument is not valid UTF-8
pub fn utf8_args<S: AsRef<OsStr>>(args: &[S]) -> Result<Vec<&str>, ParseError> {
    args.iter()
        .map(|arg| {
            let arg = arg.as_ref();
            arg.to_str().ok_or_else(|| ParseError::InvalidUnicode {
                token: arg.to_string_lossy().into_owned(),
            })
        })
        .collect()
}

/// Parse and resolve an argument vector (program name excluded)
///
/// # Errors
///
/// Returns an error if:
/// - A value-taking flag is followed by another flag or ends the input
/// - No action is present
/// - The log-level flag is given an unknown level
#[inline]
pub fn parse<S: AsRef<str>>(registry: &Registry, args: &[S]) -> Result<Options, ParseError> {
    let draft = parse_draft(registry, args)?;
    resolve(draft)
}

/// Run the state machine without resolving defaults
///
/// # Errors
///
/// Returns an error if:
/// - A value-taking flag is followed by another flag or ends the input
/// - The log-level flag is given an unknown level
pub fn parse_draft<S: AsRef<str>>(
    registry: &Registry,
    args: &[S],
) -> Result<DraftOptions, ParseError> {
    let mut draft = DraftOptions::default();
    let mut state = ParserState::ExpectingFlagOrAction;
    let last = args.len().saturating_sub(1);

    for (index, arg) in args.iter().enumerate() {
        let token = arg.as_ref();

        if is_flag(token) {
            if let ParserState::ExpectingFlagValue(pending) = state {
                return Err(ParseError::unable_to_parse_action(Some(pending.name)));
            }

            state = match registry.flag(token) {
                Some(spec) if spec.takes_value() => ParserState::ExpectingFlagValue(spec),
                Some(spec) => {
                    apply_switch(&mut draft, spec.flag);
                    ParserState::ExpectingFlagOrAction
                }
                // Unknown flags are ignored
                None => ParserState::ExpectingFlagOrAction,
            };
            continue;
        }

        if index == last && state.has_trailing() && draft.action.is_none() {
            draft.action = Some(token.to_owned());
            break;
        }

        state = match state {
            ParserState::ExpectingFlagValue(spec) | ParserState::CollectingValues(spec) => {
                assign_value(&mut draft, spec.flag, token)?;
                if spec.kind == FlagKind::List {
                    ParserState::CollectingValues(spec)
                } else {
                    ParserState::ExpectingFlagOrAction
                }
            }
            ParserState::ExpectingFlagOrAction => {
                if draft.action.is_none() {
                    draft.action = Some(token.to_owned());
                } else {
                    draft.arguments.push(token.to_owned());
                }
                ParserState::ExpectingFlagOrAction
            }
        };
    }

    if let ParserState::ExpectingFlagValue(pending) = state {
        return Err(ParseError::unable_to_parse_action(Some(pending.name)));
    }

    Ok(draft)
}

fn apply_switch(draft: &mut DraftOptions, flag: Flag) {
    match flag {
        Flag::NameOnly => draft.set_name_only(),
        Flag::Commit => draft.commit = true,
        Flag::PullRequest => draft.pull_request = true,
        Flag::Tag => draft.tag = true,
        Flag::Include | Flag::Branch | Flag::Message | Flag::LogLevel => {}
    }
}

fn assign_value(draft: &mut DraftOptions, flag: Flag, value: &str) -> Result<(), ParseError> {
    match flag {
        Flag::Include => draft.target_directories.push(value.to_owned()),
        Flag::Branch => draft.branch = Some(value.to_owned()),
        Flag::Message => draft.commit_message = Some(value.to_owned()),
        Flag::LogLevel => {
            if !draft.name_only() {
                draft.set_log_level(value.parse()?);
            }
        }
        Flag::NameOnly | Flag::Commit | Flag::PullRequest | Flag::Tag => {}
    }
    Ok(())
}
