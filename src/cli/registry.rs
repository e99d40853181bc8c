//! Flag and action registry
//!
//! Static description of every recognized action and global flag. The parser
//! looks identifiers up here, the help formatter iterates it, and the
//! dispatcher reads each action's behavior from it.

use crate::error::GomuError;
use std::collections::HashMap;

/// Closed set of actions gomu understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    List,
    Pull,
    Reset,
    ReplaceLocal,
    Sync,
    Deploy,
    Help,
    Version,
}

/// What the dispatcher does with an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Print the version string and exit successfully
    PrintVersion,
    /// Render usage and exit successfully
    PrintHelp,
    /// Hand the options to the sync engine, clearing its cache first if asked
    RunEngine { clean_cache: bool },
}

/// Descriptor for one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub action: Action,
    /// Accepted spellings, canonical first
    pub identifiers: &'static [&'static str],
    pub summary: &'static str,
    pub usage: &'static str,
    pub behavior: Behavior,
}

impl ActionSpec {
    /// Canonical identifier
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.identifiers[0]
    }
}

/// Global flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Include,
    Branch,
    NameOnly,
    Commit,
    PullRequest,
    Message,
    Tag,
    LogLevel,
}

/// How many values a flag consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Takes effect on its own, consumes nothing
    Boolean,
    /// Consumes the next token, later occurrences overwrite
    Single,
    /// Consumes following tokens, each one appended
    List,
}

/// Descriptor for one flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    pub flag: Flag,
    pub name: &'static str,
    pub identifiers: &'static [&'static str],
    pub kind: FlagKind,
    pub help: &'static str,
    pub usage: &'static str,
}

impl FlagSpec {
    /// Whether the flag expects a trailing value
    #[must_use]
    pub fn takes_value(&self) -> bool {
        self.kind != FlagKind::Boolean
    }
}

/// Intro shown at the top of the tool-wide usage
pub const OVERVIEW: &str = "Note - Will accept multiple arguments\n  Aggregate libs to crawl the dependency chain.\n  Providing no arguments will act on files in selected directories\n  (Be Careful!)";

pub const ACTIONS: &[ActionSpec] = &[
    ActionSpec {
        action: Action::Help,
        identifiers: &["help"],
        summary: "Prints available commands and flags.\n  Use `gomu help <command> <flags>` to get more specific info",
        usage: "gomu help sync",
        behavior: Behavior::PrintHelp,
    },
    ActionSpec {
        action: Action::Version,
        identifiers: &["version"],
        summary: "Prints current version.",
        usage: "gomu version",
        behavior: Behavior::PrintVersion,
    },
    ActionSpec {
        action: Action::List,
        identifiers: &["list"],
        summary: "Prints each file in dependency chain",
        usage: "gomu list -i hatchify",
        behavior: Behavior::RunEngine { clean_cache: false },
    },
    ActionSpec {
        action: Action::Pull,
        identifiers: &["pull"],
        summary: "Updates branch for file in dependency chain.\n  Providing a -branch will checkout given branch.\n  Creates branch if provided none exists.",
        usage: "gomu pull -b feature/Jira-Ticket",
        behavior: Behavior::RunEngine { clean_cache: false },
    },
    ActionSpec {
        action: Action::ReplaceLocal,
        identifiers: &["replace-local", "replace"],
        summary: "Replaces each versioned file in the dependency chain\n  Uses the current checked out local copy",
        usage: "gomu replace-local mod-common",
        behavior: Behavior::RunEngine { clean_cache: false },
    },
    ActionSpec {
        action: Action::Reset,
        identifiers: &["reset"],
        summary: "Reverts go.mod and go.sum back to last committed version.",
        usage: "gomu reset mod-common parg",
        behavior: Behavior::RunEngine { clean_cache: false },
    },
    ActionSpec {
        action: Action::Sync,
        identifiers: &["sync"],
        summary: "Updates modfiles\n  Conditionally performs extra tasks depending on flags.",
        usage: "gomu sync mod-common parg simply -i hatchify -c",
        behavior: Behavior::RunEngine { clean_cache: true },
    },
    ActionSpec {
        action: Action::Deploy,
        identifiers: &["deploy"],
        summary: "Syncs modfiles from a clean module cache, then commits, tags and opens pull requests as flagged.",
        usage: "gomu deploy -c -t -pr",
        behavior: Behavior::RunEngine { clean_cache: true },
    },
];

pub const FLAGS: &[FlagSpec] = &[
    FlagSpec {
        flag: Flag::Include,
        name: "-include",
        identifiers: &["-i", "-in", "-include"],
        kind: FlagKind::List,
        help: "Will aggregate files in 1 or more directories.",
        usage: "gomu list -i hatchify -i vroomy",
    },
    FlagSpec {
        flag: Flag::Branch,
        name: "-branch",
        identifiers: &["-b", "-branch"],
        kind: FlagKind::Single,
        help: "Will checkout or create said branch\n  Updating or creating a pull request\n  Depending on command and other flags.",
        usage: "gomu pull -b feature/Jira-Ticket",
    },
    FlagSpec {
        flag: Flag::NameOnly,
        name: "-name-only",
        identifiers: &["-name", "-name-only"],
        kind: FlagKind::Boolean,
        help: "Will reduce output to just the filenames changed\n  (ls-styled output for | chaining)\n  Overrides -log-level.",
        usage: "gomu list -name",
    },
    FlagSpec {
        flag: Flag::Commit,
        name: "-commit",
        identifiers: &["-c", "-commit"],
        kind: FlagKind::Boolean,
        help: "Will commit local changes if present\n  Includes all files outside of mod files",
        usage: "gomu sync -c",
    },
    FlagSpec {
        flag: Flag::PullRequest,
        name: "-pull-request",
        identifiers: &["-pr", "-pull-request"],
        kind: FlagKind::Boolean,
        help: "Will create a pull request if possible\n  Fails if on master, or if no changes",
        usage: "gomu sync -pr",
    },
    FlagSpec {
        flag: Flag::Message,
        name: "-message",
        identifiers: &["-m", "-msg", "-message"],
        kind: FlagKind::Single,
        help: "Will set a custom commit message\n  Applies to -c and -pr flags.",
        usage: "gomu sync -c -m \"Update all the things!\"",
    },
    FlagSpec {
        flag: Flag::Tag,
        name: "-tag",
        identifiers: &["-t", "-tag"],
        kind: FlagKind::Boolean,
        help: "Will increment tag if new commits since last tag\n  Requires tag previously set",
        usage: "gomu sync -t",
    },
    FlagSpec {
        flag: Flag::LogLevel,
        name: "-log-level",
        identifiers: &["-l", "-log", "-log-level"],
        kind: FlagKind::Single,
        help: "Sets output verbosity: silent, error, warn, normal (info), debug\n  Ignored when -name-only is set.",
        usage: "gomu sync -log debug",
    },
];

/// Lookup tables built over `ACTIONS` and `FLAGS`
#[derive(Debug)]
pub struct Registry {
    actions: &'static [ActionSpec],
    flags: &'static [FlagSpec],
    action_index: HashMap<&'static str, usize>,
    flag_index: HashMap<&'static str, usize>,
}

impl Registry {
    /// Build the registry over the built-in tables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Two flags or two actions share an identifier
    #[inline]
    pub fn new() -> Result<Self, GomuError> {
        Self::from_tables(ACTIONS, FLAGS)
    }

    /// Build a registry over arbitrary tables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Two flags or two actions share an identifier
    pub fn from_tables(
        actions: &'static [ActionSpec],
        flags: &'static [FlagSpec],
    ) -> Result<Self, GomuError> {
        let mut action_index = HashMap::new();
        for (index, spec) in actions.iter().enumerate() {
            for identifier in spec.identifiers {
                if let Some(previous) = action_index.insert(*identifier, index) {
                    return Err(GomuError::registry(format!(
                        "action identifier '{identifier}' is claimed by both '{}' and '{}'",
                        actions[previous].name(),
                        spec.name()
                    )));
                }
            }
        }

        let mut flag_index = HashMap::new();
        for (index, spec) in flags.iter().enumerate() {
            for identifier in spec.identifiers {
                if let Some(previous) = flag_index.insert(*identifier, index) {
                    return Err(GomuError::registry(format!(
                        "flag identifier '{identifier}' is claimed by both '{}' and '{}'",
                        flags[previous].name, spec.name
                    )));
                }
            }
        }

        return Ok(Self {
            actions,
            flags,
            action_index,
            flag_index,
        });
    }

    /// Find the flag a given identifier spells
    #[must_use]
    pub fn flag(&self, identifier: &str) -> Option<&'static FlagSpec> {
        let flags = self.flags;
        self.flag_index.get(identifier).map(|&index| &flags[index])
    }

    /// Find the action a given (already lower-cased) identifier spells
    #[must_use]
    pub fn action(&self, identifier: &str) -> Option<&'static ActionSpec> {
        let actions = self.actions;
        self.action_index
            .get(identifier)
            .map(|&index| &actions[index])
    }

    /// Actions in display order
    pub fn actions(&self) -> impl Iterator<Item = &'static ActionSpec> {
        self.actions.iter()
    }

    /// Flags in display order
    pub fn flags(&self) -> impl Iterator<Item = &'static FlagSpec> {
        self.flags.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_consistent() {
        assert!(Registry::new().is_ok());
    }

    #[test]
    fn test_flag_aliases_resolve_to_same_flag() {
        let registry = Registry::new().unwrap();

        for alias in ["-i", "-in", "-include"] {
            assert_eq!(registry.flag(alias).unwrap().flag, Flag::Include);
        }
        for alias in ["-m", "-msg", "-message"] {
            assert_eq!(registry.flag(alias).unwrap().flag, Flag::Message);
        }
        assert_eq!(registry.flag("-pr").unwrap().flag, Flag::PullRequest);
        assert!(registry.flag("-unknown").is_none());
    }

    #[test]
    fn test_replace_alias() {
        let registry = Registry::new().unwrap();
        assert_eq!(
            registry.action("replace").unwrap().action,
            Action::ReplaceLocal
        );
        assert_eq!(
            registry.action("replace-local").unwrap().action,
            Action::ReplaceLocal
        );
    }

    #[test]
    fn test_cache_clearing_actions() {
        let registry = Registry::new().unwrap();
        let clearing: Vec<Action> = registry
            .actions()
            .filter(|spec| spec.behavior == Behavior::RunEngine { clean_cache: true })
            .map(|spec| spec.action)
            .collect();
        assert_eq!(clearing, vec![Action::Sync, Action::Deploy]);
    }

    #[test]
    fn test_duplicate_flag_identifier_rejected() {
        static DUPLICATE_FLAGS: &[FlagSpec] = &[
            FlagSpec {
                flag: Flag::Branch,
                name: "-branch",
                identifiers: &["-b", "-branch"],
                kind: FlagKind::Single,
                help: "",
                usage: "",
            },
            FlagSpec {
                flag: Flag::Tag,
                name: "-bump",
                identifiers: &["-b"],
                kind: FlagKind::Boolean,
                help: "",
                usage: "",
            },
        ];

        let err = Registry::from_tables(ACTIONS, DUPLICATE_FLAGS).unwrap_err();
        assert!(err.to_string().contains("'-b'"));
    }

    #[test]
    fn test_duplicate_action_identifier_rejected() {
        static DUPLICATE_ACTIONS: &[ActionSpec] = &[
            ActionSpec {
                action: Action::Sync,
                identifiers: &["sync"],
                summary: "",
                usage: "",
                behavior: Behavior::RunEngine { clean_cache: true },
            },
            ActionSpec {
                action: Action::Deploy,
                identifiers: &["deploy", "sync"],
                summary: "",
                usage: "",
                behavior: Behavior::RunEngine { clean_cache: true },
            },
        ];

        assert!(Registry::from_tables(DUPLICATE_ACTIONS, FLAGS).is_err());
    }
}
