//! Custom error types with exit codes

use thiserror::Error;

/// Failure to turn the argument vector into an Options record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// No action could be determined, or a value-taking flag never received
    /// its value (flag followed by a flag, or flag at end of input)
    #[error("unable to parse action")]
    UnableToParseAction { token: Option<String> },

    /// The value given to the log-level flag is not a known level
    #[error("invalid log level '{value}'")]
    InvalidLogLevel { value: String },

    /// An argument is not valid UTF-8; `token` is its lossy rendering
    #[error("argument is not valid UTF-8: '{token}'")]
    InvalidUnicode { token: String },
}

impl ParseError {
    /// Create an "unable to parse action" error, optionally naming the token
    /// the parser choked on
    #[inline]
    pub fn unable_to_parse_action(token: Option<&str>) -> Self {
        Self::UnableToParseAction {
            token: token.map(str::to_owned),
        }
    }

    /// The offending token, when there is one
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::UnableToParseAction { token } => token.as_deref(),
            Self::InvalidLogLevel { value } => Some(value),
            Self::InvalidUnicode { token } => Some(token),
        }
    }
}

/// Main error type for gomu
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GomuError {
    /// Parse Error - malformed flag sequencing or missing action
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Validation Error - action identifier outside the supported set
    #[error("unsupported action: {action}")]
    UnsupportedAction { action: String },

    /// Registry Error - the flag/action tables are inconsistent
    #[error("Registry error: {message}")]
    Registry { message: String },

    /// Sync Error - the sync engine finished with accumulated errors
    #[error("Quitting with errors: {}", errors.join("; "))]
    Sync { errors: Vec<String> },
}

impl GomuError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Parse(_)
            | Self::UnsupportedAction { .. }
            | Self::Registry { .. }
            | Self::Sync { .. } => 1,
        }
    }

    /// Create an unsupported action error
    #[inline]
    pub fn unsupported_action<S: Into<String>>(action: S) -> Self {
        Self::UnsupportedAction {
            action: action.into(),
        }
    }

    /// Create a registry error
    #[inline]
    pub fn registry<S: Into<String>>(message: S) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_is_shared() {
        let missing_value = ParseError::unable_to_parse_action(Some("-branch"));
        let missing_action = ParseError::unable_to_parse_action(None);

        assert_eq!(missing_value.to_string(), missing_action.to_string());
        assert_eq!(missing_value.token(), Some("-branch"));
        assert_eq!(missing_action.token(), None);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(GomuError::from(ParseError::unable_to_parse_action(None)).exit_code(), 1);
        assert_eq!(GomuError::unsupported_action("frobnicate").exit_code(), 1);
        assert_eq!(GomuError::registry("dup").exit_code(), 1);
        assert_eq!(GomuError::Sync { errors: vec![] }.exit_code(), 1);
    }

    #[test]
    fn test_unsupported_action_names_action() {
        let err = GomuError::unsupported_action("frobnicate");
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn test_sync_error_lists_errors() {
        let err = GomuError::Sync {
            errors: vec!["first".to_owned(), "second".to_owned()],
        };
        assert_eq!(err.to_string(), "Quitting with errors: first; second");
    }
}
