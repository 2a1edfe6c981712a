use std::fmt;

use thiserror::Error;

use crate::token::Position;

/// Classification of a parse failure.
///
/// `NotMatch` and `RepeatCount` are recoverable: alternation tries the next
/// option and repetition stops. `Critical` and `StackOverflow` abort the
/// enclosing alternation or repetition and propagate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ErrorKind {
    #[strum(serialize = "not match")]
    NotMatch,
    #[strum(serialize = "repeat count")]
    RepeatCount,
    #[strum(serialize = "critical error")]
    Critical,
    #[strum(serialize = "stack overflow")]
    StackOverflow,
}

impl ErrorKind {
    pub fn is_recoverable(self) -> bool {
        matches!(self, ErrorKind::NotMatch | ErrorKind::RepeatCount)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorCause {
    #[error("not match expected: {expected}, {}", describe_actual(.actual))]
    NotMatch {
        expected: String,
        actual: Option<String>,
    },
    #[error("repeat count ({label}) expected count: {expected}, actual count: {actual}")]
    RepeatCount {
        label: String,
        expected: usize,
        actual: usize,
    },
    #[error("critical error: {message}")]
    Critical { message: String },
    #[error("stack overflow: recursion depth {depth} exceeded maximum {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },
    #[error("{}", join_lines(.0))]
    Joined(Vec<ParseError>),
}

fn describe_actual(actual: &Option<String>) -> String {
    match actual {
        Some(actual) => format!("actual: {}", actual),
        None => "but not".to_string(),
    }
}

fn join_lines(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// A classified parse failure with an optional source position.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub cause: ErrorCause,
    pub pos: Option<Position>,
}

impl ParseError {
    pub fn new(cause: ErrorCause, pos: Option<Position>) -> Self {
        Self { cause, pos }
    }

    pub fn not_match(
        expected: impl Into<String>,
        actual: impl Into<String>,
        pos: Option<Position>,
    ) -> Self {
        let actual = actual.into();
        Self::new(
            ErrorCause::NotMatch {
                expected: expected.into(),
                actual: (!actual.is_empty()).then_some(actual),
            },
            pos,
        )
    }

    pub fn repeat_count(
        label: impl Into<String>,
        expected: usize,
        actual: usize,
        pos: Option<Position>,
    ) -> Self {
        Self::new(
            ErrorCause::RepeatCount {
                label: label.into(),
                expected,
                actual,
            },
            pos,
        )
    }

    pub fn critical(message: impl Into<String>, pos: Option<Position>) -> Self {
        Self::new(
            ErrorCause::Critical {
                message: message.into(),
            },
            pos,
        )
    }

    pub fn stack_overflow(depth: usize, max_depth: usize, pos: Option<Position>) -> Self {
        Self::new(ErrorCause::StackOverflow { depth, max_depth }, pos)
    }

    /// Joins several errors, keeping each one intact. A single error is
    /// returned as is.
    pub fn join(mut errors: Vec<ParseError>, pos: Option<Position>) -> Self {
        if errors.len() == 1 && pos.is_none() {
            return errors.remove(0);
        }
        Self::new(ErrorCause::Joined(errors), pos)
    }

    /// Kind of this error. Joined errors report the first unrecoverable
    /// member, else the first member.
    pub fn kind(&self) -> ErrorKind {
        match &self.cause {
            ErrorCause::NotMatch { .. } => ErrorKind::NotMatch,
            ErrorCause::RepeatCount { .. } => ErrorKind::RepeatCount,
            ErrorCause::Critical { .. } => ErrorKind::Critical,
            ErrorCause::StackOverflow { .. } => ErrorKind::StackOverflow,
            ErrorCause::Joined(errors) => errors
                .iter()
                .map(ParseError::kind)
                .find(|k| !k.is_recoverable())
                .or_else(|| errors.first().map(ParseError::kind))
                .unwrap_or(ErrorKind::NotMatch),
        }
    }

    /// True if this error, or any error joined into it, is of `kind`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        match &self.cause {
            ErrorCause::Joined(errors) => errors.iter().any(|e| e.is(kind)),
            _ => self.kind() == kind,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.is(ErrorKind::NotMatch) || self.is(ErrorKind::RepeatCount)
    }

    /// Errors joined into this one, or this error alone.
    pub fn errors(&self) -> Vec<&ParseError> {
        match &self.cause {
            ErrorCause::Joined(errors) => errors.iter().collect(),
            _ => vec![self],
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.cause, &self.pos) {
            (ErrorCause::Joined(_), None) => write!(f, "{}", self.cause),
            (cause, pos) => write!(f, "{} at {}", cause, Position::format(pos.as_ref())),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
