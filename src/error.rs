use crate::event::GameEventError;
use crate::matches::StateError;
use crate::raw_event::RawEventError;
use std::num::ParseIntError;
use thiserror::Error;

/// Error while extracting a single field from an event payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed field")]
    Malformed,
    #[error("incomplete event body")]
    Incomplete,
    #[error("unknown cause of death {0}")]
    UnknownMeanOfDeath(u32),
}

impl From<ParseIntError> for ParseError {
    fn from(_: ParseIntError) -> Self {
        ParseError::Malformed
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0}")]
    RawEvent(#[from] RawEventError),
    #[error("{0}")]
    MalformedEvent(Box<GameEventError>),
    #[error("{0}")]
    State(#[from] StateError),
    #[error("line {line}: {source}")]
    Line { line: usize, source: Box<Error> },
}

impl From<GameEventError> for Error {
    fn from(value: GameEventError) -> Self {
        Error::MalformedEvent(Box::new(value))
    }
}

impl Error {
    /// The state tracker error behind this error, if any
    pub fn state(&self) -> Option<&StateError> {
        match self {
            Error::State(e) => Some(e),
            Error::Line { source, .. } => source.state(),
            _ => None,
        }
    }
}

pub type Result<O, E = Error> = std::result::Result<O, E>;
