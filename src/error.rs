// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Direction of a sibling move, used to report ordering boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "cannot move up: already first"),
            Direction::Down => write!(f, "cannot move down: already last"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The remote resource does not exist. Terminal for the current view.
    #[error("Not Found: {0}")]
    NotFound(String),

    /// A local move precondition failed (first item moved up, last moved down).
    #[error("{0}")]
    OrderingBoundary(Direction),

    /// Network or service failure. Never retried automatically.
    #[error("Transport Error: {0}")]
    Transport(String),

    /// The catalog rejected submitted field values.
    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("I/O Error: {0}")]
    Io(String),
}

impl Error {
    /// Returns `true` for the terminal "resource missing" condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Message suitable for a user-facing notification.
    ///
    /// Validation messages are surfaced verbatim.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) | Error::NotFound(msg) | Error::Transport(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Transport(format!("invalid response body: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
