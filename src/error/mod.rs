//! Error types for payload normalization and the surfaces around it

use anyhow::Error;
use std::fmt;
use std::path::PathBuf;

/// Failures raised by the normalization core
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("No data conversion mapping configured for \"{type_name}\" (at {path})")]
    NoMappingFound { type_name: String, path: String },

    #[error(
        "Invalid payload data at {path}. Must be null, a sequence, a map or a mapped instance ({found} given)"
    )]
    InvalidPayload { found: String, path: String },

    #[error(
        "Invalid data map at {path}. Either set own keys for all the items or do not specify any keys at all ({sequential} sequential, {associative} associative)"
    )]
    MixedKeys {
        path: String,
        sequential: usize,
        associative: usize,
    },

    #[error("Duplicate key \"{key}\" in data map at {path}")]
    DuplicateKey { key: String, path: String },

    #[error("Type \"{type_name}\" has no extraction method \"{method}\" (at {path})")]
    MissingMethod {
        type_name: String,
        method: String,
        path: String,
    },

    #[error("Maximum nesting depth ({limit}) exceeded at {path}")]
    DepthExceeded { limit: usize, path: String },
}

impl NormalizeError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn no_mapping(type_name: impl Into<String>) -> Self {
        Self::NoMappingFound {
            type_name: type_name.into(),
            path: ROOT_PATH.to_string(),
        }
    }

    pub fn invalid_payload(found: impl Into<String>) -> Self {
        Self::InvalidPayload {
            found: found.into(),
            path: ROOT_PATH.to_string(),
        }
    }

    /// Relocate the error to the node at `at`. Configuration errors have no location.
    pub fn at(mut self, at: &str) -> Self {
        match &mut self {
            Self::InvalidConfiguration { .. } => {}
            Self::NoMappingFound { path, .. }
            | Self::InvalidPayload { path, .. }
            | Self::MixedKeys { path, .. }
            | Self::DuplicateKey { path, .. }
            | Self::MissingMethod { path, .. }
            | Self::DepthExceeded { path, .. } => *path = at.to_string(),
        }
        self
    }

    /// Location of the failing node, if the error has one
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::InvalidConfiguration { .. } => None,
            Self::NoMappingFound { path, .. }
            | Self::InvalidPayload { path, .. }
            | Self::MixedKeys { path, .. }
            | Self::DuplicateKey { path, .. }
            | Self::MissingMethod { path, .. }
            | Self::DepthExceeded { path, .. } => Some(path),
        }
    }
}

/// Path of the root node in error locations
pub const ROOT_PATH: &str = "$";

/// Main error type for everything around the core: files, parsing, the CLI
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error(transparent)]
    Other(#[from] Error),
}

impl ConversionError {
    pub fn parse(message: String, location: Option<(usize, usize)>) -> Self {
        Self::ParseError(ParseError::new(message, location))
    }

    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn other(error: Error) -> Self {
        Self::Other(error)
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => {
                if let Some((line, col)) = err.location {
                    format!(
                        "JSON parse error at line {}, column {}: {}",
                        line, col, err.message
                    )
                } else {
                    format!("Parse error: {}", err.message)
                }
            }
            Self::Normalize(err) => match err {
                NormalizeError::NoMappingFound { type_name, path } => format!(
                    "No mapping for \"{}\" at {}. Add a [[classes]] entry for it to the mapping file",
                    type_name, path
                ),
                NormalizeError::MixedKeys { path, .. } => format!(
                    "Map at {} mixes index keys and named keys; use one style per map",
                    path
                ),
                _ => err.to_string(),
            },
            Self::Io { message, path } => match path {
                Some(path) => format!("IO error on {}: {}", path.display(), message),
                None => format!("IO error: {}", message),
            },
            Self::Other(err) => {
                format!("Unexpected error: {}", err)
            }
        }
    }
}

/// Parsing errors for payloads and mapping files
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: Option<(usize, usize)>,
}

impl ParseError {
    pub fn new(message: String, location: Option<(usize, usize)>) -> Self {
        Self { message, location }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(error: serde_json::Error) -> Self {
        let location = if error.line() > 0 {
            Some((error.line(), error.column()))
        } else {
            None
        };
        Self::new(format!("Invalid JSON: {}", error), location)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for the normalization core
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
