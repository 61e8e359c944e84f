//! Payload input sources

pub mod directory;

use crate::error::{ParseError, ParseResult};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

/// Source of a single JSON payload
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadSource {
    /// Raw JSON string input
    String(String),
    /// Single JSON file path
    File(PathBuf),
    /// Standard input stream
    Stdin,
}

impl PayloadSource {
    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            PayloadSource::String(_) => "string input".to_string(),
            PayloadSource::File(path) => format!("file: {}", path.display()),
            PayloadSource::Stdin => "standard input".to_string(),
        }
    }

    /// Read and parse the payload
    pub fn parse(&self) -> ParseResult<Value> {
        let content = self.read_content().map_err(|e| {
            ParseError::new(
                format!("Failed to read {}: {}", self.description(), e),
                None,
            )
        })?;

        parse_from_string(&content)
    }

    /// Read content as string
    pub fn read_content(&self) -> Result<String, std::io::Error> {
        match self {
            PayloadSource::String(content) => Ok(content.clone()),
            PayloadSource::File(path) => std::fs::read_to_string(path),
            PayloadSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

/// Parse JSON from a string
fn parse_from_string(content: &str) -> ParseResult<Value> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new("Empty JSON string".to_string(), None));
    }

    Ok(serde_json::from_str(trimmed)?)
}
