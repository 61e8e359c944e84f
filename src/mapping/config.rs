//! Mapping configuration tables
//!
//! The `classes` table can be written as an array of entries:
//!
//! ```toml
//! [[classes]]
//! matcher = "Money"
//! key = "amount"
//! method = "toFloat"
//! ```
//!
//! or as a table keyed by matcher, in configuration order:
//!
//! ```toml
//! [classes.Money]
//! key = "amount"
//! method = "toFloat"
//! ```

use crate::error::{ConversionError, ConversionResult, NormalizeError, NormalizeResult, ParseError};
use crate::mapping::registry::{MappingEntry, MappingRegistry};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Name of the mapping table inside a configuration document
pub const CLASSES_KEY: &str = "classes";

/// Materialized mapping configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingConfig {
    pub classes: Vec<MappingEntry>,
}

/// Entry body when the table is keyed by matcher
#[derive(Debug, Deserialize)]
struct Definition {
    key: String,
    method: String,
}

impl MappingConfig {
    /// Read the mapping table from an in-memory value.
    ///
    /// Accepts `null` (no mappings), a document holding a `classes` field, or
    /// the `classes` value itself as an array of entries or a table keyed by
    /// matcher.
    pub fn from_value(value: &Value) -> NormalizeResult<Self> {
        let classes = match value {
            Value::Object(doc) if doc.contains_key(CLASSES_KEY) => &doc[CLASSES_KEY],
            other => other,
        };

        let classes = match classes {
            Value::Null => Vec::new(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let context = format!("{}[{}]", CLASSES_KEY, index);
                    let entry: MappingEntry = deserialize(item, &context)?;
                    check_entry(entry, &context)
                })
                .collect::<NormalizeResult<Vec<_>>>()?,
            Value::Object(table) => table
                .iter()
                .map(|(matcher, definition)| {
                    let context = format!("{}.{}", CLASSES_KEY, matcher);
                    let Definition { key, method } = deserialize(definition, &context)?;
                    check_entry(MappingEntry::new(matcher.as_str(), key, method), &context)
                })
                .collect::<NormalizeResult<Vec<_>>>()?,
            other => {
                return Err(NormalizeError::invalid_configuration(format!(
                    "\"{}\" mapping must be an array or a table ({} given)",
                    CLASSES_KEY,
                    value_kind(other)
                )))
            }
        };

        Ok(Self { classes })
    }

    /// Parse a JSON mapping document
    pub fn from_json_str(content: &str) -> ConversionResult<Self> {
        let value: Value = serde_json::from_str(content).map_err(ParseError::from)?;
        Ok(Self::from_value(&value)?)
    }

    /// Parse a TOML mapping document
    pub fn from_toml_str(content: &str) -> ConversionResult<Self> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| ParseError::new(format!("Invalid TOML: {}", e.message()), None))?;
        let value = serde_json::to_value(table).map_err(ParseError::from)?;
        Ok(Self::from_value(&value)?)
    }

    /// Load a mapping file; `.toml` files are read as TOML, anything else as JSON
    pub fn load(path: &Path) -> ConversionResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConversionError::io(
                format!("Failed to read mapping file: {}", e),
                Some(path.to_path_buf()),
            )
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            _ => Self::from_json_str(&content)?,
        };

        tracing::debug!(
            path = %path.display(),
            entries = config.classes.len(),
            "loaded mapping file"
        );

        Ok(config)
    }

    pub fn into_registry(self) -> MappingRegistry {
        MappingRegistry::new(self.classes)
    }
}

fn deserialize<'de, T: Deserialize<'de>>(item: &'de Value, context: &str) -> NormalizeResult<T> {
    T::deserialize(item)
        .map_err(|e| NormalizeError::invalid_configuration(format!("{}: {}", context, e)))
}

fn check_entry(entry: MappingEntry, context: &str) -> NormalizeResult<MappingEntry> {
    let empty = [
        ("matcher", &entry.matcher),
        ("key", &entry.key),
        ("method", &entry.method),
    ]
    .into_iter()
    .find(|(_, value)| value.is_empty())
    .map(|(name, _)| name);

    match empty {
        Some(name) => Err(NormalizeError::invalid_configuration(format!(
            "{}.{} must be a non-empty string",
            context, name
        ))),
        None => Ok(entry),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "table",
    }
}
