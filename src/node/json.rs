//! Decoding JSON payloads that carry typed instances
//!
//! An object with a `"@type"` field becomes a [`Record`] instance. Its optional
//! `"@is"` field lists the capabilities it satisfies; every other field becomes
//! a zero-argument extraction method returning that field's value.
//!
//! ```json
//! {"price": {"@type": "Money", "@is": ["Amount"], "toFloat": 9.99}}
//! ```

use crate::error::{ParseError, ParseResult};
use crate::mapping::Record;
use crate::node::{MapKey, Node, Scalar};
use serde_json::{Map, Value};

/// Field holding an instance's type tag
pub const TYPE_FIELD: &str = "@type";

/// Field holding an instance's capability list
pub const CAPABILITIES_FIELD: &str = "@is";

/// Decode a payload, turning tagged objects into instances
pub fn decode(value: &Value) -> ParseResult<Node> {
    decode_at(value, "$")
}

fn decode_at(value: &Value, path: &str) -> ParseResult<Node> {
    Ok(match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Scalar(Scalar::Bool(*b)),
        Value::Number(n) => Node::Scalar(Scalar::Number(n.clone())),
        Value::String(s) => Node::Scalar(Scalar::String(s.clone())),
        Value::Array(items) => Node::Sequence(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| decode_at(item, &format!("{}[{}]", path, index)))
                .collect::<ParseResult<_>>()?,
        ),
        Value::Object(fields) if fields.contains_key(TYPE_FIELD) => {
            Node::instance(decode_record(fields, path)?)
        }
        Value::Object(fields) => Node::Map(
            fields
                .iter()
                .map(|(key, item)| {
                    let node = decode_at(item, &format!("{}.{}", path, key))?;
                    Ok((MapKey::parse(key), node))
                })
                .collect::<ParseResult<_>>()?,
        ),
    })
}

fn decode_record(fields: &Map<String, Value>, path: &str) -> ParseResult<Record> {
    let type_name = match &fields[TYPE_FIELD] {
        Value::String(name) if !name.is_empty() => name,
        _ => {
            return Err(ParseError::new(
                format!("{} at {} must be a non-empty string", TYPE_FIELD, path),
                None,
            ))
        }
    };

    let mut record = Record::new(type_name.as_str());

    match fields.get(CAPABILITIES_FIELD) {
        None => {}
        Some(Value::String(capability)) => record = record.implements(capability.as_str()),
        Some(Value::Array(capabilities)) => {
            for capability in capabilities {
                let capability = capability.as_str().ok_or_else(|| {
                    ParseError::new(
                        format!("{} at {} must list strings", CAPABILITIES_FIELD, path),
                        None,
                    )
                })?;
                record = record.implements(capability);
            }
        }
        Some(_) => {
            return Err(ParseError::new(
                format!(
                    "{} at {} must be a string or a list of strings",
                    CAPABILITIES_FIELD, path
                ),
                None,
            ))
        }
    }

    for (method, value) in fields {
        if method != TYPE_FIELD && method != CAPABILITIES_FIELD {
            record = record.with_value(method.as_str(), value.clone());
        }
    }

    Ok(record)
}
