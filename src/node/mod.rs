//! Input trees for normalization

pub mod json;

use crate::mapping::Mappable;
use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;

/// Key of a map node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    /// Sequential, index-like key
    Index(u64),
    /// Associative, user-provided key
    Name(String),
}

impl MapKey {
    /// Read a key the way decoded payloads carry them: canonical non-negative
    /// integers become indexes, everything else stays a name.
    pub fn parse(key: &str) -> Self {
        let canonical = key == "0"
            || (!key.is_empty()
                && !key.starts_with('0')
                && key.bytes().all(|b| b.is_ascii_digit()));

        match key.parse::<u64>() {
            Ok(index) if canonical => MapKey::Index(index),
            _ => MapKey::Name(key.to_string()),
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, MapKey::Index(_))
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Index(index) => write!(f, "{}", index),
            MapKey::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for MapKey {
    fn from(name: &str) -> Self {
        MapKey::Name(name.to_string())
    }
}

impl From<String> for MapKey {
    fn from(name: String) -> Self {
        MapKey::Name(name)
    }
}

impl From<u64> for MapKey {
    fn from(index: u64) -> Self {
        MapKey::Index(index)
    }
}

impl From<usize> for MapKey {
    fn from(index: usize) -> Self {
        MapKey::Index(index as u64)
    }
}

/// Leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    String(String),
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Number(n) => Value::Number(n),
            Scalar::String(s) => Value::String(s),
        }
    }
}

/// A node of a caller-owned payload tree
#[derive(Debug, Clone)]
pub enum Node {
    Null,
    Scalar(Scalar),
    Sequence(Vec<Node>),
    /// Ordered map; iteration order is insertion order
    Map(Vec<(MapKey, Node)>),
    Instance(Arc<dyn Mappable>),
}

impl Node {
    /// Build a map node from key/value pairs
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<MapKey>,
        V: Into<Node>,
        I: IntoIterator<Item = (K, V)>,
    {
        Node::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a sequence node
    pub fn seq<V, I>(items: I) -> Self
    where
        V: Into<Node>,
        I: IntoIterator<Item = V>,
    {
        Node::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Wrap a mappable instance
    pub fn instance<T: Mappable + 'static>(instance: T) -> Self {
        Node::Instance(Arc::new(instance))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Short name of the node's shape (or the instance's type tag)
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Null => "null",
            Node::Scalar(Scalar::Bool(_)) => "boolean",
            Node::Scalar(Scalar::Number(_)) => "number",
            Node::Scalar(Scalar::String(_)) => "string",
            Node::Sequence(_) => "sequence",
            Node::Map(_) => "map",
            Node::Instance(instance) => instance.type_name(),
        }
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Scalar(Scalar::Number(n.into()))
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Scalar(Scalar::String(s))
    }
}

impl From<Arc<dyn Mappable>> for Node {
    fn from(instance: Arc<dyn Mappable>) -> Self {
        Node::Instance(instance)
    }
}

/// Plain data: object keys go through [`MapKey::parse`], no instances are produced.
impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Node::Scalar(Scalar::Number(n)),
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(fields) => Node::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (MapKey::parse(&k), Node::from(v)))
                    .collect(),
            ),
        }
    }
}
