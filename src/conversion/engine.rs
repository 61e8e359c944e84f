//! Core normalization engine
//!
//! Walks a [`Node`] tree and builds a fresh JSON tree, resolving every typed
//! instance through the [`MappingRegistry`]. A root instance is wrapped under
//! its entry's key; an instance nested inside a sequence or map is replaced by
//! its raw extracted value at the same position.

use crate::conversion::config::NormalizerOptions;
use crate::conversion::stats::ConversionStats;
use crate::error::{ConversionResult, NormalizeError, NormalizeResult, ROOT_PATH};
use crate::mapping::{Mappable, MappingEntry, MappingRegistry, MatchKind};
use crate::node::{json, MapKey, Node};
use crate::parser::PayloadSource;
use crate::validation::{KeyConsistencyValidator, KeyStyle};
use serde_json::{Map, Value};
use std::fmt;
use std::time::Instant;

/// Converts payload trees into JSON-compatible values.
///
/// The registry is fixed at construction and conversion writes no shared
/// state, so one normalizer can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Normalizer {
    registry: MappingRegistry,
    validator: KeyConsistencyValidator,
    options: NormalizerOptions,
}

impl Normalizer {
    /// Create a normalizer with default options
    pub fn new(registry: MappingRegistry) -> Self {
        Self {
            registry,
            validator: KeyConsistencyValidator::new(),
            options: NormalizerOptions::default(),
        }
    }

    /// Create a normalizer with explicit options
    pub fn with_options(
        registry: MappingRegistry,
        options: NormalizerOptions,
    ) -> NormalizeResult<Self> {
        options
            .validate()
            .map_err(NormalizeError::invalid_configuration)?;

        Ok(Self {
            options,
            ..Self::new(registry)
        })
    }

    /// Create a normalizer from an in-memory `classes` configuration table
    pub fn from_config(config: &Value) -> NormalizeResult<Self> {
        Ok(Self::new(MappingRegistry::from_value(config)?))
    }

    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    pub fn options(&self) -> &NormalizerOptions {
        &self.options
    }

    /// Convert `data` into a tree free of typed instances
    pub fn convert(&self, data: &Node) -> NormalizeResult<Value> {
        self.walker().convert(data)
    }

    /// Convert `data` and report what the walk did
    pub fn convert_with_stats(&self, data: &Node) -> NormalizeResult<(Value, ConversionStats)> {
        let start_time = Instant::now();
        let mut walker = self.walker();
        let output = walker.convert(data)?;
        walker.stats.set_elapsed(start_time.elapsed());
        Ok((output, walker.stats))
    }

    fn walker(&self) -> Walker<'_> {
        Walker {
            registry: &self.registry,
            validator: self.validator,
            max_depth: self.options.max_depth,
            stats: ConversionStats::new(),
        }
    }
}

/// State of one conversion call
struct Walker<'a> {
    registry: &'a MappingRegistry,
    validator: KeyConsistencyValidator,
    max_depth: Option<usize>,
    stats: ConversionStats,
}

/// Location of a node, rendered as `$.items[0].price` only when an error needs it
#[derive(Clone, Copy)]
enum Location<'p> {
    Root,
    Child(&'p Location<'p>, &'p MapKey),
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Root => f.write_str(ROOT_PATH),
            Location::Child(parent, MapKey::Index(index)) => write!(f, "{}[{}]", parent, index),
            Location::Child(parent, MapKey::Name(name)) => write!(f, "{}.{}", parent, name),
        }
    }
}

impl<'a> Walker<'a> {
    fn convert(&mut self, data: &Node) -> NormalizeResult<Value> {
        self.stats.visit(0);

        match data {
            Node::Null => Ok(Value::Null),
            Node::Instance(instance) => self.wrap(instance.as_ref(), Location::Root),
            Node::Sequence(_) | Node::Map(_) => self.convert_array(data, Location::Root, 0),
            Node::Scalar(_) => Err(NormalizeError::invalid_payload(data.kind_name())),
        }
    }

    fn convert_array(
        &mut self,
        node: &Node,
        location: Location<'_>,
        depth: usize,
    ) -> NormalizeResult<Value> {
        if let Some(limit) = self.max_depth {
            if depth > limit {
                return Err(NormalizeError::DepthExceeded {
                    limit,
                    path: location.to_string(),
                });
            }
        }

        match node {
            Node::Null => Ok(Value::Null),
            Node::Scalar(_) => {
                Err(NormalizeError::invalid_payload(node.kind_name()).at(&location.to_string()))
            }
            Node::Instance(instance) => self.wrap(instance.as_ref(), location),
            Node::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let key = MapKey::from(index);
                    self.convert_value(item, Location::Child(&location, &key), depth + 1)
                })
                .collect::<NormalizeResult<Vec<_>>>()
                .map(Value::Array),
            Node::Map(entries) => {
                let style = self
                    .validator
                    .validate(entries.iter().map(|(key, _)| key))
                    .map_err(|e| e.at(&location.to_string()))?;
                self.stats.maps_validated += 1;

                if style == (KeyStyle::Sequential { contiguous: true }) {
                    return entries
                        .iter()
                        .map(|(key, value)| {
                            self.convert_value(value, Location::Child(&location, key), depth + 1)
                        })
                        .collect::<NormalizeResult<Vec<_>>>()
                        .map(Value::Array);
                }

                let mut fields = Map::with_capacity(entries.len());
                for (key, value) in entries {
                    let converted =
                        self.convert_value(value, Location::Child(&location, key), depth + 1)?;
                    fields.insert(key.to_string(), converted);
                }
                Ok(Value::Object(fields))
            }
        }
    }

    fn convert_value(
        &mut self,
        node: &Node,
        location: Location<'_>,
        depth: usize,
    ) -> NormalizeResult<Value> {
        self.stats.visit(depth);

        match node {
            Node::Null => Ok(Value::Null),
            Node::Scalar(scalar) => Ok(scalar.clone().into()),
            Node::Sequence(_) | Node::Map(_) => self.convert_array(node, location, depth),
            Node::Instance(instance) => {
                let entry = self.resolve(instance.as_ref(), location)?;
                invoke(instance.as_ref(), entry, location)
            }
        }
    }

    /// Root-position instance: `{ entry.key: extracted }`
    fn wrap(&mut self, instance: &dyn Mappable, location: Location<'_>) -> NormalizeResult<Value> {
        let entry = self.resolve(instance, location)?;
        let extracted = invoke(instance, entry, location)?;

        let mut wrapped = Map::with_capacity(1);
        wrapped.insert(entry.key.clone(), extracted);
        Ok(Value::Object(wrapped))
    }

    fn resolve(
        &mut self,
        instance: &dyn Mappable,
        location: Location<'_>,
    ) -> NormalizeResult<&'a MappingEntry> {
        let registry = self.registry;
        let found = registry.lookup(instance).ok_or_else(|| {
            NormalizeError::no_mapping(instance.type_name()).at(&location.to_string())
        })?;

        self.stats.instances_resolved += 1;
        match found.kind {
            MatchKind::Exact => self.stats.exact_matches += 1,
            MatchKind::Structural => self.stats.structural_matches += 1,
        }

        tracing::trace!(
            type_name = instance.type_name(),
            matcher = %found.entry.matcher,
            path = %location,
            "resolved instance"
        );

        Ok(found.entry)
    }
}

fn invoke(
    instance: &dyn Mappable,
    entry: &MappingEntry,
    location: Location<'_>,
) -> NormalizeResult<Value> {
    instance
        .extract(&entry.method)
        .ok_or_else(|| NormalizeError::MissingMethod {
            type_name: instance.type_name().to_string(),
            method: entry.method.clone(),
            path: location.to_string(),
        })
}

/// Decode a JSON payload (tagged objects become instances) and normalize it
pub fn convert_json_payload(payload: &Value, normalizer: &Normalizer) -> ConversionResult<Value> {
    let node = json::decode(payload)?;
    Ok(normalizer.convert(&node)?)
}

/// Parse a JSON payload string and normalize it
pub fn convert_json_string(content: &str, normalizer: &Normalizer) -> ConversionResult<Value> {
    let payload = PayloadSource::String(content.to_string()).parse()?;
    convert_json_payload(&payload, normalizer)
}
