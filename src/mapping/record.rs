//! Dynamic mappable instances built at runtime

use crate::mapping::Mappable;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type ExtractFn = Arc<dyn Fn() -> Value + Send + Sync>;

#[derive(Clone)]
enum Extractor {
    Value(Value),
    Call(ExtractFn),
}

/// A [`Mappable`] described by data rather than by a Rust type.
///
/// ```
/// use normconv::mapping::{Mappable, Record};
/// use serde_json::json;
///
/// let money = Record::new("Money")
///     .implements("Amount")
///     .with_value("toFloat", json!(9.99));
/// assert_eq!(money.extract("toFloat"), Some(json!(9.99)));
/// ```
#[derive(Clone)]
pub struct Record {
    type_name: String,
    capabilities: Vec<String>,
    methods: Vec<(String, Extractor)>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            capabilities: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Declare a supertype or capability
    pub fn implements(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }

    /// Add a method returning a fixed value
    pub fn with_value(mut self, method: impl Into<String>, value: Value) -> Self {
        self.set(method.into(), Extractor::Value(value));
        self
    }

    /// Add a method computed on every call
    pub fn with_method<F>(mut self, method: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.set(method.into(), Extractor::Call(Arc::new(f)));
        self
    }

    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    fn set(&mut self, method: String, extractor: Extractor) {
        match self.methods.iter_mut().find(|(name, _)| *name == method) {
            Some((_, slot)) => *slot = extractor,
            None => self.methods.push((method, extractor)),
        }
    }
}

impl Mappable for Record {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn satisfies(&self, matcher: &str) -> bool {
        self.capabilities.iter().any(|c| c == matcher)
    }

    fn extract(&self, method: &str) -> Option<Value> {
        self.methods
            .iter()
            .find(|(name, _)| name == method)
            .map(|(_, extractor)| match extractor {
                Extractor::Value(value) => value.clone(),
                Extractor::Call(f) => f(),
            })
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("type_name", &self.type_name)
            .field("capabilities", &self.capabilities)
            .field(
                "methods",
                &self.methods.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
