//! Type-to-transformation mapping
//!
//! A [`MappingRegistry`] binds type tags (or capabilities) to the key used when
//! wrapping a root instance and the extraction method used to obtain its value.

pub mod config;
pub mod record;
pub mod registry;

pub use config::MappingConfig;
pub use record::Record;
pub use registry::{MappingEntry, MappingRegistry, Match, MatchKind};

use serde_json::Value;
use std::fmt;

/// An instance the normalizer can turn into a JSON-compatible value.
///
/// Implementors declare their exact type tag, the supertypes or capabilities
/// they satisfy, and a set of zero-argument extraction methods addressed by
/// name.
pub trait Mappable: fmt::Debug + Send + Sync {
    /// Exact type tag, compared against registry matchers first
    fn type_name(&self) -> &str;

    /// Whether this instance is-a / implements `matcher`
    fn satisfies(&self, _matcher: &str) -> bool {
        false
    }

    /// Invoke the extraction method `method`; `None` if there is no such method
    fn extract(&self, method: &str) -> Option<Value>;
}
