//! Payload normalizer
//!
//! Converts nested payloads holding scalars, sequences, maps and registered
//! typed instances into strictly JSON-compatible trees, ready for encoding.
//!
//! ```
//! use normconv::{MappingEntry, MappingRegistry, Node, Normalizer, Record};
//! use serde_json::json;
//!
//! let normalizer = Normalizer::new(MappingRegistry::new(vec![
//!     MappingEntry::new("Money", "amount", "toFloat"),
//! ]));
//! let money = Record::new("Money").with_value("toFloat", json!(9.99));
//!
//! let payload = Node::seq(vec![Node::map(vec![("price", Node::instance(money))])]);
//! assert_eq!(normalizer.convert(&payload).unwrap(), json!([{"price": 9.99}]));
//! ```

pub mod cli;
pub mod conversion;
pub mod error;
pub mod mapping;
pub mod node;
pub mod parser;
pub mod validation;

// Re-export commonly used types
pub use conversion::{ConversionStats, Normalizer, NormalizerOptions};
pub use error::{ConversionError, NormalizeError, NormalizeResult, ParseError};
pub use mapping::{Mappable, MappingConfig, MappingEntry, MappingRegistry, Record};
pub use node::{MapKey, Node, Scalar};
pub use parser::PayloadSource;
pub use validation::{KeyConsistencyValidator, KeyStyle};

/// Normalize `data` with a one-off normalizer built from a `classes` table
pub fn convert(classes: &serde_json::Value, data: &Node) -> NormalizeResult<serde_json::Value> {
    Normalizer::from_config(classes)?.convert(data)
}
