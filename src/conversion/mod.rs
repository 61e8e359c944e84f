//! Payload normalization module
//!
//! This module contains the conversion engine, its options, and statistics.

pub mod config;
pub mod engine;
pub mod stats;

pub use config::NormalizerOptions;
pub use engine::{convert_json_payload, convert_json_string, Normalizer};
pub use stats::ConversionStats;
