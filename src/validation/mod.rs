//! Structural validation of payload maps

pub mod keys;

pub use keys::{KeyConsistencyValidator, KeyStyle};
