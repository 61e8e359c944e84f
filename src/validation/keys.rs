//! Key consistency checks
//!
//! A map either uses index keys everywhere, and becomes a JSON array, or named
//! keys everywhere, and becomes a JSON object. Mixing both has no predictable
//! JSON shape and is rejected, and so is a key repeated within one map.

use crate::error::{NormalizeError, NormalizeResult, ROOT_PATH};
use crate::node::MapKey;
use std::collections::HashSet;

/// Key style of a map that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    Empty,
    /// Only index keys; `contiguous` when they run `0..n` in order
    Sequential { contiguous: bool },
    /// Only named keys
    Associative,
}

/// Rejects maps mixing sequential and associative keys or repeating a key
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyConsistencyValidator;

impl KeyConsistencyValidator {
    pub fn new() -> Self {
        Self
    }

    /// Classify the keys of a map, failing with `DuplicateKey` on a repeated
    /// key and `MixedKeys` if both styles occur
    pub fn validate<'a, I>(&self, keys: I) -> NormalizeResult<KeyStyle>
    where
        I: IntoIterator<Item = &'a MapKey>,
    {
        let mut sequential = 0usize;
        let mut associative = 0usize;
        let mut contiguous = true;
        let mut seen = HashSet::new();

        for key in keys {
            if !seen.insert(key) {
                return Err(NormalizeError::DuplicateKey {
                    key: key.to_string(),
                    path: ROOT_PATH.to_string(),
                });
            }

            match key {
                MapKey::Index(index) => {
                    contiguous &= *index == sequential as u64;
                    sequential += 1;
                }
                MapKey::Name(_) => associative += 1,
            }
        }

        match (sequential, associative) {
            (0, 0) => Ok(KeyStyle::Empty),
            (_, 0) => Ok(KeyStyle::Sequential { contiguous }),
            (0, _) => Ok(KeyStyle::Associative),
            (sequential, associative) => Err(NormalizeError::MixedKeys {
                path: ROOT_PATH.to_string(),
                sequential,
                associative,
            }),
        }
    }
}
