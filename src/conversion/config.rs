//! Options for payload normalization

/// Default nesting limit for a single conversion
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Normalizer options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerOptions {
    /// Maximum nesting depth; `None` leaves the limit to the call stack
    pub max_depth: Option<usize>,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl NormalizerOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum nesting depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Validate option consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == Some(0) {
            return Err("Max depth must be at least 1".to_string());
        }

        Ok(())
    }
}
