//! Statistics for a single conversion

use std::time::Duration;

/// Counters collected while walking one payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionStats {
    /// Nodes visited, including scalars and nulls
    pub nodes_visited: usize,
    /// Map nodes whose keys were validated
    pub maps_validated: usize,
    /// Instances resolved through the registry
    pub instances_resolved: usize,
    /// Resolutions decided by an exact type tag
    pub exact_matches: usize,
    /// Resolutions decided by a capability matcher
    pub structural_matches: usize,
    /// Deepest nesting level reached
    pub max_depth_reached: usize,
    /// Wall-clock time of the conversion in microseconds
    pub elapsed_us: u64,
}

impl ConversionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn visit(&mut self, depth: usize) {
        self.nodes_visited += 1;
        self.max_depth_reached = self.max_depth_reached.max(depth);
    }

    pub(crate) fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed_us = elapsed.as_micros() as u64;
    }

    /// Fold another conversion's counters into this one
    pub fn merge(&mut self, other: &ConversionStats) {
        self.nodes_visited += other.nodes_visited;
        self.maps_validated += other.maps_validated;
        self.instances_resolved += other.instances_resolved;
        self.exact_matches += other.exact_matches;
        self.structural_matches += other.structural_matches;
        self.max_depth_reached = self.max_depth_reached.max(other.max_depth_reached);
        self.elapsed_us += other.elapsed_us;
    }

    /// Generate a human-readable report
    pub fn summary(&self) -> String {
        format!(
            "Nodes visited: {}\nMaps validated: {}\nInstances resolved: {} ({} exact, {} structural)\nMax depth: {}\nProcessing time: {}us",
            self.nodes_visited,
            self.maps_validated,
            self.instances_resolved,
            self.exact_matches,
            self.structural_matches,
            self.max_depth_reached,
            self.elapsed_us
        )
    }
}
