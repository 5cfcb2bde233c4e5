//! Parsing options and configuration.

/// Default maximum nesting depth for block trees.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options for parsing block documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting depth; deeper subtrees are kept as opaque fallback
    /// blocks. Top-level blocks are at depth 1.
    pub max_depth: usize,

    /// Whether to parse the pages of a multi-page body in parallel
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth (at least 1).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            parallel: true,
        }
    }
}

/// Counters collected during one parse call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Blocks produced, nested ones included
    pub blocks: usize,

    /// Blocks that degraded to the permissive fallback
    pub fallbacks: usize,

    /// Subtrees cut off at the depth limit
    pub depth_truncations: usize,
}

impl ParseReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: ParseReport) {
        self.blocks += other.blocks;
        self.fallbacks += other.fallbacks;
        self.depth_truncations += other.depth_truncations;
    }

    /// Check if any input had to be degraded.
    pub fn is_lossy(&self) -> bool {
        self.fallbacks > 0 || self.depth_truncations > 0
    }
}
