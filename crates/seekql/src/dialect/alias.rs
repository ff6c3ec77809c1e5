//! Generated subquery aliases.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Produces unique aliases for generated subquery wrappers.
///
/// Wrapping rewrites nest the original statement inside a derived table
/// that needs an alias; collisions only matter within a single in-flight
/// statement, so a process-wide counter that wraps around at its maximum
/// is sufficient. The generator is injected into the rewriter rather
/// than kept in ambient thread-local state so tests can pin the
/// sequence.
#[derive(Debug, Default)]
pub struct AliasGenerator {
    counter: AtomicU64,
}

impl AliasGenerator {
    /// Creates a generator starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator starting at `start`, for deterministic tests.
    pub fn starting_at(start: u64) -> Self {
        Self {
            counter: AtomicU64::new(start),
        }
    }

    /// Returns the next generated alias, `_tmp_<n>`.
    pub fn next_alias(&self) -> String {
        // fetch_add wraps on overflow, which is the intended cycle.
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("_tmp_{n}")
    }

    /// A shared generator for use across rewriters.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}
