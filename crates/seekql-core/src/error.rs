//! Core error types for seekql.
//!
//! This module provides the [`SeekqlError`] enum that covers all failure
//! modes of the pagination layer. Two categories exist: caller-contract
//! violations (malformed inputs, programming errors in the calling query
//! engine) and unsupported feature combinations (requests the target
//! engine fundamentally cannot satisfy). Capability gaps such as a
//! missing row-value comparison operator are deliberately *not* errors;
//! the compiler and rewriter silently select an equivalent rendering.

use thiserror::Error;

/// The primary error type for the seekql pagination layer.
///
/// All failures are deterministic input-validation errors. None are
/// retryable; this layer performs no I/O.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeekqlError {
    // ── Caller-contract violations ───────────────────────────────────

    /// The anchor tuple length does not match the sort key count.
    #[error("Anchor tuple size mismatch: {expected} sort keys but {actual} anchor values")]
    SizeMismatch {
        /// Number of sort keys in the sort specification.
        expected: usize,
        /// Number of values in the anchor tuple.
        actual: usize,
    },

    /// A keyset operation was requested with an empty key tuple.
    #[error("Keyset tuple must contain at least one value")]
    EmptyKeyset,

    /// An empty sort specification was supplied to the compiler.
    #[error("Sort specification must contain at least one sort key")]
    EmptySortSpecification,

    // ── Unsupported feature combinations ─────────────────────────────

    /// Returning columns from a subquery is not possible on this engine.
    #[error("Returning columns in a subquery is not possible for this dbms")]
    ReturningInSubquery,

    /// The engine has no way to return columns from a mutating statement.
    #[error("Returning columns is not supported by this dbms")]
    ReturningNotSupported,

    /// A feature combination the target engine cannot satisfy.
    #[error("Unsupported feature for this dbms: {0}")]
    UnsupportedFeature(String),
}

impl SeekqlError {
    /// Returns `true` if this error indicates a programming error in the
    /// calling layer (as opposed to a configuration request the target
    /// engine cannot satisfy).
    pub const fn is_caller_contract_violation(&self) -> bool {
        match self {
            Self::SizeMismatch { .. } | Self::EmptyKeyset | Self::EmptySortSpecification => true,
            Self::ReturningInSubquery
            | Self::ReturningNotSupported
            | Self::UnsupportedFeature(_) => false,
        }
    }
}

/// A convenience type alias for `Result<T, SeekqlError>`.
pub type SeekqlResult<T> = Result<T, SeekqlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mismatch_display() {
        let err = SeekqlError::SizeMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Anchor tuple size mismatch: 3 sort keys but 2 anchor values"
        );
    }

    #[test]
    fn test_caller_contract_classification() {
        assert!(SeekqlError::SizeMismatch {
            expected: 1,
            actual: 0
        }
        .is_caller_contract_violation());
        assert!(SeekqlError::EmptyKeyset.is_caller_contract_violation());
        assert!(!SeekqlError::ReturningInSubquery.is_caller_contract_violation());
        assert!(!SeekqlError::UnsupportedFeature("cte".into()).is_caller_contract_violation());
    }

    #[test]
    fn test_returning_in_subquery_display() {
        assert_eq!(
            SeekqlError::ReturningInSubquery.to_string(),
            "Returning columns in a subquery is not possible for this dbms"
        );
    }
}
