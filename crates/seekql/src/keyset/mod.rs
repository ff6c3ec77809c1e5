//! Keyset pagination: anchors, page boundaries, mode resolution, and
//! the seek predicate compiler.
//!
//! Keyset (seek) pagination filters on "rows after the last seen row's
//! sort key" instead of counting rows from the start. This avoids the
//! O(offset) scan cost of offset pagination and prevents duplicate or
//! missing rows when the underlying data changes between page requests.

pub mod anchor;
pub mod mode;
pub mod predicate;

pub use anchor::{AnchorTuple, PageBoundary};
pub use mode::{resolve_mode, KeysetMode};
pub use predicate::{ClauseKind, ParameterSink, PredicateCompiler, RenderedPredicate};
