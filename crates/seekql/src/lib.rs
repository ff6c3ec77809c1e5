//! # seekql
//!
//! SQL generation for keyset (seek) pagination. Given an ordered sort
//! specification and the key tuple of a previously seen boundary row,
//! this crate compiles a boolean seek predicate that selects exactly the
//! rows before or after that boundary, and rewrites rendered SQL
//! statements with the LIMIT/OFFSET/FETCH, RETURNING, and WITH syntax of
//! the target database engine.
//!
//! ## Architecture
//!
//! The surrounding query engine renders its base SELECT, asks
//! [`resolve_mode`](keyset::resolve_mode) how the requested page relates
//! to the last known page boundary, asks the
//! [`PredicateCompiler`](keyset::PredicateCompiler) to render the seek
//! predicate into its WHERE clause, and finally hands the assembled SQL
//! to the [`SqlRewriter`](dialect::SqlRewriter) to append pagination
//! clauses before execution.
//!
//! Engine differences are captured in a single
//! [`DialectCapabilities`](dialect::DialectCapabilities) record instead
//! of a dialect class hierarchy; the compiler and rewriter branch on its
//! enum tags. All transforms are pure and synchronous: no I/O, no
//! locking, no shared mutable state apart from an explicit
//! [`AliasGenerator`](dialect::AliasGenerator) for generated subquery
//! aliases.
//!
//! ## Module Overview
//!
//! - [`value`] - The backend-agnostic [`Value`](value::Value) enum
//! - [`sort`] - [`SortKey`](sort::SortKey) sort specifications
//! - [`keyset`] - Anchor tuples, page boundaries, mode resolution, and
//!   the seek predicate compiler
//! - [`dialect`] - Capability descriptors and the dialect SQL rewriter
//! - [`util`] - SQL text scanning helpers

// These clippy lints are intentionally allowed for this crate:
// - too_many_lines: the predicate compiler and limit rewriter are
//   inherently large due to many match arms
// - format_push_string: format! with push_str is clearer than write!
//   for SQL generation
#![allow(clippy::too_many_lines)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]

pub mod dialect;
pub mod keyset;
pub mod sort;
pub mod util;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use dialect::{
    AliasGenerator, Cte, DialectCapabilities, LimitSyntax, NullOrdering, PaginationParameterOrder,
    ReturningForm, SqlRewriter, StatementKind, WithClauseForm,
};
pub use keyset::{
    resolve_mode, AnchorTuple, ClauseKind, KeysetMode, PageBoundary, ParameterSink,
    PredicateCompiler, RenderedPredicate,
};
pub use seekql_core::{SeekqlError, SeekqlResult};
pub use sort::{SortDirection, SortKey};
pub use value::Value;
