//! Dialect capability descriptors and the dialect SQL rewriter.
//!
//! Engine differences relevant to pagination are captured in a single
//! immutable [`DialectCapabilities`] record. The compiler and rewriter
//! branch on its enum tags; there is no dialect type hierarchy. Presets
//! for concrete engines live in the `seekql-dialects` crate.

pub mod alias;
pub mod limit;
pub mod rewriter;

pub use alias::AliasGenerator;
pub use limit::PaginationParameterOrder;
pub use rewriter::{Cte, SqlRewriter, StatementKind};

/// The LIMIT/OFFSET syntax family an engine speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitSyntax {
    /// No native paging primitive; pagination is a no-op at this layer
    /// and the caller must limit the fetch at the API level.
    None,
    /// `LIMIT <limit> OFFSET <offset>`.
    LimitOffset,
    /// `LIMIT <offset>,<limit>` (MySQL family).
    LimitOffsetCommaStyle,
    /// `FETCH FIRST <limit> ROWS ONLY`, no native offset.
    FetchFirst,
    /// `OFFSET <offset> ROWS FETCH NEXT <limit> ROWS ONLY`.
    OffsetFetch,
    /// `SELECT TOP <limit>`; offsets need a row-numbering wrap.
    TopN,
    /// Pseudo-column row limiting (Oracle ROWNUM style).
    RowNumEmulation,
}

/// How an engine returns columns from a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturningForm {
    /// Returning columns is not supported.
    None,
    /// A trailing `RETURNING c1, c2` clause.
    ReturningClause,
    /// An `OUTPUT INSERTED.c/DELETED.c` clause inside the statement.
    OutputClause,
    /// Wrapping as `SELECT c1, c2 FROM FINAL TABLE ( ... )` (DB2).
    FromFinalTable,
}

/// The CTE prefix syntax an engine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithClauseForm {
    /// No CTE support.
    None,
    /// `WITH name AS ( ... )`, with `RECURSIVE` added when needed.
    With,
    /// CTEs are accepted only in their recursive form.
    WithRecursiveOnly,
}

/// Where an engine places NULL values when no explicit NULLS FIRST or
/// NULLS LAST is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullOrdering {
    /// NULL sorts before all non-NULL values (as the smallest value).
    NullsSmallest,
    /// NULL sorts after all non-NULL values (as the largest value).
    NullsLargest,
}

/// The pagination-relevant capabilities of one database engine.
///
/// The record is plain data and serde-enabled so deployments can
/// declare a dialect in configuration. The [`Default`] instance is a
/// conservative ANSI profile: no row-value comparison, LIMIT/OFFSET,
/// plain WITH, no returning support.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DialectCapabilities {
    /// Whether the engine compares same-length value tuples with a
    /// single row-value operator, e.g. `(a,b) < (x,y)`.
    pub supports_row_value_comparison: bool,
    /// The LIMIT/OFFSET syntax family.
    pub limit_syntax: LimitSyntax,
    /// Whether the emitted limit value is an absolute row-count ceiling
    /// that must be pre-summed with the offset.
    pub limit_includes_offset: bool,
    /// How the engine returns columns from mutating statements.
    pub returning_form: ReturningForm,
    /// Whether returning columns works inside a nested statement.
    pub supports_returning_in_subquery: bool,
    /// The CTE prefix syntax.
    pub with_clause_form: WithClauseForm,
    /// NULL placement when none is rendered explicitly.
    pub default_null_ordering: NullOrdering,
}

impl Default for DialectCapabilities {
    fn default() -> Self {
        Self {
            supports_row_value_comparison: false,
            limit_syntax: LimitSyntax::LimitOffset,
            limit_includes_offset: false,
            returning_form: ReturningForm::None,
            supports_returning_in_subquery: false,
            with_clause_form: WithClauseForm::With,
            default_null_ordering: NullOrdering::NullsLargest,
        }
    }
}

impl DialectCapabilities {
    /// Returns `true` if the engine can return columns from mutating
    /// statements in any form.
    pub fn supports_returning(&self) -> bool {
        self.returning_form != ReturningForm::None
    }
}
