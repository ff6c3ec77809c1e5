//! PostgreSQL capabilities.

use seekql::{
    DialectCapabilities, LimitSyntax, NullOrdering, ReturningForm, WithClauseForm,
};

/// Capabilities of PostgreSQL 9.5 and later.
///
/// PostgreSQL compares row values natively, pages with LIMIT/OFFSET,
/// returns columns with a trailing RETURNING clause, and sorts NULL as
/// the largest value by default.
pub fn capabilities() -> DialectCapabilities {
    DialectCapabilities {
        supports_row_value_comparison: true,
        limit_syntax: LimitSyntax::LimitOffset,
        limit_includes_offset: false,
        returning_form: ReturningForm::ReturningClause,
        supports_returning_in_subquery: false,
        with_clause_form: WithClauseForm::With,
        default_null_ordering: NullOrdering::NullsLargest,
    }
}
