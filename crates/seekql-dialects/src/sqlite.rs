//! SQLite capabilities.

use seekql::{
    DialectCapabilities, LimitSyntax, NullOrdering, ReturningForm, WithClauseForm,
};

/// Capabilities of SQLite 3.35 and later.
///
/// Row-value comparison arrived in 3.15 and RETURNING in 3.35; NULL
/// sorts as the smallest value.
pub fn capabilities() -> DialectCapabilities {
    DialectCapabilities {
        supports_row_value_comparison: true,
        limit_syntax: LimitSyntax::LimitOffset,
        limit_includes_offset: false,
        returning_form: ReturningForm::ReturningClause,
        supports_returning_in_subquery: false,
        with_clause_form: WithClauseForm::With,
        default_null_ordering: NullOrdering::NullsSmallest,
    }
}
