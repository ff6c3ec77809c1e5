//! MySQL and MariaDB capabilities.

use seekql::{
    DialectCapabilities, LimitSyntax, NullOrdering, ReturningForm, WithClauseForm,
};

/// Capabilities of MySQL 8 and current MariaDB.
///
/// The family pages with the comma-style `LIMIT <offset>,<limit>`,
/// rejects LIMIT directly inside IN/EXISTS subqueries (the rewriter
/// wraps those in a derived table), has no way to return columns from
/// mutating statements, and sorts NULL as the smallest value.
pub fn capabilities() -> DialectCapabilities {
    DialectCapabilities {
        supports_row_value_comparison: true,
        limit_syntax: LimitSyntax::LimitOffsetCommaStyle,
        limit_includes_offset: false,
        returning_form: ReturningForm::None,
        supports_returning_in_subquery: false,
        with_clause_form: WithClauseForm::With,
        default_null_ordering: NullOrdering::NullsSmallest,
    }
}
