//! Oracle capabilities.

use seekql::{
    DialectCapabilities, LimitSyntax, NullOrdering, ReturningForm, WithClauseForm,
};

/// Capabilities of Oracle 12c and later.
///
/// Pages with the standard `OFFSET ... FETCH` syntax. RETURNING INTO is
/// a host-variable construct, not a result set, so no returning form is
/// exposed here. NULL sorts as the largest value by default.
pub fn capabilities() -> DialectCapabilities {
    DialectCapabilities {
        supports_row_value_comparison: false,
        limit_syntax: LimitSyntax::OffsetFetch,
        limit_includes_offset: false,
        returning_form: ReturningForm::None,
        supports_returning_in_subquery: false,
        with_clause_form: WithClauseForm::With,
        default_null_ordering: NullOrdering::NullsLargest,
    }
}

/// The Oracle 11g profile: no OFFSET/FETCH, pagination goes through
/// ROWNUM wrapping.
pub fn capabilities_11g() -> DialectCapabilities {
    DialectCapabilities {
        limit_syntax: LimitSyntax::RowNumEmulation,
        ..capabilities()
    }
}
