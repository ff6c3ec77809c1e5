//! SQL Server capabilities.

use seekql::{
    DialectCapabilities, LimitSyntax, NullOrdering, ReturningForm, WithClauseForm,
};

/// Capabilities of SQL Server 2012 and later.
///
/// Pages with `OFFSET ... ROWS FETCH NEXT ... ROWS ONLY`, returns
/// columns through the OUTPUT clause, and sorts NULL as the smallest
/// value.
pub fn capabilities() -> DialectCapabilities {
    DialectCapabilities {
        supports_row_value_comparison: false,
        limit_syntax: LimitSyntax::OffsetFetch,
        limit_includes_offset: false,
        returning_form: ReturningForm::OutputClause,
        supports_returning_in_subquery: false,
        with_clause_form: WithClauseForm::With,
        default_null_ordering: NullOrdering::NullsSmallest,
    }
}

/// The SQL Server 2008 profile: no OFFSET/FETCH, so limits render as
/// `TOP` and offsets go through the row-number emulation wrap.
pub fn capabilities_2008() -> DialectCapabilities {
    DialectCapabilities {
        limit_syntax: LimitSyntax::TopN,
        ..capabilities()
    }
}
