//! DB2 capabilities.

use seekql::{
    DialectCapabilities, LimitSyntax, NullOrdering, ReturningForm, WithClauseForm,
};

/// Capabilities of DB2 LUW.
///
/// Limits render as `FETCH FIRST ... ROWS ONLY`; offsets need the
/// row-number emulation wrap. Mutating statements return columns by
/// being wrapped as `SELECT ... FROM FINAL TABLE ( ... )` (old table
/// for DELETE), which also works embedded in a surrounding query.
pub fn capabilities() -> DialectCapabilities {
    DialectCapabilities {
        supports_row_value_comparison: false,
        limit_syntax: LimitSyntax::FetchFirst,
        limit_includes_offset: false,
        returning_form: ReturningForm::FromFinalTable,
        supports_returning_in_subquery: true,
        with_clause_form: WithClauseForm::With,
        default_null_ordering: NullOrdering::NullsLargest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db2_profile() {
        let caps = capabilities();
        assert_eq!(caps.limit_syntax, LimitSyntax::FetchFirst);
        assert_eq!(caps.returning_form, ReturningForm::FromFinalTable);
        assert!(caps.supports_returning_in_subquery);
    }
}
