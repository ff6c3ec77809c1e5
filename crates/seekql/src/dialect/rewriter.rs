//! The dialect SQL rewriter.
//!
//! Rewrites a rendered statement with the pagination, RETURNING, and
//! CTE syntax of the target engine. All transforms mutate the SQL
//! buffer in place and are applied exactly once per statement
//! compilation. Failures are deterministic input-validation errors:
//! the caller asked for something the engine cannot express.

use std::sync::Arc;

use seekql_core::{SeekqlError, SeekqlResult};

use super::alias::AliasGenerator;
use super::limit::{self, PaginationParameterOrder};
use super::{DialectCapabilities, ReturningForm, WithClauseForm};
use crate::util;

/// The kind of statement being rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// A SELECT query.
    Select,
    /// An INSERT statement.
    Insert,
    /// An UPDATE statement.
    Update,
    /// A DELETE statement.
    Delete,
}

/// One common table expression for [`SqlRewriter::apply_with_clause`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cte {
    /// The CTE name.
    pub name: String,
    /// The rendered CTE query.
    pub query: String,
}

impl Cte {
    /// Creates a CTE entry.
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
        }
    }
}

/// Applies dialect-specific clause rewrites to rendered SQL.
///
/// The rewriter is cheap to construct and stateless apart from the
/// alias generator shared by all wrapping rewrites; clone the `Arc` via
/// [`with_alias_generator`](Self::with_alias_generator) to pin alias
/// numbering in tests.
#[derive(Debug, Clone)]
pub struct SqlRewriter {
    caps: DialectCapabilities,
    aliases: Arc<AliasGenerator>,
}

impl SqlRewriter {
    /// Creates a rewriter for the given capabilities with a fresh alias
    /// generator.
    pub fn new(caps: DialectCapabilities) -> Self {
        Self {
            caps,
            aliases: AliasGenerator::shared(),
        }
    }

    /// Replaces the alias generator.
    #[must_use]
    pub fn with_alias_generator(mut self, aliases: Arc<AliasGenerator>) -> Self {
        self.aliases = aliases;
        self
    }

    /// The capabilities this rewriter targets.
    pub fn caps(&self) -> &DialectCapabilities {
        &self.caps
    }

    /// Appends or rewrites pagination clauses for the requested limit
    /// and offset. A family without the requested primitive is not an
    /// error; an equivalent nested rendering is chosen silently.
    pub fn apply_pagination(
        &self,
        sql: &mut String,
        is_subquery: bool,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> SeekqlResult<()> {
        limit::apply(sql, is_subquery, limit, offset, &self.caps, &self.aliases)
    }

    /// The positional order of limit/offset values in statements this
    /// rewriter produces, for drivers that bind them as placeholders.
    pub fn pagination_parameter_order(&self) -> PaginationParameterOrder {
        limit::parameter_order(self.caps.limit_syntax)
    }

    /// Rewrites a mutating statement to return the given columns.
    pub fn apply_returning(
        &self,
        sql: &mut String,
        statement: StatementKind,
        is_subquery: bool,
        columns: &[&str],
    ) -> SeekqlResult<()> {
        if columns.is_empty() {
            return Ok(());
        }
        if statement == StatementKind::Select {
            return Err(SeekqlError::UnsupportedFeature(
                "returning columns applies to mutating statements only".to_string(),
            ));
        }
        if self.caps.returning_form == ReturningForm::None {
            return Err(SeekqlError::ReturningNotSupported);
        }
        if is_subquery && !self.caps.supports_returning_in_subquery {
            return Err(SeekqlError::ReturningInSubquery);
        }

        match self.caps.returning_form {
            // Rejected above.
            ReturningForm::None => {}
            ReturningForm::ReturningClause => {
                sql.push_str(&format!(" returning {}", columns.join(", ")));
            }
            ReturningForm::OutputClause => {
                Self::insert_output_clause(sql, statement, columns);
            }
            ReturningForm::FromFinalTable => {
                // DELETE reads the row images from before the statement.
                let table = if statement == StatementKind::Delete {
                    "old"
                } else {
                    "final"
                };
                let wrapped = format!(
                    "select {} from {table} table ( {sql} )",
                    columns.join(", ")
                );
                *sql = wrapped;
            }
        }
        Ok(())
    }

    /// OUTPUT goes after the target clause: before VALUES or the source
    /// SELECT for INSERT, before WHERE for UPDATE and DELETE (appended
    /// when there is no WHERE).
    fn insert_output_clause(sql: &mut String, statement: StatementKind, columns: &[&str]) {
        let prefix = if statement == StatementKind::Delete {
            "deleted"
        } else {
            "inserted"
        };
        let list = columns
            .iter()
            .map(|c| format!("{prefix}.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let clause = format!(" output {list}");

        let anchor = match statement {
            StatementKind::Insert => util::index_of_top_level_ignore_case(sql, " values", 0)
                .or_else(|| util::index_of_top_level_ignore_case(sql, " select", 0)),
            _ => util::index_of_top_level_ignore_case(sql, " where ", 0),
        };
        match anchor {
            Some(idx) => sql.insert_str(idx, &clause),
            None => sql.push_str(&clause),
        }
    }

    /// Prefixes the statement with a WITH clause for the given CTEs.
    pub fn apply_with_clause(
        &self,
        sql: &mut String,
        ctes: &[Cte],
        recursive: bool,
    ) -> SeekqlResult<()> {
        if ctes.is_empty() {
            return Ok(());
        }
        match self.caps.with_clause_form {
            WithClauseForm::None => {
                return Err(SeekqlError::UnsupportedFeature(
                    "common table expressions are not supported by this dbms".to_string(),
                ));
            }
            WithClauseForm::WithRecursiveOnly if !recursive => {
                return Err(SeekqlError::UnsupportedFeature(
                    "non-recursive common table expressions are not supported by this dbms"
                        .to_string(),
                ));
            }
            WithClauseForm::With | WithClauseForm::WithRecursiveOnly => {}
        }

        let mut prefix = String::from("with ");
        if recursive {
            prefix.push_str("recursive ");
        }
        let items = ctes
            .iter()
            .map(|cte| format!("{} as ( {} )", cte.name, cte.query))
            .collect::<Vec<_>>()
            .join(", ");
        prefix.push_str(&items);
        prefix.push(' ');
        sql.insert_str(0, &prefix);
        Ok(())
    }
}
