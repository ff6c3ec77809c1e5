//! LIMIT/OFFSET clause rewriting per syntax family.
//!
//! Each [`LimitSyntax`](super::LimitSyntax) family has one rendering
//! path. The simple families append a clause; the families without a
//! native offset rewrite the statement into a nested row-numbering form
//! and hoist the original select-list aliases into the outer SELECT so
//! the synthetic row-number column does not leak.

use seekql_core::SeekqlResult;

use super::alias::AliasGenerator;
use super::{DialectCapabilities, LimitSyntax};
use crate::util;

/// The MySQL-family sentinel emitted for "offset without limit".
const MAX_ROW_COUNT: &str = "18446744073709551615";

/// The name of the synthetic row-number column in emulation wraps.
const ROW_NUM_COLUMN: &str = "_row_num";

/// The order in which limit and offset placeholders appear in the
/// rewritten statement, for drivers that bind them positionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationParameterOrder {
    /// The family emits no pagination placeholders.
    None,
    /// The limit value precedes the offset value.
    LimitThenOffset,
    /// The offset value precedes the limit value.
    OffsetThenLimit,
}

/// The placeholder order for a syntax family.
pub fn parameter_order(syntax: LimitSyntax) -> PaginationParameterOrder {
    match syntax {
        LimitSyntax::None => PaginationParameterOrder::None,
        LimitSyntax::LimitOffsetCommaStyle | LimitSyntax::OffsetFetch => {
            PaginationParameterOrder::OffsetThenLimit
        }
        LimitSyntax::LimitOffset
        | LimitSyntax::FetchFirst
        | LimitSyntax::TopN
        | LimitSyntax::RowNumEmulation => PaginationParameterOrder::LimitThenOffset,
    }
}

/// Rewrites `sql` in place to page with the given limit and offset.
pub fn apply(
    sql: &mut String,
    is_subquery: bool,
    limit: Option<u64>,
    offset: Option<u64>,
    caps: &DialectCapabilities,
    aliases: &AliasGenerator,
) -> SeekqlResult<()> {
    if limit.is_none() && offset.is_none() {
        return Ok(());
    }

    // Engines whose limit is an absolute row-count ceiling need the
    // offset folded into the emitted limit value. The row-numbering
    // wraps compute their own bounds from the raw values instead.
    let effective_limit = limit.map(|l| {
        if caps.limit_includes_offset {
            l + offset.unwrap_or(0)
        } else {
            l
        }
    });

    match caps.limit_syntax {
        LimitSyntax::None => {}
        LimitSyntax::LimitOffset => {
            if let Some(l) = effective_limit {
                sql.push_str(&format!(" limit {l}"));
            }
            if let Some(o) = offset {
                sql.push_str(&format!(" offset {o}"));
            }
        }
        LimitSyntax::LimitOffsetCommaStyle => {
            apply_comma_style(sql, is_subquery, effective_limit, offset, aliases);
        }
        LimitSyntax::FetchFirst => match (limit, offset) {
            (l, Some(o)) => wrap_row_number(sql, l, o, aliases),
            (Some(l), None) => {
                let l = effective_limit.unwrap_or(l);
                sql.push_str(&format!(" fetch first {l} rows only"));
            }
            (None, None) => {}
        },
        LimitSyntax::OffsetFetch => {
            if let Some(l) = effective_limit {
                let o = offset.unwrap_or(0);
                sql.push_str(&format!(" offset {o} rows fetch next {l} rows only"));
            } else if let Some(o) = offset {
                sql.push_str(&format!(" offset {o} rows"));
            }
        }
        LimitSyntax::TopN => match (limit, offset) {
            (l, Some(o)) => wrap_row_number(sql, l, o, aliases),
            (Some(l), None) => insert_top(sql, effective_limit.unwrap_or(l)),
            (None, None) => {}
        },
        LimitSyntax::RowNumEmulation => match (limit, offset) {
            (l, Some(o)) => wrap_rownum(sql, l, o, aliases),
            (Some(l), None) => {
                let l = effective_limit.unwrap_or(l);
                let wrapped = format!("select * from ( {sql} ) where rownum <= {l}");
                *sql = wrapped;
            }
            (None, None) => {}
        },
    }
    Ok(())
}

fn apply_comma_style(
    sql: &mut String,
    is_subquery: bool,
    limit: Option<u64>,
    offset: Option<u64>,
    aliases: &AliasGenerator,
) {
    let clause = match (limit, offset) {
        // Offset without limit has no native spelling; the documented
        // engine idiom is a maximal sentinel limit.
        (None, Some(o)) => format!(" limit {o},{MAX_ROW_COUNT}"),
        (Some(l), Some(o)) => format!(" limit {o},{l}"),
        (Some(l), None) => format!(" limit {l}"),
        (None, None) => return,
    };
    if is_subquery {
        // The family rejects LIMIT directly inside IN/EXISTS subqueries;
        // a derived-table wrap lifts it out.
        let alias = aliases.next_alias();
        let wrapped = format!("select * from ( {sql}{clause} ) as {alias}");
        *sql = wrapped;
    } else {
        sql.push_str(&clause);
    }
}

/// `SELECT TOP <n>` insertion directly after the first SELECT keyword.
fn insert_top(sql: &mut String, limit: u64) {
    if let Some(idx) = util::index_of_ignore_case(sql, "select", 0) {
        sql.insert_str(idx + "select".len(), &format!(" top {limit}"));
    }
}

/// The outer select list of an emulation wrap: the original select-list
/// aliases when every item has a derivable name, `*` otherwise.
fn hoisted_select_list(sql: &str) -> String {
    match util::select_item_aliases(sql) {
        Some(aliases) => aliases.join(", "),
        None => "*".to_string(),
    }
}

/// Window-function row numbering for families with no native offset.
fn wrap_row_number(sql: &mut String, limit: Option<u64>, offset: u64, aliases: &AliasGenerator) {
    let outer_list = hoisted_select_list(sql);
    let inner = aliases.next_alias();
    let outer = aliases.next_alias();
    let upper = match limit {
        Some(l) => format!(" and {ROW_NUM_COLUMN} <= {}", offset + l),
        None => String::new(),
    };
    let wrapped = format!(
        "select {outer_list} from ( select {inner}.*, row_number() over (order by (select 0)) as {ROW_NUM_COLUMN} from ( {sql} ) {inner} ) {outer} where {ROW_NUM_COLUMN} > {offset}{upper}"
    );
    *sql = wrapped;
}

/// Classic ROWNUM pagination: the inner wrap applies the row-count
/// ceiling while the pseudo-column is still live, the outer filter
/// skips the offset.
fn wrap_rownum(sql: &mut String, limit: Option<u64>, offset: u64, aliases: &AliasGenerator) {
    let outer_list = hoisted_select_list(sql);
    let inner = aliases.next_alias();
    let ceiling = match limit {
        Some(l) => format!(" where rownum <= {}", offset + l),
        None => String::new(),
    };
    let wrapped = format!(
        "select {outer_list} from ( select {inner}.*, rownum {ROW_NUM_COLUMN} from ( {sql} ) {inner}{ceiling} ) where {ROW_NUM_COLUMN} > {offset}"
    );
    *sql = wrapped;
}
