//! The keyset predicate compiler.
//!
//! Given a sort specification, an anchor tuple, a resolved
//! [`KeysetMode`], and the target engine's capabilities, the compiler
//! emits a boolean predicate selecting exactly the rows before or after
//! the anchor row in the sort order, together with the named parameter
//! bindings the predicate requires.
//!
//! Two rendering strategies exist. The compact *row-value form* compares
//! the whole key tuple with a single row-value operator and is used when
//! the engine supports full row-value comparison and no sort key is
//! nullable (SQL row comparison treats NULL specially and inconsistently
//! across engines). The general *expanded form* is the lexicographic
//! "greater/less than tuple" disjunction
//!
//! ```text
//! (k1 OP1 v1) OR (k1 = v1 AND (k2 OP2 v2 OR (k2 = v2 AND ( ... ))))
//! ```
//!
//! with per-key null handling driven by the key's null placement and the
//! seek direction. An *optimized* variant of the expanded form trades a
//! double negation for fewer emitted brackets; it is enabled via
//! [`PredicateCompiler::optimized`].

use seekql_core::{SeekqlError, SeekqlResult};

use super::anchor::AnchorTuple;
use super::mode::KeysetMode;
use crate::dialect::DialectCapabilities;
use crate::sort::{SortDirection, SortKey};
use crate::value::Value;

/// The statement clause a parameter is bound for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    /// The WHERE clause.
    Where,
    /// The HAVING clause.
    Having,
}

/// A named-parameter binding sink, implemented by the prepared-statement
/// layer of the surrounding query engine.
pub trait ParameterSink {
    /// Registers a named parameter value for the given clause.
    fn bind(&mut self, name: &str, value: Value, clause: ClauseKind);
}

impl ParameterSink for Vec<(String, Value)> {
    fn bind(&mut self, name: &str, value: Value, _clause: ClauseKind) {
        self.push((name.to_string(), value));
    }
}

/// A compiled seek predicate: a SQL fragment plus the ordered parameter
/// bindings it references.
///
/// The fragment's lifetime is a single statement compilation; it is
/// rendered into the WHERE clause and discarded once the statement is
/// prepared.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPredicate {
    sql: String,
    params: Vec<(String, Value)>,
}

impl RenderedPredicate {
    fn new(sql: String, params: Vec<(String, Value)>) -> Self {
        Self { sql, params }
    }

    /// An empty predicate, produced for [`KeysetMode::None`].
    pub fn empty() -> Self {
        Self::new(String::new(), Vec::new())
    }

    /// Returns `true` if no predicate was rendered.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// The rendered SQL fragment.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The ordered `(placeholder-name, value)` bindings.
    pub fn params(&self) -> &[(String, Value)] {
        &self.params
    }

    /// Registers all parameter bindings with the given sink.
    pub fn register_into(&self, sink: &mut dyn ParameterSink) {
        for (name, value) in &self.params {
            sink.bind(name, value.clone(), ClauseKind::Where);
        }
    }
}

/// Compiles seek predicates for a fixed target dialect.
///
/// # Examples
///
/// ```
/// use seekql::dialect::DialectCapabilities;
/// use seekql::keyset::{AnchorTuple, KeysetMode, PredicateCompiler};
/// use seekql::sort::SortKey;
/// use seekql::value::Value;
///
/// let compiler = PredicateCompiler::new(DialectCapabilities::default());
/// let keys = vec![SortKey::asc("name").unique(true)];
/// let anchor = AnchorTuple::new(vec![Value::from("Charlie")]);
/// let predicate = compiler.compile(&keys, &anchor, KeysetMode::Next).unwrap();
/// assert_eq!(predicate.sql(), "name > :_keysetParameter_0");
/// ```
#[derive(Debug, Clone)]
pub struct PredicateCompiler {
    caps: DialectCapabilities,
    optimized: bool,
}

impl PredicateCompiler {
    /// Creates a compiler for the given dialect capabilities.
    pub fn new(caps: DialectCapabilities) -> Self {
        Self {
            caps,
            optimized: false,
        }
    }

    /// Enables or disables the optimized (double-negation) rendering of
    /// the expanded form.
    #[must_use]
    pub fn optimized(mut self, optimized: bool) -> Self {
        self.optimized = optimized;
        self
    }

    /// Compiles the seek predicate for the given sort specification,
    /// anchor tuple, and mode.
    ///
    /// Fails with [`SeekqlError::SizeMismatch`] when the anchor length
    /// does not match the sort key count, with
    /// [`SeekqlError::EmptyKeyset`] for an empty anchor tuple, and with
    /// [`SeekqlError::EmptySortSpecification`] for an empty key list.
    /// [`KeysetMode::None`] yields an empty predicate. A dialect without
    /// row-value comparison support is not an error; the expanded form
    /// is chosen silently.
    pub fn compile(
        &self,
        sort_keys: &[SortKey],
        anchor: &AnchorTuple,
        mode: KeysetMode,
    ) -> SeekqlResult<RenderedPredicate> {
        if sort_keys.is_empty() {
            return Err(SeekqlError::EmptySortSpecification);
        }
        if mode == KeysetMode::None {
            return Ok(RenderedPredicate::empty());
        }
        if anchor.is_empty() {
            return Err(SeekqlError::EmptyKeyset);
        }
        if sort_keys.len() != anchor.len() {
            return Err(SeekqlError::SizeMismatch {
                expected: sort_keys.len(),
                actual: anchor.len(),
            });
        }

        let values = anchor.values();
        let any_nullable = sort_keys.iter().any(|k| k.nullable);

        let row_value =
            self.caps.supports_row_value_comparison && sort_keys.len() > 1 && !any_nullable;
        let sql = if row_value {
            Self::render_row_value(sort_keys, mode)
        } else {
            if self.caps.supports_row_value_comparison && sort_keys.len() > 1 && any_nullable {
                tracing::debug!(
                    "nullable sort key present, falling back from row-value to expanded form"
                );
            }
            if self.use_optimized(sort_keys, values, mode) {
                Self::render_optimized(sort_keys, values, mode)
            } else {
                Self::render_expanded(sort_keys, values, mode)
            }
        };

        // One named placeholder per non-null anchor value, in key order.
        let params = values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (parameter_name(i), v.clone()))
            .collect();

        Ok(RenderedPredicate::new(sql, params))
    }

    /// The optimized rewrite buys nothing for a single key, cannot keep
    /// the anchor row for SAME mode, and needs a comparable first anchor
    /// value.
    fn use_optimized(&self, sort_keys: &[SortKey], values: &[Value], mode: KeysetMode) -> bool {
        self.optimized && sort_keys.len() > 1 && mode != KeysetMode::Same && !values[0].is_null()
    }

    // ── Row-value form ───────────────────────────────────────────────

    fn render_row_value(sort_keys: &[SortKey], mode: KeysetMode) -> String {
        let mut lhs = Vec::with_capacity(sort_keys.len());
        let mut rhs = Vec::with_capacity(sort_keys.len());

        for (i, key) in sort_keys.iter().enumerate() {
            let placeholder = placeholder(i);
            // Normalize direction so a single row-value operator works
            // for all keys simultaneously.
            let column_left =
                (key.direction == SortDirection::Descending) != (mode == KeysetMode::Previous);
            if column_left {
                lhs.push(key.expression.clone());
                rhs.push(placeholder);
            } else {
                lhs.push(placeholder);
                rhs.push(key.expression.clone());
            }
        }

        let op = if mode == KeysetMode::Same { "<=" } else { "<" };
        format!("({}) {op} ({})", lhs.join(", "), rhs.join(", "))
    }

    // ── Expanded disjunctive form ────────────────────────────────────

    fn render_expanded(sort_keys: &[SortKey], values: &[Value], mode: KeysetMode) -> String {
        let sql = Self::expanded_level(sort_keys, values, mode, 0);
        if sort_keys.len() == 1 {
            sql
        } else {
            format!("({sql})")
        }
    }

    fn expanded_level(
        sort_keys: &[SortKey],
        values: &[Value],
        mode: KeysetMode,
        index: usize,
    ) -> String {
        let key = &sort_keys[index];
        let value = &values[index];
        let last = index + 1 == sort_keys.len();

        if last {
            return Self::last_key_comparison(key, value, mode, index);
        }

        let rest = Self::expanded_level(sort_keys, values, mode, index + 1);
        // The innermost level is a bare comparison; composite levels get
        // their own brackets when embedded.
        let rest = if index + 2 == sort_keys.len() && !rest.contains(" AND ") {
            rest
        } else {
            format!("({rest})")
        };

        let expr = &key.expression;
        let equality = if value.is_null() {
            format!("{expr} IS NULL")
        } else {
            format!("{expr} = {}", placeholder(index))
        };

        let strict = if value.is_null() {
            // Rows still to visit are non-null exactly when nulls sort
            // on the already-visited side for this seek direction.
            nulls_passed(key, mode).then(|| format!("{expr} IS NOT NULL"))
        } else {
            let cmp = format!("{expr} {} {}", strict_operator(key, mode), placeholder(index));
            Some(if key.nullable && !nulls_passed(key, mode) {
                format!("({cmp} OR {expr} IS NULL)")
            } else {
                cmp
            })
        };

        match strict {
            Some(strict) => format!("{strict} OR ({equality} AND {rest})"),
            None => format!("{equality} AND {rest}"),
        }
    }

    fn last_key_comparison(key: &SortKey, value: &Value, mode: KeysetMode, index: usize) -> String {
        let expr = &key.expression;
        if value.is_null() {
            return if mode == KeysetMode::Same {
                format!("{expr} IS NULL")
            } else if nulls_passed(key, mode) {
                format!("{expr} IS NOT NULL")
            } else {
                // Rows tied on a null key cannot be ordered further.
                "1=0".to_string()
            };
        }

        let op = if mode == KeysetMode::Same {
            inclusive_operator(key, mode)
        } else {
            strict_operator(key, mode)
        };
        let cmp = format!("{expr} {op} {}", placeholder(index));
        if key.nullable && !nulls_passed(key, mode) {
            format!("({cmp} OR {expr} IS NULL)")
        } else {
            cmp
        }
    }

    // ── Optimized (double-negation) variant ──────────────────────────

    /// Renders `k1 OP= v1 AND NOT (k1 = v1 AND <negated rest>)`, where
    /// the negated rest is the at-or-before chain of the remaining keys
    /// in the inverted seek direction. Nullable keys whose NULL rows
    /// must survive the outer NOT get `IS NOT NULL` guards so that
    /// three-valued logic cannot swallow them through UNKNOWN.
    fn render_optimized(sort_keys: &[SortKey], values: &[Value], mode: KeysetMode) -> String {
        let key = &sort_keys[0];
        let expr = &key.expression;
        let keeps_nulls = key.nullable && !nulls_passed(key, mode);
        let base = format!("{expr} {} {}", inclusive_operator(key, mode), placeholder(0));
        let base = if keeps_nulls {
            format!("({base} OR {expr} IS NULL)")
        } else {
            base
        };
        // NULL rows the base keeps must fall out of the negated factor
        // as definitely false, not unknown.
        let equality = if keeps_nulls {
            format!("{expr} IS NOT NULL AND {expr} = {}", placeholder(0))
        } else {
            format!("{expr} = {}", placeholder(0))
        };

        let inverted = invert(mode);
        let inner = Self::negated_level(sort_keys, values, inverted, 1);
        let inner = if sort_keys.len() == 2 && !inner.contains(" AND ") {
            inner
        } else {
            format!("({inner})")
        };

        format!("{base} AND NOT ({equality} AND {inner})")
    }

    fn negated_level(
        sort_keys: &[SortKey],
        values: &[Value],
        inverted: KeysetMode,
        index: usize,
    ) -> String {
        let key = &sort_keys[index];
        let value = &values[index];
        let expr = &key.expression;
        let last = index + 1 == sort_keys.len();
        // In the negated chain, NULL rows that the original predicate
        // accepts must make the chain definitely false, not unknown.
        let guard = key.nullable && nulls_passed(key, inverted);

        if last {
            if value.is_null() {
                return if nulls_passed(key, inverted) {
                    "1=1".to_string()
                } else {
                    format!("{expr} IS NULL")
                };
            }
            let cmp = format!("{expr} {} {}", inclusive_operator(key, inverted), placeholder(index));
            return if guard {
                format!("{expr} IS NOT NULL AND {cmp}")
            } else {
                cmp
            };
        }

        let rest = Self::negated_level(sort_keys, values, inverted, index + 1);
        let rest = if index + 2 == sort_keys.len() && !rest.contains(" AND ") {
            rest
        } else {
            format!("({rest})")
        };

        if value.is_null() {
            let equality = format!("{expr} IS NULL");
            return if nulls_passed(key, inverted) {
                format!("{expr} IS NOT NULL OR ({equality} AND {rest})")
            } else {
                format!("{equality} AND {rest}")
            };
        }

        let cmp = format!("{expr} {} {}", strict_operator(key, inverted), placeholder(index));
        let equality = format!("{expr} = {}", placeholder(index));
        if guard {
            format!("{expr} IS NOT NULL AND {cmp} OR ({expr} IS NOT NULL AND {equality} AND {rest})")
        } else {
            format!("{cmp} OR ({equality} AND {rest})")
        }
    }
}

/// The named-parameter identifier for the anchor value at `index`.
fn parameter_name(index: usize) -> String {
    format!("_keysetParameter_{index}")
}

/// The rendered placeholder reference for the anchor value at `index`.
fn placeholder(index: usize) -> String {
    format!(":_keysetParameter_{index}")
}

/// Whether NULL values of this key lie on the already-visited side for
/// the given seek direction.
fn nulls_passed(key: &SortKey, mode: KeysetMode) -> bool {
    key.nulls_first != (mode == KeysetMode::Previous)
}

/// The strict comparison operator for a key under the given mode.
fn strict_operator(key: &SortKey, mode: KeysetMode) -> &'static str {
    if seeks_greater(key, mode) {
        ">"
    } else {
        "<"
    }
}

/// The inclusive comparison operator for a key under the given mode.
fn inclusive_operator(key: &SortKey, mode: KeysetMode) -> &'static str {
    if seeks_greater(key, mode) {
        ">="
    } else {
        "<="
    }
}

/// Whether "rows still to visit" compare greater on this key.
fn seeks_greater(key: &SortKey, mode: KeysetMode) -> bool {
    key.is_ascending() != (mode == KeysetMode::Previous)
}

fn invert(mode: KeysetMode) -> KeysetMode {
    match mode {
        KeysetMode::Next => KeysetMode::Previous,
        KeysetMode::Previous => KeysetMode::Next,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps_plain() -> DialectCapabilities {
        DialectCapabilities {
            supports_row_value_comparison: false,
            ..DialectCapabilities::default()
        }
    }

    fn caps_row_value() -> DialectCapabilities {
        DialectCapabilities {
            supports_row_value_comparison: true,
            ..DialectCapabilities::default()
        }
    }

    fn compile(
        keys: &[SortKey],
        anchor: Vec<Value>,
        mode: KeysetMode,
    ) -> RenderedPredicate {
        PredicateCompiler::new(caps_plain())
            .compile(keys, &AnchorTuple::new(anchor), mode)
            .unwrap()
    }

    // ── Contract violations ──────────────────────────────────────────

    #[test]
    fn test_size_mismatch() {
        let keys = vec![SortKey::asc("a"), SortKey::asc("id").unique(true)];
        let err = PredicateCompiler::new(caps_plain())
            .compile(&keys, &AnchorTuple::new(vec![Value::from(1_i64)]), KeysetMode::Next)
            .unwrap_err();
        assert_eq!(
            err,
            SeekqlError::SizeMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_empty_sort_specification() {
        let err = PredicateCompiler::new(caps_plain())
            .compile(&[], &AnchorTuple::new(vec![]), KeysetMode::Next)
            .unwrap_err();
        assert_eq!(err, SeekqlError::EmptySortSpecification);
    }

    #[test]
    fn test_empty_anchor() {
        let keys = vec![SortKey::asc("id").unique(true)];
        let err = PredicateCompiler::new(caps_plain())
            .compile(&keys, &AnchorTuple::new(vec![]), KeysetMode::Next)
            .unwrap_err();
        assert_eq!(err, SeekqlError::EmptyKeyset);
    }

    #[test]
    fn test_mode_none_renders_nothing() {
        let keys = vec![SortKey::asc("id").unique(true)];
        let predicate = compile(&keys, vec![Value::from(5_i64)], KeysetMode::None);
        assert!(predicate.is_empty());
        assert!(predicate.params().is_empty());
    }

    // ── Single-key scenarios ─────────────────────────────────────────

    #[test]
    fn test_single_key_next() {
        let keys = vec![SortKey::asc("name").unique(true)];
        let predicate = compile(&keys, vec![Value::from("Charlie")], KeysetMode::Next);
        assert_eq!(predicate.sql(), "name > :_keysetParameter_0");
        assert_eq!(
            predicate.params(),
            &[("_keysetParameter_0".to_string(), Value::from("Charlie"))]
        );
    }

    #[test]
    fn test_single_key_previous() {
        let keys = vec![SortKey::asc("name").unique(true)];
        let predicate = compile(&keys, vec![Value::from("Charlie")], KeysetMode::Previous);
        assert_eq!(predicate.sql(), "name < :_keysetParameter_0");
    }

    #[test]
    fn test_single_key_same_is_inclusive() {
        let keys = vec![SortKey::asc("name").unique(true)];
        let predicate = compile(&keys, vec![Value::from("Charlie")], KeysetMode::Same);
        assert_eq!(predicate.sql(), "name >= :_keysetParameter_0");
    }

    #[test]
    fn test_single_descending_key_next() {
        let keys = vec![SortKey::desc("id").unique(true)];
        let predicate = compile(&keys, vec![Value::from(9_i64)], KeysetMode::Next);
        assert_eq!(predicate.sql(), "id < :_keysetParameter_0");
    }

    // ── Nullable keys ────────────────────────────────────────────────

    #[test]
    fn test_nullable_desc_nulls_first_null_anchor() {
        // Nulls-first descending means nulls are the first entries
        // already visited when moving forward; NEXT excludes remaining
        // nulls only via the tie-break on id.
        let keys = vec![
            SortKey::desc("age").nullable(true),
            SortKey::asc("id").unique(true),
        ];
        let predicate = compile(&keys, vec![Value::Null, Value::from(42_i64)], KeysetMode::Next);
        assert_eq!(
            predicate.sql(),
            "(age IS NOT NULL OR (age IS NULL AND id > :_keysetParameter_1))"
        );
        assert_eq!(
            predicate.params(),
            &[("_keysetParameter_1".to_string(), Value::from(42_i64))]
        );
    }

    fn nulls_matrix_keys() -> Vec<SortKey> {
        vec![
            SortKey::asc("k.a").nullable(true).nulls_first(true),
            SortKey::asc("k.b").nullable(true).nulls_first(true),
            SortKey::asc("k.id").nulls_first(true).unique(true),
        ]
    }

    #[test]
    fn test_matrix_all_null_anchor_next() {
        let predicate = compile(
            &nulls_matrix_keys(),
            vec![Value::Null, Value::Null, Value::from(1_i64)],
            KeysetMode::Next,
        );
        assert_eq!(
            predicate.sql(),
            "(k.a IS NOT NULL OR (k.a IS NULL AND (k.b IS NOT NULL OR (k.b IS NULL AND k.id > :_keysetParameter_2))))"
        );
    }

    #[test]
    fn test_matrix_mixed_anchor_next() {
        let predicate = compile(
            &nulls_matrix_keys(),
            vec![Value::Null, Value::from(0_i64), Value::from(7_i64)],
            KeysetMode::Next,
        );
        assert_eq!(
            predicate.sql(),
            "(k.a IS NOT NULL OR (k.a IS NULL AND (k.b > :_keysetParameter_1 OR (k.b = :_keysetParameter_1 AND k.id > :_keysetParameter_2))))"
        );
    }

    #[test]
    fn test_matrix_non_null_anchor_next() {
        let predicate = compile(
            &nulls_matrix_keys(),
            vec![Value::from(0_i64), Value::from(1_i64), Value::from(12_i64)],
            KeysetMode::Next,
        );
        assert_eq!(
            predicate.sql(),
            "(k.a > :_keysetParameter_0 OR (k.a = :_keysetParameter_0 AND (k.b > :_keysetParameter_1 OR (k.b = :_keysetParameter_1 AND k.id > :_keysetParameter_2))))"
        );
    }

    #[test]
    fn test_matrix_previous_adds_null_branch() {
        // Moving backward with nulls-first placement, the nulls are
        // still ahead, so the strict comparison keeps NULL rows.
        let predicate = compile(
            &nulls_matrix_keys(),
            vec![Value::from(1_i64), Value::Null, Value::from(5_i64)],
            KeysetMode::Previous,
        );
        assert_eq!(
            predicate.sql(),
            "((k.a < :_keysetParameter_0 OR k.a IS NULL) OR (k.a = :_keysetParameter_0 AND (k.b IS NULL AND k.id < :_keysetParameter_2)))"
        );
    }

    #[test]
    fn test_nulls_last_null_anchor_has_no_strict_branch() {
        let keys = vec![
            SortKey::asc("k.a").nullable(true),
            SortKey::asc("k.id").unique(true),
        ];
        let predicate = compile(&keys, vec![Value::Null, Value::from(1_i64)], KeysetMode::Next);
        assert_eq!(
            predicate.sql(),
            "(k.a IS NULL AND k.id > :_keysetParameter_1)"
        );
    }

    #[test]
    fn test_nulls_last_non_null_anchor_keeps_null_rows() {
        let keys = vec![
            SortKey::asc("k.a").nullable(true),
            SortKey::asc("k.id").unique(true),
        ];
        let predicate = compile(
            &keys,
            vec![Value::from(3_i64), Value::from(11_i64)],
            KeysetMode::Next,
        );
        assert_eq!(
            predicate.sql(),
            "((k.a > :_keysetParameter_0 OR k.a IS NULL) OR (k.a = :_keysetParameter_0 AND k.id > :_keysetParameter_1))"
        );
    }

    // ── SAME mode ────────────────────────────────────────────────────

    #[test]
    fn test_same_mode_strict_non_last_inclusive_last() {
        let keys = vec![SortKey::asc("a"), SortKey::asc("id").unique(true)];
        let predicate = compile(
            &keys,
            vec![Value::from(5_i64), Value::from(7_i64)],
            KeysetMode::Same,
        );
        assert_eq!(
            predicate.sql(),
            "(a > :_keysetParameter_0 OR (a = :_keysetParameter_0 AND id >= :_keysetParameter_1))"
        );
    }

    // ── Row-value form ───────────────────────────────────────────────

    #[test]
    fn test_row_value_form_next() {
        let keys = vec![
            SortKey::desc("owner.name"),
            SortKey::asc("d.id").unique(true),
        ];
        let predicate = PredicateCompiler::new(caps_row_value())
            .compile(
                &keys,
                &AnchorTuple::new(vec![Value::from("Karl"), Value::from(4_i64)]),
                KeysetMode::Next,
            )
            .unwrap();
        assert_eq!(
            predicate.sql(),
            "(owner.name, :_keysetParameter_1) < (:_keysetParameter_0, d.id)"
        );
        assert_eq!(predicate.params().len(), 2);
    }

    #[test]
    fn test_row_value_form_previous_swaps_sides() {
        let keys = vec![
            SortKey::desc("owner.name"),
            SortKey::asc("d.id").unique(true),
        ];
        let predicate = PredicateCompiler::new(caps_row_value())
            .compile(
                &keys,
                &AnchorTuple::new(vec![Value::from("Karl"), Value::from(4_i64)]),
                KeysetMode::Previous,
            )
            .unwrap();
        assert_eq!(
            predicate.sql(),
            "(:_keysetParameter_0, d.id) < (owner.name, :_keysetParameter_1)"
        );
    }

    #[test]
    fn test_row_value_form_same_is_inclusive() {
        let keys = vec![SortKey::asc("a"), SortKey::asc("id").unique(true)];
        let predicate = PredicateCompiler::new(caps_row_value())
            .compile(
                &keys,
                &AnchorTuple::new(vec![Value::from(1_i64), Value::from(2_i64)]),
                KeysetMode::Same,
            )
            .unwrap();
        assert_eq!(
            predicate.sql(),
            "(:_keysetParameter_0, :_keysetParameter_1) <= (a, id)"
        );
    }

    #[test]
    fn test_nullable_key_disables_row_value_form() {
        let keys = vec![
            SortKey::asc("a").nullable(true),
            SortKey::asc("id").unique(true),
        ];
        let predicate = PredicateCompiler::new(caps_row_value())
            .compile(
                &keys,
                &AnchorTuple::new(vec![Value::from(1_i64), Value::from(2_i64)]),
                KeysetMode::Next,
            )
            .unwrap();
        assert!(predicate.sql().contains(" OR "));
    }

    // ── Optimized variant ────────────────────────────────────────────

    fn optimized_matrix_keys() -> Vec<SortKey> {
        vec![
            SortKey::asc("k.a").nulls_first(true),
            SortKey::asc("k.b").nullable(true).nulls_first(true),
            SortKey::asc("k.c").nullable(true).nulls_first(true),
            SortKey::asc("k.id").nulls_first(true).unique(true),
        ]
    }

    fn compile_optimized(keys: &[SortKey], anchor: Vec<Value>, mode: KeysetMode) -> String {
        PredicateCompiler::new(caps_plain())
            .optimized(true)
            .compile(keys, &AnchorTuple::new(anchor), mode)
            .unwrap()
            .sql()
            .to_string()
    }

    #[test]
    fn test_optimized_next_null_anchors() {
        let sql = compile_optimized(
            &optimized_matrix_keys(),
            vec![Value::from(0_i64), Value::Null, Value::Null, Value::from(2_i64)],
            KeysetMode::Next,
        );
        assert_eq!(
            sql,
            "k.a >= :_keysetParameter_0 AND NOT (k.a = :_keysetParameter_0 AND (k.b IS NULL AND (k.c IS NULL AND k.id <= :_keysetParameter_3)))"
        );
    }

    #[test]
    fn test_optimized_next_non_null_anchors() {
        let sql = compile_optimized(
            &optimized_matrix_keys(),
            vec![
                Value::from(0_i64),
                Value::from(1_i64),
                Value::from(0_i64),
                Value::from(13_i64),
            ],
            KeysetMode::Next,
        );
        assert_eq!(
            sql,
            "k.a >= :_keysetParameter_0 AND NOT (k.a = :_keysetParameter_0 AND (k.b < :_keysetParameter_1 OR (k.b = :_keysetParameter_1 AND (k.c < :_keysetParameter_2 OR (k.c = :_keysetParameter_2 AND k.id <= :_keysetParameter_3)))))"
        );
    }

    #[test]
    fn test_optimized_previous_guards_nullable_keys() {
        let sql = compile_optimized(
            &optimized_matrix_keys(),
            vec![
                Value::from(0_i64),
                Value::from(1_i64),
                Value::from(1_i64),
                Value::from(14_i64),
            ],
            KeysetMode::Previous,
        );
        assert_eq!(
            sql,
            "k.a <= :_keysetParameter_0 AND NOT (k.a = :_keysetParameter_0 AND (k.b IS NOT NULL AND k.b > :_keysetParameter_1 OR (k.b IS NOT NULL AND k.b = :_keysetParameter_1 AND (k.c IS NOT NULL AND k.c > :_keysetParameter_2 OR (k.c IS NOT NULL AND k.c = :_keysetParameter_2 AND k.id >= :_keysetParameter_3)))))"
        );
    }

    #[test]
    fn test_optimized_previous_null_anchor_in_chain() {
        let sql = compile_optimized(
            &optimized_matrix_keys(),
            vec![Value::from(1_i64), Value::Null, Value::Null, Value::from(1_i64)],
            KeysetMode::Previous,
        );
        assert_eq!(
            sql,
            "k.a <= :_keysetParameter_0 AND NOT (k.a = :_keysetParameter_0 AND (k.b IS NOT NULL OR (k.b IS NULL AND (k.c IS NOT NULL OR (k.c IS NULL AND k.id >= :_keysetParameter_3)))))"
        );
    }

    #[test]
    fn test_optimized_falls_back_for_same_mode() {
        let keys = vec![SortKey::asc("a"), SortKey::asc("id").unique(true)];
        let sql = compile_optimized(
            &keys,
            vec![Value::from(5_i64), Value::from(7_i64)],
            KeysetMode::Same,
        );
        assert_eq!(
            sql,
            "(a > :_keysetParameter_0 OR (a = :_keysetParameter_0 AND id >= :_keysetParameter_1))"
        );
    }

    #[test]
    fn test_optimized_falls_back_for_null_first_anchor() {
        let keys = vec![
            SortKey::asc("a").nullable(true).nulls_first(true),
            SortKey::asc("id").unique(true),
        ];
        let sql = compile_optimized(
            &keys,
            vec![Value::Null, Value::from(7_i64)],
            KeysetMode::Next,
        );
        assert_eq!(
            sql,
            "(a IS NOT NULL OR (a IS NULL AND id > :_keysetParameter_1))"
        );
    }

    #[test]
    fn test_optimized_two_keys() {
        let keys = vec![SortKey::asc("a"), SortKey::asc("id").unique(true)];
        let sql = compile_optimized(
            &keys,
            vec![Value::from(5_i64), Value::from(7_i64)],
            KeysetMode::Next,
        );
        assert_eq!(
            sql,
            "a >= :_keysetParameter_0 AND NOT (a = :_keysetParameter_0 AND id <= :_keysetParameter_1)"
        );
    }

    #[test]
    fn test_optimized_guards_nullable_first_key() {
        // The base keeps NULL rows, so the negated factor must reject
        // them definitely rather than evaluating to unknown.
        let keys = vec![
            SortKey::asc("a").nullable(true),
            SortKey::asc("id").unique(true),
        ];
        let sql = compile_optimized(
            &keys,
            vec![Value::from(3_i64), Value::from(7_i64)],
            KeysetMode::Next,
        );
        assert_eq!(
            sql,
            "(a >= :_keysetParameter_0 OR a IS NULL) AND NOT (a IS NOT NULL AND a = :_keysetParameter_0 AND id <= :_keysetParameter_1)"
        );
    }

    // ── Parameter registration ───────────────────────────────────────

    #[test]
    fn test_register_into_sink() {
        let keys = vec![SortKey::asc("name").unique(true)];
        let predicate = compile(&keys, vec![Value::from("Charlie")], KeysetMode::Next);
        let mut sink: Vec<(String, Value)> = Vec::new();
        predicate.register_into(&mut sink);
        assert_eq!(
            sink,
            vec![("_keysetParameter_0".to_string(), Value::from("Charlie"))]
        );
    }

    #[test]
    fn test_null_anchor_values_bind_no_parameter() {
        let keys = vec![
            SortKey::desc("age").nullable(true),
            SortKey::asc("id").unique(true),
        ];
        let predicate = compile(&keys, vec![Value::Null, Value::from(42_i64)], KeysetMode::Next);
        assert_eq!(predicate.params().len(), 1);
        assert_eq!(predicate.params()[0].0, "_keysetParameter_1");
    }
}
