//! Sort specifications for keyset pagination.
//!
//! A sort specification is an ordered sequence of [`SortKey`]s; the
//! sequence order defines the lexicographic priority used by the seek
//! predicate compiler. Each key carries the metadata the compiler needs
//! to pick comparison operators: direction, nullability, null placement,
//! and uniqueness.

/// A column ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SortDirection {
    /// Ascending order.
    Ascending,
    /// Descending order.
    Descending,
}

/// One key of a sort specification.
///
/// The `expression` is an opaque rendering token (a column reference or
/// any SQL expression already rendered by the surrounding query engine);
/// the compiler never inspects it, it only writes it into the predicate.
///
/// A key marked `unique` guarantees that no two rows share its value.
/// For a total order to exist, at most the *last* key of a specification
/// may be non-unique; callers are responsible for appending a unique
/// tie-breaker key if needed.
///
/// # Examples
///
/// ```
/// use seekql::sort::SortKey;
///
/// let keys = vec![
///     SortKey::desc("d.age").nullable(true),
///     SortKey::asc("d.id").unique(true),
/// ];
/// assert!(keys[1].unique);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SortKey {
    /// The column or expression to order by, as rendered SQL text.
    pub expression: String,
    /// The sort direction.
    pub direction: SortDirection,
    /// Whether the expression can evaluate to NULL.
    pub nullable: bool,
    /// Whether NULL values sort before all non-NULL values.
    pub nulls_first: bool,
    /// Whether no two rows can share this key's value.
    pub unique: bool,
}

impl SortKey {
    /// Creates an ascending, non-nullable, non-unique sort key.
    ///
    /// Ascending keys default to nulls-last placement, matching the
    /// common engine default for ascending order.
    pub fn asc(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            direction: SortDirection::Ascending,
            nullable: false,
            nulls_first: false,
            unique: false,
        }
    }

    /// Creates a descending, non-nullable, non-unique sort key.
    ///
    /// Descending keys default to nulls-first placement, the mirror of
    /// the ascending default.
    pub fn desc(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            direction: SortDirection::Descending,
            nullable: false,
            nulls_first: true,
            unique: false,
        }
    }

    /// Sets whether the key can evaluate to NULL.
    #[must_use]
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets the null placement for this key.
    #[must_use]
    pub fn nulls_first(mut self, nulls_first: bool) -> Self {
        self.nulls_first = nulls_first;
        self
    }

    /// Marks the key as unique.
    #[must_use]
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Returns `true` if the key sorts ascending.
    pub const fn is_ascending(&self) -> bool {
        matches!(self.direction, SortDirection::Ascending)
    }
}
