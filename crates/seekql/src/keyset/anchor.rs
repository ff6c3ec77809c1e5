//! Anchor tuples and page boundaries.
//!
//! An anchor tuple holds the sort-key values of a boundary row (the
//! first or last row of a fetched page). A [`PageBoundary`] records both
//! boundary tuples of the previously returned page together with its
//! position, which is everything the mode resolver needs to classify the
//! next request.

use crate::value::Value;

/// The sort-key values of a single boundary row.
///
/// The tuple is produced once per page boundary and is immutable from
/// then on. Its length must equal the sort specification length when it
/// is handed to the predicate compiler; anything else is a programming
/// error in the calling layer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnchorTuple(Vec<Value>);

impl AnchorTuple {
    /// Creates an anchor tuple from the boundary row's key values.
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Returns the anchor values in sort-key order.
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Returns the number of key values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the tuple holds no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Value>> for AnchorTuple {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

/// The previously returned page, as remembered by the calling layer.
///
/// `lowest` is the anchor tuple of the first row of that page and
/// `highest` the anchor tuple of its last row. Either may be absent if
/// the caller did not capture it, in which case the corresponding seek
/// direction falls back to offset pagination.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageBoundary {
    /// Zero-based index of the first row of the previous page.
    pub first_result: u64,
    /// The page size the previous page was fetched with.
    pub page_size: u64,
    /// Key tuple of the first row of the previous page.
    pub lowest: Option<AnchorTuple>,
    /// Key tuple of the last row of the previous page.
    pub highest: Option<AnchorTuple>,
}

impl PageBoundary {
    /// Creates a page boundary record.
    pub fn new(
        first_result: u64,
        page_size: u64,
        lowest: Option<AnchorTuple>,
        highest: Option<AnchorTuple>,
    ) -> Self {
        Self {
            first_result,
            page_size,
            lowest,
            highest,
        }
    }

    /// Returns `true` if `tuple` is a usable seek anchor: present and
    /// non-empty.
    pub(crate) fn is_valid(tuple: Option<&AnchorTuple>) -> bool {
        tuple.is_some_and(|t| !t.is_empty())
    }
}
