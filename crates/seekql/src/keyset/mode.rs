//! Keyset mode resolution.
//!
//! Seek pagination is only safe for single-page steps relative to the
//! last known page boundary. The resolver classifies the requested page
//! as a forward step, a backward step, a re-fetch of the same page, or a
//! jump that must fall back to offset pagination.

use super::anchor::PageBoundary;

/// How the requested page relates to the previously returned page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum KeysetMode {
    /// Seek pagination is disabled; use offset pagination.
    None,
    /// Seek forward from the previous page's highest key.
    Next,
    /// Seek backward from the previous page's lowest key.
    Previous,
    /// Re-fetch the page starting at the previous page's lowest key.
    Same,
}

/// Resolves the keyset mode for a page request.
///
/// Returns [`KeysetMode::None`] when no previous boundary exists, when
/// an explicit jump to a specific entity was requested, or when
/// `first_row == 0`: the first page always offset-paginates so that
/// concurrently inserted or removed rows can neither shift results nor
/// hide previously seen rows.
///
/// Otherwise the page distance decides: a step of at most one page
/// backward resolves to [`KeysetMode::Previous`], at most one page
/// forward to [`KeysetMode::Next`], and zero to [`KeysetMode::Same`],
/// each provided the required boundary tuple is present and non-empty.
/// Any larger jump falls back to offset pagination.
///
/// # Examples
///
/// ```
/// use seekql::keyset::{resolve_mode, KeysetMode};
///
/// assert_eq!(resolve_mode(None, false, 40, 20), KeysetMode::None);
/// ```
pub fn resolve_mode(
    previous: Option<&PageBoundary>,
    explicit_entity_jump: bool,
    first_row: u64,
    _requested_page_size: u64,
) -> KeysetMode {
    let Some(previous) = previous else {
        return KeysetMode::None;
    };
    if explicit_entity_jump || first_row == 0 {
        return KeysetMode::None;
    }

    // Signed page distance from the last known boundary.
    let delta = i128::from(previous.first_result) - i128::from(first_row);
    let page_size = i128::from(previous.page_size);

    if delta > 0 && delta <= page_size {
        if PageBoundary::is_valid(previous.lowest.as_ref()) {
            KeysetMode::Previous
        } else {
            KeysetMode::None
        }
    } else if delta < 0 && delta >= -page_size {
        if PageBoundary::is_valid(previous.highest.as_ref()) {
            KeysetMode::Next
        } else {
            KeysetMode::None
        }
    } else if delta == 0 {
        if PageBoundary::is_valid(previous.lowest.as_ref()) {
            KeysetMode::Same
        } else {
            KeysetMode::None
        }
    } else {
        KeysetMode::None
    }
}
