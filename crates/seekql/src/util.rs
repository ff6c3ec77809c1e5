//! SQL text scanning helpers.
//!
//! The rewriter treats statements as text and needs to locate clause
//! keywords and select-list boundaries without being fooled by string
//! literals, quoted identifiers, or nested subqueries. These scanners
//! are ASCII-case-insensitive and quote-aware; they do not attempt to
//! parse SQL.

/// Returns the byte index of the first case-insensitive occurrence of
/// `needle` in `haystack` at or after `from`, skipping matches inside
/// string literals and quoted identifiers.
pub fn index_of_ignore_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    scan(haystack, needle, from, false)
}

/// Like [`index_of_ignore_case`], but additionally skips matches inside
/// parenthesized regions, so only top-level clause keywords are found.
pub fn index_of_top_level_ignore_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    scan(haystack, needle, from, true)
}

fn scan(haystack: &str, needle: &str, from: usize, top_level_only: bool) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    let bytes = haystack.as_bytes();
    let pattern = needle.as_bytes();
    let end = bytes.len() - pattern.len() + 1;
    let mut depth = 0_u32;
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' => i = skip_quoted(bytes, i, b'\''),
            b'"' => i = skip_quoted(bytes, i, b'"'),
            b'`' => i = skip_quoted(bytes, i, b'`'),
            b'[' => {
                // SQL Server bracketed identifier.
                while i < bytes.len() && bytes[i] != b']' {
                    i += 1;
                }
            }
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            c => {
                if (!top_level_only || depth == 0)
                    && i < end
                    && c.eq_ignore_ascii_case(&pattern[0])
                    && bytes[i..i + pattern.len()].eq_ignore_ascii_case(pattern)
                {
                    return Some(i);
                }
            }
        }
        i += 1;
    }
    None
}

/// Advances past a quoted region starting at `start`, honoring doubled
/// quote characters as escapes. Returns the index of the closing quote.
fn skip_quoted(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            if i + 1 < bytes.len() && bytes[i + 1] == quote {
                i += 2;
                continue;
            }
            return i;
        }
        i += 1;
    }
    i
}

/// Splits the select list of `sql` (the region between the first SELECT
/// keyword and its matching top-level FROM) into items at top-level
/// commas. Returns `None` when the statement has no recognizable
/// select-list boundaries.
pub fn split_select_items(sql: &str) -> Option<Vec<&str>> {
    let select = index_of_ignore_case(sql, "select", 0)?;
    let start = select + "select".len();
    let from = index_of_top_level_ignore_case(sql, " from ", start)?;
    let list = &sql[start..from];

    let mut items = Vec::new();
    let bytes = list.as_bytes();
    let mut depth = 0_u32;
    let mut item_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' => i = skip_quoted(bytes, i, b'\''),
            b'"' => i = skip_quoted(bytes, i, b'"'),
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                items.push(list[item_start..i].trim());
                item_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    items.push(list[item_start..].trim());
    Some(items)
}

/// Derives the output column name of a single select item: the explicit
/// `AS` alias, a trailing bare alias, or the last segment of a plain
/// dotted column path. Returns `None` for items whose output name is
/// not derivable from the text (`*`, unaliased expressions).
pub fn select_item_alias(item: &str) -> Option<&str> {
    let item = item.trim();
    if item.is_empty() || item.ends_with('*') {
        return None;
    }

    if let Some(idx) = index_of_top_level_ignore_case(item, " as ", 0) {
        let alias = item[idx + 4..].trim();
        return is_identifier(alias).then_some(alias);
    }

    // A bare trailing alias, as in `count(id) cnt`.
    if let Some(idx) = item.rfind(char::is_whitespace) {
        let alias = item[idx..].trim();
        if is_identifier(alias) && !item[..idx].trim().is_empty() {
            return Some(alias);
        }
        return None;
    }

    // A plain column path like `d.owner.name`.
    let last = item.rsplit('.').next()?;
    is_identifier(last).then_some(last)
}

/// Collects the output column names of all select items, or `None` if
/// any item's name is not derivable.
pub fn select_item_aliases(sql: &str) -> Option<Vec<String>> {
    split_select_items(sql)?
        .into_iter()
        .map(|item| select_item_alias(item).map(str::to_string))
        .collect()
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !s.starts_with(|c: char| c.is_ascii_digit())
}
