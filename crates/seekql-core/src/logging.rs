//! Logging integration for seekql.
//!
//! Provides a helper for installing a [`tracing`]-based subscriber. The
//! pagination layer itself only emits `debug`-level events (for example
//! when the predicate compiler falls back from the row-value form to the
//! expanded form), so embedding applications that already install their
//! own subscriber can ignore this module entirely.

/// Sets up a global tracing subscriber for standalone use.
///
/// The filter directive is typically `"seekql=debug"` during development
/// or `"info"` in production. When `pretty` is `true` a human-readable
/// format is used; otherwise structured JSON output is emitted.
///
/// Installation is best-effort: if a subscriber is already registered
/// this function does nothing.
pub fn setup_logging(directive: &str, pretty: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    if pretty {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span covering a single statement compilation.
///
/// Attach this span around the compile/rewrite calls for one statement
/// so that all events carry the statement identifier.
///
/// # Examples
///
/// ```
/// let span = seekql_core::logging::compilation_span("q-42");
/// let _guard = span.enter();
/// tracing::debug!("compiling keyset predicate");
/// ```
pub fn compilation_span(statement_id: &str) -> tracing::Span {
    tracing::debug_span!("statement_compilation", id = statement_id)
}
