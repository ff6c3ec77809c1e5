//! # seekql-core
//!
//! Shared infrastructure for the seekql workspace: the [`SeekqlError`]
//! error type used across all crates and helpers for configuring
//! [`tracing`]-based logging.

pub mod error;
pub mod logging;

pub use error::{SeekqlError, SeekqlResult};
