//! # seekql-dialects
//!
//! [`DialectCapabilities`] presets for concrete database engines, kept
//! apart from the engine-agnostic compiler so the core crate never
//! hardcodes vendor knowledge.
//!
//! Supported engines:
//! - `PostgreSQL`
//! - `MySQL` / `MariaDB`
//! - `SQLite`
//! - `SQL Server` (2012+ and the 2008 TOP-based profile)
//! - `Oracle` (12c+ and the 11g ROWNUM profile)
//! - `DB2`

use seekql::DialectCapabilities;

pub mod db2;
pub mod mssql;
pub mod mysql;
pub mod oracle;
pub mod postgresql;
pub mod sqlite;

/// Looks up a capability preset by vendor name, as found in
/// configuration files or connection URLs. Matching is
/// case-insensitive.
///
/// # Examples
///
/// ```
/// use seekql::LimitSyntax;
/// use seekql_dialects::capabilities_for_vendor;
///
/// let caps = capabilities_for_vendor("postgresql").unwrap();
/// assert_eq!(caps.limit_syntax, LimitSyntax::LimitOffset);
/// assert!(capabilities_for_vendor("dbase").is_none());
/// ```
pub fn capabilities_for_vendor(vendor: &str) -> Option<DialectCapabilities> {
    match vendor.to_ascii_lowercase().as_str() {
        "postgresql" | "postgres" => Some(postgresql::capabilities()),
        "mysql" | "mariadb" => Some(mysql::capabilities()),
        "sqlite" => Some(sqlite::capabilities()),
        "mssql" | "sqlserver" => Some(mssql::capabilities()),
        "mssql2008" => Some(mssql::capabilities_2008()),
        "oracle" => Some(oracle::capabilities()),
        "oracle11" => Some(oracle::capabilities_11g()),
        "db2" => Some(db2::capabilities()),
        _ => None,
    }
}
