//! Fragment generation settings.

use serde::{Deserialize, Serialize};

/// SQL dialect that fragments are rendered for.
///
/// Only identifier quoting differs between dialects; value literals are
/// rendered the same way everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL dialect (double-quoted identifiers)
    #[default]
    Postgres,
    /// SQLite dialect (double-quoted identifiers)
    Sqlite,
    /// MySQL dialect (backtick-quoted identifiers)
    Mysql,
}

impl Dialect {
    /// The character this dialect wraps identifiers in.
    pub const fn quote_char(self) -> u8 {
        match self {
            Dialect::Postgres | Dialect::Sqlite => b'"',
            Dialect::Mysql => b'`',
        }
    }

    /// Quote an identifier for this dialect.
    ///
    /// Properly escapes embedded quote characters by doubling them:
    /// - For Postgres/SQLite: `"` becomes `""`
    /// - For MySQL: `` ` `` becomes ``` `` ```
    pub fn quote_identifier(self, name: &str) -> String {
        match self {
            Dialect::Postgres | Dialect::Sqlite => relwalk_core::quote_ident(name),
            Dialect::Mysql => relwalk_core::quote_ident_mysql(name),
        }
    }
}

/// Settings shared by every fragment a builder produces.
///
/// ```
/// use relwalk_query::{Dialect, FragmentConfig};
///
/// let config: FragmentConfig = serde_json::from_str(r#"{"dialect":"mysql"}"#).unwrap();
/// assert_eq!(config.dialect, Dialect::Mysql);
/// assert!(config.dedup);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentConfig {
    /// Identifier quoting dialect
    pub dialect: Dialect,
    /// Drop byte-identical rows from value lists
    pub dedup: bool,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Postgres,
            dedup: true,
        }
    }
}

impl FragmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    #[must_use]
    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }
}
