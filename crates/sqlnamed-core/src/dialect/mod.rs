//! Placeholder dialects.
//!
//! Backends disagree on how positional parameters are written: PostgreSQL
//! numbers them (`$1`), SQLite and MySQL use a bare `?`, SQL Server names
//! them `@p1`. A [`Dialect`] renders the placeholder for one ordinal.

mod custom;
mod generic;
mod mssql;
mod postgres;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

pub use custom::CustomDialect;
pub use generic::GenericDialect;
pub use mssql::MssqlDialect;
pub use postgres::PostgresDialect;

/// Trait for rendering positional placeholders.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Appends the placeholder for the 1-based `ordinal` to `out`.
    fn write_placeholder(&self, out: &mut String, ordinal: usize);

    /// Returns the placeholder for the 1-based `ordinal`.
    fn placeholder(&self, ordinal: usize) -> String {
        let mut out = String::new();
        self.write_placeholder(&mut out, ordinal);
        out
    }
}

impl<D: Dialect + ?Sized> Dialect for &D {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn write_placeholder(&self, out: &mut String, ordinal: usize) {
        (**self).write_placeholder(out, ordinal);
    }
}

impl<D: Dialect + ?Sized> Dialect for Box<D> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn write_placeholder(&self, out: &mut String, ordinal: usize) {
        (**self).write_placeholder(out, ordinal);
    }
}

/// The built-in dialects, selectable by name from configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// `$1`, `$2`, ...
    #[default]
    Postgres,
    /// `?` for every parameter.
    Generic,
    /// `@p1`, `@p2`, ...
    Mssql,
}

impl DialectKind {
    /// All built-in dialects.
    pub const ALL: [Self; 3] = [Self::Postgres, Self::Generic, Self::Mssql];

    /// Returns the dialect implementation for this kind.
    #[must_use]
    pub fn dialect(self) -> Box<dyn Dialect + Send + Sync> {
        match self {
            Self::Postgres => Box::new(PostgresDialect::new()),
            Self::Generic => Box::new(GenericDialect::new()),
            Self::Mssql => Box::new(MssqlDialect::new()),
        }
    }

    /// Returns the configuration name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Generic => "generic",
            Self::Mssql => "mssql",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a dialect name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dialect '{0}' (expected postgres, generic or mssql)")]
pub struct UnknownDialect(pub String);

impl FromStr for DialectKind {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "generic" | "sqlite" | "mysql" => Ok(Self::Generic),
            "mssql" | "sqlserver" => Ok(Self::Mssql),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}
