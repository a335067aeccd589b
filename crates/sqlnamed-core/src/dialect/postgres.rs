//! PostgreSQL dialect.

use std::fmt::Write;

use super::Dialect;

/// PostgreSQL numbered placeholders: `$1`, `$2`, ...
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn write_placeholder(&self, out: &mut String, ordinal: usize) {
        // Writing into a String cannot fail
        let _ = write!(out, "${ordinal}");
    }
}
