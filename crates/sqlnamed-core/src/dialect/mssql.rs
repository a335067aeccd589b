//! SQL Server dialect.

use std::fmt::Write;

use super::Dialect;

/// SQL Server placeholders: `@p1`, `@p2`, ...
#[derive(Debug, Default, Clone, Copy)]
pub struct MssqlDialect;

impl MssqlDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MssqlDialect {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn write_placeholder(&self, out: &mut String, ordinal: usize) {
        let _ = write!(out, "@p{ordinal}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mssql_dialect() {
        let dialect = MssqlDialect::new();
        assert_eq!(dialect.name(), "mssql");
        assert_eq!(dialect.placeholder(1), "@p1");
        assert_eq!(dialect.placeholder(40), "@p40");
    }
}
