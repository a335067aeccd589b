//! Generic SQL dialect.

use super::Dialect;

/// Anonymous `?` placeholders, as used by SQLite, MySQL and ODBC.
///
/// Every placeholder is identical, so the argument list must be bound
/// strictly in order.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn write_placeholder(&self, out: &mut String, _ordinal: usize) {
        out.push('?');
    }
}
