//! Named-parameter query parser.
//!
//! A [`Parser`] owns one rewritten query together with its positional
//! argument list. Values are assigned by name and land in every slot that
//! name occupies.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialect::{Dialect, DialectKind, PostgresDialect};
use crate::error::{ParamError, Result};
use crate::index::PositionIndex;
use crate::params::{NamedParams, record_params};
use crate::scanner::{Occurrence, Rewrite, Scanner};
use crate::store::ParameterStore;
use crate::value::{SqlValue, ToSqlValue};

/// A query rewritten from named to positional parameters, plus the values
/// bound to it so far.
///
/// # Example
///
/// ```rust
/// use sqlnamed_core::{Parser, SqlValue};
///
/// let mut parser = Parser::new("SELECT * FROM t WHERE a = :x OR b = :x");
/// assert_eq!(parser.parsed_query(), "SELECT * FROM t WHERE a = $1 OR b = $2");
///
/// parser.set_value("x", 5_i64);
/// assert_eq!(
///     parser.parsed_parameters(),
///     &[Some(SqlValue::Int(5)), Some(SqlValue::Int(5))]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Parser {
    original: String,
    revised: String,
    dialect: &'static str,
    occurrences: Vec<Occurrence>,
    index: PositionIndex,
    store: ParameterStore,
}

impl Parser {
    /// Parses `sql` with PostgreSQL (`$1`) placeholders.
    ///
    /// Empty parameter names and unterminated literals are accepted; use
    /// [`Parser::builder`] to reject them.
    #[must_use]
    pub fn new(sql: &str) -> Self {
        let dialect = PostgresDialect::new();
        let rewrite = Scanner::new(sql, dialect).rewrite();
        Self::from_rewrite(sql, dialect.name(), rewrite)
    }

    /// Returns a builder for configuring dialect and validation.
    pub const fn builder() -> ParserBuilder {
        ParserBuilder::new()
    }

    fn from_rewrite(sql: &str, dialect: &'static str, rewrite: Rewrite) -> Self {
        let Rewrite {
            query,
            occurrences,
            index,
            ..
        } = rewrite;

        debug!(
            dialect,
            occurrences = occurrences.len(),
            names = index.len(),
            "Rewrote named parameters"
        );

        Self {
            original: sql.to_string(),
            revised: query,
            dialect,
            store: ParameterStore::with_len(occurrences.len()),
            occurrences,
            index,
        }
    }

    /// Returns the query as it was given.
    #[must_use]
    pub fn original_query(&self) -> &str {
        &self.original
    }

    /// Returns the query with positional placeholders.
    #[must_use]
    pub fn parsed_query(&self) -> &str {
        &self.revised
    }

    /// Returns the positional arguments, aligned with the placeholders of
    /// [`parsed_query`](Self::parsed_query). Unset slots are `None`.
    #[must_use]
    pub fn parsed_parameters(&self) -> &[Option<SqlValue>] {
        self.store.snapshot()
    }

    /// Returns the name of the dialect the placeholders were rendered for.
    #[must_use]
    pub const fn dialect_name(&self) -> &'static str {
        self.dialect
    }

    /// Returns the name → slots index.
    #[must_use]
    pub const fn positions(&self) -> &PositionIndex {
        &self.index
    }

    /// Returns every parameter occurrence in query order.
    #[must_use]
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// Returns the distinct parameter names in order of first appearance.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.index.names()
    }

    /// Returns the names that still have at least one unset slot.
    #[must_use]
    pub fn unset_parameters(&self) -> Vec<&str> {
        self.index
            .iter()
            .filter(|(_, slots)| slots.iter().any(|&slot| self.store.get(slot).is_none()))
            .map(|(name, _)| name)
            .collect()
    }

    /// Sets the value of every occurrence of `name`.
    ///
    /// Does nothing if the query has no parameter called `name`.
    pub fn set_value(&mut self, name: &str, value: impl ToSqlValue) {
        let value = value.to_sql_value();
        self.store.assign(&self.index, name, &value);
    }

    /// Sets a value for every `(name, value)` pair. Names the query does not
    /// use are ignored.
    pub fn set_values_from_map<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToSqlValue,
    {
        for (name, value) in values {
            self.set_value(name.as_ref(), value);
        }
    }

    /// Sets the values supplied by a [`NamedParams`] implementation, usually
    /// one generated by `#[derive(Params)]`.
    pub fn set_values_from_params<P: NamedParams + ?Sized>(&mut self, params: &P) {
        let index = &self.index;
        let store = &mut self.store;
        params.visit_params(&mut |name, value| {
            store.assign(index, name, &value);
        });
    }

    /// Sets the values of a serializable record's fields.
    ///
    /// See [`record_params`] for how fields map to parameter names. Nothing
    /// is assigned if the call fails.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::TypeMismatch`] if `record` is not a struct or
    /// map, and [`ParamError::Serialization`] if serializing it fails.
    pub fn set_values_from_struct<T: Serialize + ?Sized>(&mut self, record: &T) -> Result<()> {
        for (name, value) in record_params(record)? {
            self.store.assign(&self.index, &name, &value);
        }
        Ok(())
    }

    /// Unsets every value, keeping the query and its parameters.
    pub fn reset_values(&mut self) {
        self.store.clear();
    }

    /// Returns the positional arguments, requiring every slot to be set.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::MissingValue`] naming the parameter of the first
    /// unset slot.
    pub fn bound_parameters(&self) -> Result<Vec<SqlValue>> {
        self.store
            .snapshot()
            .iter()
            .enumerate()
            .map(|(slot, value)| {
                value.clone().ok_or_else(|| ParamError::MissingValue {
                    name: self.index.name_of(slot).unwrap_or_default().to_string(),
                })
            })
            .collect()
    }

    /// Consumes the parser, returning the rewritten query and its arguments.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Option<SqlValue>>) {
        (self.revised, self.store.into_slots())
    }
}

/// Options controlling how queries are parsed.
///
/// Deserializable so hosts can keep them in their configuration files:
///
/// ```rust
/// use sqlnamed_core::{DialectKind, ParserOptions};
///
/// let options: ParserOptions =
///     serde_json::from_str(r#"{"dialect": "mssql", "reject_empty_names": true}"#).unwrap();
/// assert_eq!(options.dialect, DialectKind::Mssql);
/// assert!(!options.reject_unterminated_literals);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Placeholder dialect.
    pub dialect: DialectKind,
    /// Fail on a marker not followed by a name.
    pub reject_empty_names: bool,
    /// Fail on a string literal left open at the end of the query.
    pub reject_unterminated_literals: bool,
}

impl ParserOptions {
    /// Parses `sql` with these options.
    ///
    /// # Errors
    ///
    /// See [`ParserBuilder::parse`].
    pub fn parse(&self, sql: &str) -> Result<Parser> {
        self.builder().parse(sql)
    }

    /// Returns a builder carrying these options.
    pub fn builder(&self) -> ParserBuilder<Box<dyn Dialect + Send + Sync>> {
        ParserBuilder::new()
            .dialect(self.dialect.dialect())
            .reject_empty_names(self.reject_empty_names)
            .reject_unterminated_literals(self.reject_unterminated_literals)
    }
}

/// Builder for [`Parser`].
///
/// ```rust
/// use sqlnamed_core::dialect::MssqlDialect;
/// use sqlnamed_core::Parser;
///
/// let parser = Parser::builder()
///     .dialect(MssqlDialect::new())
///     .reject_empty_names(true)
///     .parse("UPDATE t SET a = :a WHERE id = :id")
///     .unwrap();
/// assert_eq!(parser.parsed_query(), "UPDATE t SET a = @p1 WHERE id = @p2");
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct ParserBuilder<D = PostgresDialect> {
    dialect: D,
    reject_empty_names: bool,
    reject_unterminated_literals: bool,
}

impl ParserBuilder {
    /// Creates a builder with PostgreSQL placeholders and permissive
    /// validation.
    pub const fn new() -> Self {
        Self {
            dialect: PostgresDialect::new(),
            reject_empty_names: false,
            reject_unterminated_literals: false,
        }
    }
}

impl Default for ParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Dialect> ParserBuilder<D> {
    /// Sets the placeholder dialect.
    pub fn dialect<E: Dialect>(self, dialect: E) -> ParserBuilder<E> {
        ParserBuilder {
            dialect,
            reject_empty_names: self.reject_empty_names,
            reject_unterminated_literals: self.reject_unterminated_literals,
        }
    }

    /// Rejects a `:` that is not followed by a parameter name.
    pub fn reject_empty_names(mut self, reject: bool) -> Self {
        self.reject_empty_names = reject;
        self
    }

    /// Rejects a string literal that is never closed.
    pub fn reject_unterminated_literals(mut self, reject: bool) -> Self {
        self.reject_unterminated_literals = reject;
        self
    }

    /// Rewrites `sql`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::EmptyParameterName`] or
    /// [`ParamError::UnterminatedLiteral`] when the matching option is on.
    pub fn parse(&self, sql: &str) -> Result<Parser> {
        let rewrite = Scanner::new(sql, &self.dialect).rewrite();

        if let Some(empty) = rewrite.occurrences.iter().find(|o| o.name.is_empty()) {
            if self.reject_empty_names {
                return Err(ParamError::EmptyParameterName {
                    offset: empty.span.start,
                });
            }
            debug!(offset = empty.span.start, "Accepting empty parameter name");
        }

        if let Some(offset) = rewrite.unterminated_literal {
            if self.reject_unterminated_literals {
                return Err(ParamError::UnterminatedLiteral { offset });
            }
            debug!(offset, "Accepting unterminated string literal");
        }

        Ok(Parser::from_rewrite(sql, self.dialect.name(), rewrite))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;

    #[test]
    fn test_parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser>();
    }

    #[test]
    fn test_new_uses_postgres() {
        let parser = Parser::new("SELECT :a");
        assert_eq!(parser.dialect_name(), "postgres");
        assert_eq!(parser.original_query(), "SELECT :a");
        assert_eq!(parser.parsed_query(), "SELECT $1");
    }

    #[test]
    fn test_builder_dialect() {
        let parser = Parser::builder()
            .dialect(GenericDialect::new())
            .parse("SELECT :a, :b")
            .unwrap();
        assert_eq!(parser.parsed_query(), "SELECT ?, ?");
        assert_eq!(parser.dialect_name(), "generic");
    }

    #[test]
    fn test_builder_rejects_empty_name() {
        let err = Parser::builder()
            .reject_empty_names(true)
            .parse("SELECT a: FROM t")
            .unwrap_err();
        assert!(matches!(err, ParamError::EmptyParameterName { offset: 8 }));
    }

    #[test]
    fn test_builder_accepts_empty_name_by_default() {
        let parser = Parser::builder().parse("SELECT a: FROM t").unwrap();
        assert_eq!(parser.parsed_query(), "SELECT a$1 FROM t");
        assert_eq!(parser.positions().occurrences_of(""), &[0]);
    }

    #[test]
    fn test_builder_rejects_unterminated_literal() {
        let err = Parser::builder()
            .reject_unterminated_literals(true)
            .parse("SELECT 'abc")
            .unwrap_err();
        assert!(matches!(err, ParamError::UnterminatedLiteral { offset: 7 }));
    }

    #[test]
    fn test_options_builder() {
        let options = ParserOptions {
            dialect: DialectKind::Mssql,
            ..ParserOptions::default()
        };
        let parser = options.parse("SELECT :a").unwrap();
        assert_eq!(parser.parsed_query(), "SELECT @p1");
        assert_eq!(parser.dialect_name(), "mssql");
    }

    #[test]
    fn test_unset_parameters() {
        let mut parser = Parser::new(":a :b :a");
        assert_eq!(parser.unset_parameters(), vec!["a", "b"]);
        parser.set_value("a", 1_i64);
        assert_eq!(parser.unset_parameters(), vec!["b"]);
    }

    #[test]
    fn test_bound_parameters_reports_missing() {
        let mut parser = Parser::new(":a :b");
        parser.set_value("a", 1_i64);
        let err = parser.bound_parameters().unwrap_err();
        assert!(matches!(err, ParamError::MissingValue { ref name } if name == "b"));

        parser.set_value("b", SqlValue::Null);
        assert_eq!(
            parser.bound_parameters().unwrap(),
            vec![SqlValue::Int(1), SqlValue::Null]
        );
    }

    #[test]
    fn test_reset_values() {
        let mut parser = Parser::new(":a");
        parser.set_value("a", true);
        parser.reset_values();
        assert_eq!(parser.parsed_parameters(), &[None]);
    }

    #[test]
    fn test_into_parts() {
        let mut parser = Parser::new("DELETE FROM t WHERE id = :id");
        parser.set_value("id", 9_i64);
        let (sql, params) = parser.into_parts();
        assert_eq!(sql, "DELETE FROM t WHERE id = $1");
        assert_eq!(params, vec![Some(SqlValue::Int(9))]);
    }
}
