#![allow(dead_code)]

use sqlnamed_core::{Parser, SqlValue};

/// Sample queries covering plain text, literals, repeats and multi-byte input.
pub const CORPUS: &[&str] = &[
    "",
    "SELECT 1",
    "SELECT * FROM users WHERE id = :id",
    "INSERT INTO t (a, b, c) VALUES (:a, :b, :a)",
    "SELECT ':literal:foo' WHERE x = :bar",
    "UPDATE t SET note = 'it''s :x', v = :v WHERE id = :id",
    "SELECT :nämé, 'ü:ß' || :ß_2",
    "SELECT x::int, :y",
    "SELECT :",
    "SELECT 'unterminated :p",
    "WHERE a = :x AND b = :x",
];

/// Parses `sql` with the default dialect.
pub fn parse(sql: &str) -> Parser {
    Parser::new(sql)
}

/// Returns the slots of `name` in `sql`.
pub fn slots(sql: &str, name: &str) -> Vec<usize> {
    parse(sql).positions().occurrences_of(name).to_vec()
}

/// Counts `$n` placeholders in a rewritten query.
pub fn count_dollar_placeholders(sql: &str) -> usize {
    let chars: Vec<char> = sql.chars().collect();
    chars
        .windows(2)
        .filter(|w| w[0] == '$' && w[1].is_ascii_digit())
        .count()
}

/// Shorthand for an assigned text slot.
pub fn text(s: &str) -> Option<SqlValue> {
    Some(SqlValue::Text(String::from(s)))
}
