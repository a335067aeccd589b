//! # sqlnamed-core
//!
//! Named parameters for backends that only understand positional ones.
//!
//! This crate provides:
//! - A single-pass scanner rewriting `:name` parameters into positional
//!   placeholders (`$1`, `?`, `@p1`, or any custom style)
//! - An index from each name to every slot it occupies
//! - A positional argument list filled by name, from single values, maps,
//!   `#[derive(Params)]` structs or any `serde::Serialize` record
//!
//! ## Rewriting a query
//!
//! ```rust
//! use sqlnamed_core::{Parser, SqlValue};
//!
//! let mut parser = Parser::new(
//!     "SELECT * FROM users WHERE name = :name AND note <> ':name' OR id = :id",
//! );
//! assert_eq!(
//!     parser.parsed_query(),
//!     "SELECT * FROM users WHERE name = $1 AND note <> ':name' OR id = $2"
//! );
//!
//! parser.set_value("id", 7_i64);
//! parser.set_value("name", "O'Brien");
//! assert_eq!(
//!     parser.parsed_parameters(),
//!     &[Some(SqlValue::Text(String::from("O'Brien"))), Some(SqlValue::Int(7))]
//! );
//! ```
//!
//! ## Binding a record
//!
//! ```rust
//! use serde::Serialize;
//! use sqlnamed_core::{ParamError, Parser, SqlValue};
//!
//! #[derive(Serialize)]
//! struct Range {
//!     #[serde(rename = "lo")]
//!     low: i64,
//!     hi: i64,
//! }
//!
//! let mut parser = Parser::new("SELECT * FROM t WHERE v BETWEEN :lo AND :hi");
//! parser.set_values_from_struct(&Range { low: 1, hi: 9 }).unwrap();
//! assert_eq!(
//!     parser.parsed_parameters(),
//!     &[Some(SqlValue::Int(1)), Some(SqlValue::Int(9))]
//! );
//!
//! // Plain values have no fields to read
//! assert!(matches!(
//!     parser.set_values_from_struct(&3),
//!     Err(ParamError::TypeMismatch { .. })
//! ));
//! ```

pub mod dialect;
pub mod error;
pub mod index;
pub mod params;
pub mod parser;
mod record;
pub mod scanner;
pub mod store;
pub mod value;

pub use dialect::{Dialect, DialectKind};
pub use error::{ParamError, Result};
pub use index::PositionIndex;
pub use params::{NamedParams, record_params};
pub use parser::{Parser, ParserBuilder, ParserOptions};
pub use scanner::{Occurrence, Scanner, Span};
pub use store::ParameterStore;
pub use value::{SqlValue, ToSqlValue};
