//! Query scanner.
//!
//! Finds `:name` parameters outside single-quoted literals and rewrites them
//! into positional placeholders in one pass.

mod rewriter;
mod span;

pub use rewriter::{Occurrence, PARAMETER_MARKER, QUOTE, Rewrite, Scanner, is_parameter_char};
pub use span::Span;
