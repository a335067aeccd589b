//! Error types for parameter rewriting and binding.

/// Errors raised while building a parser or binding values to it.
///
/// Scanning itself never fails in the default configuration; the
/// `EmptyParameterName` and `UnterminatedLiteral` variants only appear when
/// the corresponding strict option is enabled on the
/// [`ParserBuilder`](crate::ParserBuilder).
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    /// A record supplier was given a value that is not a struct or map.
    #[error("Cannot read named parameters from a {found} value: expected a struct or map")]
    TypeMismatch {
        /// The shape of the value that was supplied (e.g. `"number"`).
        found: &'static str,
    },

    /// A parameter marker was not followed by an identifier.
    #[error("Empty parameter name at byte offset {offset}")]
    EmptyParameterName {
        /// Byte offset of the marker in the original query.
        offset: usize,
    },

    /// A quoted literal was still open at the end of the query.
    #[error("Unterminated string literal starting at byte offset {offset}")]
    UnterminatedLiteral {
        /// Byte offset of the opening quote in the original query.
        offset: usize,
    },

    /// A positional slot was never given a value.
    #[error("No value supplied for parameter '{name}'")]
    MissingValue {
        /// The parameter owning the unset slot.
        name: String,
    },

    /// A record's `Serialize` implementation failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for parameter operations.
pub type Result<T> = std::result::Result<T, ParamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ParamError::TypeMismatch { found: "number" }.to_string(),
            "Cannot read named parameters from a number value: expected a struct or map"
        );
        assert_eq!(
            ParamError::EmptyParameterName { offset: 7 }.to_string(),
            "Empty parameter name at byte offset 7"
        );
        assert_eq!(
            ParamError::MissingValue {
                name: String::from("id")
            }
            .to_string(),
            "No value supplied for parameter 'id'"
        );
    }
}
