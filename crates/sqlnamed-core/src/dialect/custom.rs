//! Placeholders rendered by a closure.

use std::fmt;

use super::Dialect;

/// A dialect whose placeholders come from a function of the 1-based ordinal.
///
/// ```rust
/// use sqlnamed_core::dialect::{CustomDialect, Dialect};
///
/// let oracle = CustomDialect::new("oracle", |n| format!(":{n}"));
/// assert_eq!(oracle.placeholder(2), ":2");
/// ```
#[derive(Clone, Copy)]
pub struct CustomDialect<F> {
    name: &'static str,
    render: F,
}

impl<F> CustomDialect<F>
where
    F: Fn(usize) -> String,
{
    /// Creates a dialect named `name` that renders placeholders with `render`.
    pub const fn new(name: &'static str, render: F) -> Self {
        Self { name, render }
    }
}

impl<F> fmt::Debug for CustomDialect<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomDialect")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> Dialect for CustomDialect<F>
where
    F: Fn(usize) -> String,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn write_placeholder(&self, out: &mut String, ordinal: usize) {
        out.push_str(&(self.render)(ordinal));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_dialect() {
        let dialect = CustomDialect::new("named", |n| format!("@arg{n}"));
        assert_eq!(dialect.name(), "named");
        assert_eq!(dialect.placeholder(5), "@arg5");
        assert_eq!(format!("{dialect:?}"), "CustomDialect { name: \"named\", .. }");
    }
}
