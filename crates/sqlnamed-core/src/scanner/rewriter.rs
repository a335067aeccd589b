//! Single-pass rewriter from named to positional parameters.

use unicode_general_category::{GeneralCategory, get_general_category};

use crate::dialect::Dialect;
use crate::index::PositionIndex;

use super::Span;

/// Character that introduces a named parameter.
pub const PARAMETER_MARKER: char = ':';

/// Character that opens and closes a string literal.
pub const QUOTE: char = '\'';

/// Returns true if `c` may appear in a parameter name: `_`, a letter
/// (general category L) or a decimal digit (Nd).
///
/// Other numerics such as `²`, `½` or `Ⅻ` end the name.
#[must_use]
pub fn is_parameter_char(c: char) -> bool {
    c == '_'
        || matches!(
            get_general_category(c),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
                | GeneralCategory::DecimalNumber
        )
}

/// One appearance of a named parameter in the original query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Parameter name, without the marker. May be empty.
    pub name: String,
    /// 0-based positional slot owned by this occurrence.
    pub slot: usize,
    /// Location of the `:name` token in the original query.
    pub span: Span,
}

impl Occurrence {
    /// Returns the 1-based ordinal rendered into numbered placeholders.
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.slot + 1
    }
}

/// Everything produced by one pass over a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    /// The query with every named parameter replaced by a placeholder.
    pub query: String,
    /// Parameter occurrences in query order; `occurrences[i].slot == i`.
    pub occurrences: Vec<Occurrence>,
    /// Name → slots mapping for the occurrences.
    pub index: PositionIndex,
    /// Byte offset of a string literal that was still open at end of input.
    pub unterminated_literal: Option<usize>,
}

/// Rewrites named parameters into the placeholders of a [`Dialect`].
///
/// The scanner walks the query one `char` at a time, so multi-byte
/// characters are never split. It never fails: a literal left open at the
/// end of input is copied through and reported in
/// [`Rewrite::unterminated_literal`].
pub struct Scanner<'a, D> {
    /// The input query.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    dialect: D,
    out: String,
    occurrences: Vec<Occurrence>,
    index: PositionIndex,
    unterminated_literal: Option<usize>,
}

impl<'a, D: Dialect> Scanner<'a, D> {
    /// Creates a scanner over `input` rendering placeholders with `dialect`.
    #[must_use]
    pub fn new(input: &'a str, dialect: D) -> Self {
        Self {
            input,
            pos: 0,
            dialect,
            out: String::with_capacity(input.len()),
            occurrences: Vec::new(),
            index: PositionIndex::new(),
            unterminated_literal: None,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Scans the whole input.
    #[must_use]
    pub fn rewrite(mut self) -> Rewrite {
        while let Some(c) = self.advance() {
            match c {
                PARAMETER_MARKER => self.scan_parameter(),
                QUOTE => self.scan_literal(),
                _ => self.out.push(c),
            }
        }

        Rewrite {
            query: self.out,
            occurrences: self.occurrences,
            index: self.index,
            unterminated_literal: self.unterminated_literal,
        }
    }

    /// Scans a parameter name after its marker and emits the placeholder.
    fn scan_parameter(&mut self) {
        let start = self.pos - PARAMETER_MARKER.len_utf8();
        let name_start = self.pos;
        while self.peek().is_some_and(is_parameter_char) {
            self.advance();
        }

        let input = self.input;
        let name = &input[name_start..self.pos];
        let slot = self.occurrences.len();

        self.index.record(name, slot);
        self.dialect.write_placeholder(&mut self.out, slot + 1);
        self.occurrences.push(Occurrence {
            name: name.to_string(),
            slot,
            span: Span::new(start, self.pos),
        });

        // A marker directly after a name is plain text, so `:a:b` is one
        // parameter followed by ":b". Any other terminator goes back through
        // the main loop, which lets a quote open a literal.
        if self.peek() == Some(PARAMETER_MARKER) {
            self.advance();
            self.out.push(PARAMETER_MARKER);
        }
    }

    /// Copies a string literal verbatim, including its quotes.
    fn scan_literal(&mut self) {
        let start = self.pos - QUOTE.len_utf8();
        self.out.push(QUOTE);

        loop {
            match self.advance() {
                Some(QUOTE) => {
                    self.out.push(QUOTE);
                    return;
                }
                Some(c) => self.out.push(c),
                None => {
                    self.unterminated_literal = Some(start);
                    return;
                }
            }
        }
    }
}
