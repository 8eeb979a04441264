//! Low-level character cursor over template source.

use stencil_core::Span;

/// A cursor over source text that tracks position.
///
/// Provides peek/advance semantics and tracks byte offset, line number,
/// and column number as it advances.
pub struct Cursor<'src> {
    /// The source text being scanned.
    source: &'src str,
    /// Remaining source text (slice starting at current position).
    rest: &'src str,
    /// Current byte offset from start of source.
    offset: usize,
    /// Current line number (1-indexed).
    line: u32,
    /// Current column number (1-indexed, byte-based).
    column: u32,
}

impl<'src> Cursor<'src> {
    /// Create a new cursor at the start of the source.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// The full source text.
    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Current byte offset from start of source.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// A zero-length span at the current position.
    #[inline]
    pub fn span(&self) -> Span {
        Span::point(self.line, self.column)
    }

    /// Check if we've reached the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    /// Peek at the current character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peek at the nth character ahead (0 = current).
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Consume and return the current character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.rest.chars().next()?;
        let len = c.len_utf8();
        self.rest = &self.rest[len..];
        self.offset += len;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += len as u32;
        }
        Some(c)
    }

    /// Consume the current character if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds, returning the consumed slice.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'src str {
        let start = self.offset;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.advance();
        }
        &self.source[start..self.offset]
    }

    /// The source text from `start` to the current offset.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_line_and_column() {
        let mut c = Cursor::new("ab\ncd");
        assert_eq!(c.advance(), Some('a'));
        assert_eq!(c.advance(), Some('b'));
        assert_eq!(c.span().line, 1);
        assert_eq!(c.advance(), Some('\n'));
        assert_eq!(c.span().line, 2);
        assert_eq!(c.span().col, 1);
    }

    #[test]
    fn eat_while_returns_the_run() {
        let mut c = Cursor::new("123abc");
        assert_eq!(c.eat_while(|ch| ch.is_ascii_digit()), "123");
        assert_eq!(c.peek(), Some('a'));
    }

    #[test]
    fn eat_only_consumes_on_match() {
        let mut c = Cursor::new("xy");
        assert!(!c.eat('y'));
        assert!(c.eat('x'));
        assert_eq!(c.offset(), 1);
    }
}
