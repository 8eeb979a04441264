//! Template-level scanning: literal text, escapes, and expression regions.
//!
//! The scanner walks the raw template and produces ordered [`Segment`]s.
//! `\{` and `\$` escape to literal `{` / `$`; any other backslash is kept
//! literally. `{` opens an expression region handed to the expression
//! parser; an unescaped `$` in literal text introduces an inline binding
//! reference parsed with the same reference rule.

use stencil_core::ParseError;

use crate::cursor::Cursor;
use crate::infer;
use crate::term::Segment;

/// Recursive-descent parser over template source.
///
/// One instance parses one template; see [`parse_template`] for the
/// convenience entry point.
pub struct TemplateParser<'src> {
    pub(crate) cursor: Cursor<'src>,
}

/// Parse template source into ordered segments.
pub fn parse_template(source: &str) -> Result<Vec<Segment>, ParseError> {
    TemplateParser::new(source).parse()
}

impl<'src> TemplateParser<'src> {
    /// Create a parser over the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Consume the whole template, producing its segments.
    pub fn parse(mut self) -> Result<Vec<Segment>, ParseError> {
        let mut segments = Vec::new();
        let mut literal = String::new();

        while let Some(c) = self.cursor.peek() {
            match c {
                '\\' => {
                    let span = self.cursor.span();
                    self.cursor.advance();
                    match self.cursor.peek() {
                        None => return Err(ParseError::TrailingBackslash { span }),
                        Some('{') | Some('$') => {
                            // Template escape: the bare character, no backslash.
                            literal.push(self.cursor.advance().unwrap_or_default());
                        }
                        Some(_) => {
                            // Not a template escape; the backslash is literal
                            // and the next character is handled normally.
                            literal.push('\\');
                        }
                    }
                }
                '{' => {
                    Self::flush(&mut literal, &mut segments);
                    let start = self.cursor.offset();
                    let span = self.cursor.span();
                    self.cursor.advance();
                    let (node, _) = self.parse_expression(ExprEnd::Brace, start, span)?;
                    segments.push(Segment::Expr {
                        node,
                        raw: self.cursor.slice_from(start).to_string(),
                    });
                }
                '$' => {
                    let start = self.cursor.offset();
                    let span = self.cursor.span();
                    self.cursor.advance();
                    if self.at_reference_start() {
                        Self::flush(&mut literal, &mut segments);
                        let term = self.parse_inline_reference(span)?;
                        segments.push(Segment::Expr {
                            node: infer::finish(vec![term]),
                            raw: self.cursor.slice_from(start).to_string(),
                        });
                    } else {
                        // A bare '$' not followed by a letter is literal.
                        literal.push('$');
                    }
                }
                _ => {
                    literal.push(c);
                    self.cursor.advance();
                }
            }
        }

        Self::flush(&mut literal, &mut segments);
        Ok(segments)
    }

    fn flush(literal: &mut String, segments: &mut Vec<Segment>) {
        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(literal)));
        }
    }
}

/// What terminates the expression currently being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExprEnd {
    /// Top-level expression region: ends at `}`.
    Brace,
    /// Parenthesized sub-expression: ends at `)`.
    Paren,
    /// Call argument: ends at `,` or `)`.
    Arg,
}
