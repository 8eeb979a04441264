//! Expression parsing: `expression := term+`.
//!
//! A term is a numeric literal, a string literal, a boolean literal, a
//! maximal operator run, a parenthesized sub-expression, or a `$`-reference
//! (binding lookup, call chain, static call, or assignment). Whitespace is
//! skipped between terms but never inside identifiers, numbers, or strings.

use stencil_core::{ParseError, Span, ValueKind};

use crate::infer;
use crate::parser::{ExprEnd, TemplateParser};
use crate::term::{Coercion, ExprNode, MethodCall, RefTarget, RefTerm, Term, TermCode};

/// Context needed to parse an assignment inside an expression.
struct AssignCtx {
    end: ExprEnd,
    start: usize,
    open_span: Span,
    first: bool,
}

impl<'src> TemplateParser<'src> {
    /// Parse an expression terminated per `end`. Consumes the terminator and
    /// returns it alongside the finished node.
    ///
    /// `start` and `open_span` locate the opening delimiter so EOF errors
    /// can cite the offending excerpt.
    pub(crate) fn parse_expression(
        &mut self,
        end: ExprEnd,
        start: usize,
        open_span: Span,
    ) -> Result<(ExprNode, char), ParseError> {
        let mut terms: Vec<Term> = Vec::new();

        loop {
            self.skip_whitespace();
            let Some(c) = self.cursor.peek() else {
                return Err(self.eof_error(end, start, open_span));
            };

            match c {
                '}' if end == ExprEnd::Brace => {
                    self.cursor.advance();
                    return Ok((infer::finish(terms), '}'));
                }
                ')' if matches!(end, ExprEnd::Paren | ExprEnd::Arg) => {
                    self.cursor.advance();
                    return Ok((infer::finish(terms), ')'));
                }
                ',' if end == ExprEnd::Arg => {
                    self.cursor.advance();
                    return Ok((infer::finish(terms), ','));
                }
                '$' => {
                    let span = self.cursor.span();
                    self.cursor.advance();
                    if self.at_reference_start() {
                        let ctx = AssignCtx {
                            end,
                            start,
                            open_span,
                            first: terms.is_empty(),
                        };
                        let (term, terminator) = self.parse_reference(span, Some(ctx))?;
                        terms.push(term);
                        if let Some(terminator) = terminator {
                            // The assignment's right-hand side consumed our
                            // terminator.
                            return Ok((infer::finish(terms), terminator));
                        }
                    } else {
                        // A bare '$' not followed by a letter is literal.
                        terms.push(Term::new(TermCode::Str("$".to_string()), ValueKind::Str));
                    }
                }
                _ => terms.push(self.parse_term(c)?),
            }
        }
    }

    fn eof_error(&self, end: ExprEnd, start: usize, open_span: Span) -> ParseError {
        let excerpt = self.cursor.source()[start..].to_string();
        match end {
            ExprEnd::Brace => ParseError::UnterminatedExpression {
                span: open_span,
                excerpt,
            },
            ExprEnd::Paren | ExprEnd::Arg => ParseError::UnterminatedArgs {
                span: open_span,
                excerpt,
            },
        }
    }

    /// Parse one non-reference term starting at `c`.
    fn parse_term(&mut self, c: char) -> Result<Term, ParseError> {
        match c {
            '0'..='9' => self.parse_number(),
            '.' if self.cursor.peek_nth(1).is_some_and(|d| d.is_ascii_digit()) => {
                self.parse_number()
            }
            '"' => self.parse_string(),
            '+' | '-' | '*' | '/' | '%' => {
                let run = self
                    .cursor
                    .eat_while(|ch| matches!(ch, '+' | '-' | '*' | '/' | '%'));
                // Arithmetic runs are provisionally integral.
                Ok(Term::new(TermCode::Ops(run.to_string()), ValueKind::Long))
            }
            '>' | '<' | '=' | '&' | '|' | '!' => {
                let run = self
                    .cursor
                    .eat_while(|ch| matches!(ch, '>' | '<' | '=' | '&' | '|' | '!'));
                // Relational/boolean operators carry no value type themselves.
                Ok(Term::new(TermCode::Ops(run.to_string()), ValueKind::None))
            }
            '(' => {
                let start = self.cursor.offset();
                let span = self.cursor.span();
                self.cursor.advance();
                let (inner, _) = self.parse_expression(ExprEnd::Paren, start, span)?;
                let kind = inner.kind;
                Ok(Term::new(TermCode::Group(Box::new(inner)), kind))
            }
            _ if c.is_alphabetic() => self.parse_word(),
            _ => Err(ParseError::UnexpectedChar {
                found: c,
                span: self.cursor.span(),
            }),
        }
    }

    /// A maximal run of digits and `.`: `Long` without a dot, `Double` with.
    fn parse_number(&mut self) -> Result<Term, ParseError> {
        let span = self.cursor.span();
        let run = self
            .cursor
            .eat_while(|ch| ch.is_ascii_digit() || ch == '.');
        if run.contains('.') {
            match run.parse::<f64>() {
                Ok(v) => Ok(Term::new(TermCode::Double(v), ValueKind::Double)),
                Err(_) => Err(ParseError::InvalidNumber {
                    span,
                    literal: run.to_string(),
                }),
            }
        } else {
            match run.parse::<i64>() {
                Ok(v) => Ok(Term::new(TermCode::Long(v), ValueKind::Long)),
                Err(_) => Err(ParseError::InvalidNumber {
                    span,
                    literal: run.to_string(),
                }),
            }
        }
    }

    /// A double-quoted string literal with backslash escapes.
    fn parse_string(&mut self) -> Result<Term, ParseError> {
        let span = self.cursor.span();
        self.cursor.advance(); // opening quote
        let mut text = String::new();
        loop {
            match self.cursor.advance() {
                None => return Err(ParseError::UnterminatedString { span }),
                Some('"') => return Ok(Term::new(TermCode::Str(text), ValueKind::Str)),
                Some('\\') => match self.cursor.advance() {
                    None => return Err(ParseError::UnterminatedString { span }),
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('r') => text.push('\r'),
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    Some(other) => {
                        text.push('\\');
                        text.push(other);
                    }
                },
                Some(other) => text.push(other),
            }
        }
    }

    /// `true` / `false`; any other bare word cannot start a term.
    fn parse_word(&mut self) -> Result<Term, ParseError> {
        let span = self.cursor.span();
        let word = self.cursor.eat_while(|ch| ch.is_alphanumeric() || ch == '_');
        match word {
            "true" => Ok(Term::new(TermCode::Bool(true), ValueKind::Bool)),
            "false" => Ok(Term::new(TermCode::Bool(false), ValueKind::Bool)),
            _ => Err(ParseError::UnexpectedChar {
                found: word.chars().next().unwrap_or(' '),
                span,
            }),
        }
    }

    /// Whether the characters after a consumed `$` begin a reference:
    /// a letter, or a `(i)`/`(f)` type hint followed by a letter.
    pub(crate) fn at_reference_start(&self) -> bool {
        match self.cursor.peek() {
            Some(c) if c.is_alphabetic() => true,
            Some('(') => {
                matches!(self.cursor.peek_nth(1), Some('i') | Some('f'))
                    && self.cursor.peek_nth(2) == Some(')')
                    && self.cursor.peek_nth(3).is_some_and(char::is_alphabetic)
            }
            _ => false,
        }
    }

    /// Parse an inline reference in literal text (no assignment allowed).
    pub(crate) fn parse_inline_reference(&mut self, span: Span) -> Result<Term, ParseError> {
        let (term, _) = self.parse_reference(span, None)?;
        Ok(term)
    }

    /// Parse a `$`-reference. The leading `$` has been consumed and the next
    /// character is a letter (or a `(i)`/`(f)` hint).
    ///
    /// Returns the term plus, for assignments, the expression terminator the
    /// right-hand side consumed.
    fn parse_reference(
        &mut self,
        span: Span,
        assign: Option<AssignCtx>,
    ) -> Result<(Term, Option<char>), ParseError> {
        let hint = self.parse_hint();
        let name = self.identifier()?;

        // Static call on an imported type: $Ident::method(args).
        if self.cursor.peek() == Some(':') && self.cursor.peek_nth(1) == Some(':') {
            self.cursor.advance();
            self.cursor.advance();
            let method = self.identifier()?;
            if !self.cursor.eat('(') {
                return Err(ParseError::UnexpectedChar {
                    found: self.cursor.peek().unwrap_or(' '),
                    span: self.cursor.span(),
                });
            }
            let args = self.parse_args()?;
            let calls = self.parse_call_chain()?;
            return Ok((
                self.ref_term(span, hint, RefTarget::Static {
                    ident: name,
                    type_name: None,
                    method,
                    args,
                }, calls),
                None,
            ));
        }

        // Direct call via a static import: $name(args).
        if self.cursor.peek() == Some('(') {
            self.cursor.advance();
            let args = self.parse_args()?;
            let calls = self.parse_call_chain()?;
            return Ok((
                self.ref_term(span, hint, RefTarget::Free {
                    name,
                    type_name: None,
                    args,
                }, calls),
                None,
            ));
        }

        // Assignment: $name=expr (never '==', never inline).
        if self.cursor.peek() == Some('=') && self.cursor.peek_nth(1) != Some('=') {
            if let Some(ctx) = assign {
                if !ctx.first {
                    return Err(ParseError::UnwrappedAssignment {
                        span,
                        excerpt: self.cursor.source()[ctx.start..self.cursor.offset()].to_string(),
                    });
                }
                self.cursor.advance(); // '='
                let (rhs, terminator) =
                    self.parse_expression(ctx.end, ctx.start, ctx.open_span)?;
                let term = Term {
                    code: TermCode::Assign {
                        name,
                        rhs: Box::new(rhs),
                    },
                    kind: ValueKind::Bind,
                    is_assignment: true,
                    coerce: None,
                };
                return Ok((term, Some(terminator)));
            }
        }

        // Plain lookup, possibly with a chained instance-call sequence.
        let calls = self.parse_call_chain()?;
        Ok((
            self.ref_term(span, hint, RefTarget::Binding { name }, calls),
            None,
        ))
    }

    /// Optional `(i)` / `(f)` type hint after `$`.
    fn parse_hint(&mut self) -> Option<Coercion> {
        if self.cursor.peek() != Some('(') || self.cursor.peek_nth(2) != Some(')') {
            return None;
        }
        let coercion = match self.cursor.peek_nth(1) {
            Some('i') => Coercion::Long,
            Some('f') => Coercion::Double,
            _ => return None,
        };
        self.cursor.advance();
        self.cursor.advance();
        self.cursor.advance();
        Some(coercion)
    }

    fn ref_term(
        &self,
        span: Span,
        hint: Option<Coercion>,
        target: RefTarget,
        calls: Vec<MethodCall>,
    ) -> Term {
        // A hinted plain lookup has a known kind; everything else is only
        // known at render time.
        let plain = calls.is_empty() && matches!(target, RefTarget::Binding { .. });
        let kind = match hint {
            Some(Coercion::Long) if plain => ValueKind::Long,
            Some(Coercion::Double) if plain => ValueKind::Double,
            _ => ValueKind::Bind,
        };
        Term {
            code: TermCode::Ref(RefTerm {
                span,
                hint,
                target,
                calls,
            }),
            kind,
            is_assignment: false,
            coerce: hint,
        }
    }

    /// An identifier: a letter followed by letters, digits, or `_`.
    fn identifier(&mut self) -> Result<String, ParseError> {
        let span = self.cursor.span();
        if !self.cursor.peek().is_some_and(char::is_alphabetic) {
            return Err(ParseError::EmptyIdentifier { span });
        }
        let word = self.cursor.eat_while(|ch| ch.is_alphanumeric() || ch == '_');
        Ok(word.to_string())
    }

    /// Chained instance calls: `.name(args)` or the zero-argument `.name`.
    fn parse_call_chain(&mut self) -> Result<Vec<MethodCall>, ParseError> {
        let mut calls = Vec::new();
        while self.cursor.peek() == Some('.')
            && self.cursor.peek_nth(1).is_some_and(char::is_alphabetic)
        {
            self.cursor.advance(); // '.'
            let name = self.identifier()?;
            let args = if self.cursor.eat('(') {
                self.parse_args()?
            } else {
                Vec::new()
            };
            calls.push(MethodCall { name, args });
        }
        Ok(calls)
    }

    /// Comma-separated argument expressions; the opening `(` has been
    /// consumed. Consumes the closing `)`.
    fn parse_args(&mut self) -> Result<Vec<ExprNode>, ParseError> {
        let start = self.cursor.offset().saturating_sub(1);
        let open_span = self.cursor.span();
        self.skip_whitespace();
        if self.cursor.eat(')') {
            return Ok(Vec::new());
        }
        let mut args = Vec::new();
        loop {
            let (node, terminator) = self.parse_expression(ExprEnd::Arg, start, open_span)?;
            args.push(node);
            if terminator == ')' {
                return Ok(args);
            }
        }
    }

    fn skip_whitespace(&mut self) {
        self.cursor.eat_while(char::is_whitespace);
    }
}
