//! Parsed template representation: segments, expression nodes, and terms.
//!
//! A template is an ordered sequence of [`Segment`]s. An expression segment
//! holds an [`ExprNode`]: a flat list of [`Term`]s evaluated left to right
//! with no operator precedence. That flatness is deliberate and matches the
//! engine's documented semantics; do not introduce precedence here.

use stencil_core::{Span, ValueKind};

/// A numeric (or boolean) coercion applied to a render-time value.
///
/// Inserted by kind inference on `Bind` terms, or forced up front by a
/// `$(i)` / `$(f)` type hint on a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Treat the value as a 64-bit integer (`longValue()` semantics).
    Long,
    /// Treat the value as a double (`doubleValue()` semantics).
    Double,
    /// Require the value to be a boolean.
    Bool,
}

/// One ordered piece of a compiled template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text, appended verbatim.
    Literal(String),
    /// An embedded expression. `raw` preserves the exact source text of the
    /// expression (delimiters included) for BadReference fallback.
    Expr { node: ExprNode, raw: String },
}

/// A parsed expression: a term list plus its inferred overall kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprNode {
    pub terms: Vec<Term>,
    pub kind: ValueKind,
}

/// One syntactic unit within an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub code: TermCode,
    pub kind: ValueKind,
    pub is_assignment: bool,
    /// Coercion applied to this term's value at render time.
    pub coerce: Option<Coercion>,
}

impl Term {
    /// A non-assignment term of the given code and kind.
    pub fn new(code: TermCode, kind: ValueKind) -> Self {
        Self {
            code,
            kind,
            is_assignment: false,
            coerce: None,
        }
    }
}

/// The evaluable content of a term.
#[derive(Debug, Clone, PartialEq)]
pub enum TermCode {
    /// Integer literal (digit run without `.`).
    Long(i64),
    /// Double literal (digit run containing `.`).
    Double(f64),
    /// Double-quoted string literal.
    Str(String),
    /// `true` / `false`.
    Bool(bool),
    /// A maximal run of operator characters. Arithmetic runs are typed
    /// `Long` provisionally; relational/boolean runs are typed `None`.
    Ops(String),
    /// A parenthesized sub-expression; inherits the inner kind.
    Group(Box<ExprNode>),
    /// A binding reference, optionally with a call chain.
    Ref(RefTerm),
    /// `$name=expr`: evaluate `expr`, write it into the bindings under
    /// `name`, and yield the value. Kind is forced to `Bind`.
    Assign { name: String, rhs: Box<ExprNode> },
}

/// A `$`-reference: a target plus zero or more chained instance calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RefTerm {
    pub span: Span,
    /// `(i)` / `(f)` type hint, if present.
    pub hint: Option<Coercion>,
    pub target: RefTarget,
    /// Instance calls chained with `.` after the target.
    pub calls: Vec<MethodCall>,
}

/// What a reference resolves against.
#[derive(Debug, Clone, PartialEq)]
pub enum RefTarget {
    /// Plain binding lookup: `$name`.
    Binding { name: String },
    /// Static call on an imported type: `$Ident::method(args)`.
    /// `type_name` is filled in at compile time from the import whitelist.
    Static {
        ident: String,
        type_name: Option<String>,
        method: String,
        args: Vec<ExprNode>,
    },
    /// Direct call via a static import: `$name(args)`.
    /// `type_name` is filled in at compile time from the static-import
    /// whitelist.
    Free {
        name: String,
        type_name: Option<String>,
        args: Vec<ExprNode>,
    },
}

/// One chained instance call: `.name(args)`. A chain segment written
/// without parentheses (`.name`) is a zero-argument call.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub name: String,
    pub args: Vec<ExprNode>,
}
