//! Error types for every phase of template processing.
//!
//! - [`ParseError`] - compile-time failures; the template is rejected before
//!   any rendering is attempted.
//! - [`RegistrationError`] - host type/function registration failures.
//! - [`BadReference`] - recoverable render-time failures. The renderer
//!   catches these per expression and substitutes the expression's original
//!   source text; they never escape a `render` call.
//! - [`RenderError`] - fatal render-time failures; the whole render aborts.
//! - [`NativeError`] - raised inside a registered host function, converted
//!   into a fatal [`RenderError`] by the evaluator.

use thiserror::Error;

use crate::span::Span;
use crate::value::ValueKind;

/// Errors raised while scanning or parsing template source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The template ends on a backslash with nothing to escape.
    #[error("cannot end on a bare backslash at {span}")]
    TrailingBackslash { span: Span },

    /// EOF inside an expression region opened by `{`.
    #[error("EOF while scanning expression at {span}: '{excerpt}'")]
    UnterminatedExpression { span: Span, excerpt: String },

    /// A double-quoted string literal was not closed.
    #[error("unterminated string literal at {span}")]
    UnterminatedString { span: Span },

    /// EOF inside a call argument list.
    #[error("EOF while scanning argument list at {span}: '{excerpt}'")]
    UnterminatedArgs { span: Span, excerpt: String },

    /// A reference or method name of zero length.
    #[error("no reference name found at {span}")]
    EmptyIdentifier { span: Span },

    /// An assignment appeared inside a multi-term expression without
    /// parentheses around it.
    #[error("must wrap assignment with () in an expression at {span}: '{excerpt}'")]
    UnwrappedAssignment { span: Span, excerpt: String },

    /// A character that cannot start a term.
    #[error("expected a term at {span}, found '{found}'")]
    UnexpectedChar { found: char, span: Span },

    /// A numeric literal that does not parse.
    #[error("invalid number at {span}: '{literal}'")]
    InvalidNumber { span: Span, literal: String },

    /// A `$Type::method(...)` call whose type matches no import pattern.
    #[error("no import matches static call '{name}' at {span}")]
    NoImportMatch { name: String, span: Span },

    /// A `$func(...)` call whose name matches no static-import pattern.
    #[error("no static import matches call '{name}' at {span}")]
    NoStaticImportMatch { name: String, span: Span },
}

/// Errors raised while registering host types and functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// The qualified type name is already registered.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// A function was registered against an unknown type.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// An import pattern that is empty or malformed.
    #[error("invalid import pattern: '{0}'")]
    InvalidImport(String),
}

/// A recoverable render-time failure.
///
/// The renderer catches these at the segment boundary and substitutes the
/// original source text of just that expression, then keeps rendering.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BadReference {
    /// A referenced binding does not exist (including a missing receiver
    /// for a method call).
    #[error("no binding named '{name}'")]
    MissingBinding { name: String },

    /// No registered overload matches the evaluated argument types.
    #[error("no overload of '{name}' matches ({args})")]
    NoMatchingOverload { name: String, args: String },
}

/// A fatal render-time failure; the whole render call aborts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// A bound value could not be treated as the kind the expression needs.
    #[error("cannot treat {kind:?} value as {target}")]
    Coerce { kind: ValueKind, target: &'static str },

    /// An operator that does not apply to its operands.
    #[error("operator '{op}' cannot apply to {kind:?} operands")]
    UnsupportedOperator { op: String, kind: ValueKind },

    /// Two value terms with no operator between them (only legal when the
    /// whole expression is a string concatenation).
    #[error("adjacent values with no operator between them")]
    MissingOperator,

    /// Integer division or remainder by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A registered host function failed.
    #[error("call to '{name}' failed: {source}")]
    NativeCall {
        name: String,
        #[source]
        source: NativeError,
    },
}

/// An error raised inside a registered host function.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct NativeError {
    /// Human-readable description of the failure.
    pub message: String,
}

impl NativeError {
    /// Create an error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
