//! Template scanning and expression parsing for stencil.
//!
//! Turns raw template source into ordered [`Segment`]s: literal text runs
//! interleaved with parsed expression nodes. Parsing is a single synchronous
//! CPU-bound pass; it either succeeds completely or fails with a
//! [`ParseError`](stencil_core::ParseError) citing the offending excerpt.
//!
//! Static-call references come out of this crate unresolved (their
//! `type_name` is `None`); the compiler resolves them against the import
//! whitelist before freezing a template.

mod cursor;
mod expr;
mod infer;
mod parser;
mod term;

pub use cursor::Cursor;
pub use infer::finish;
pub use parser::{TemplateParser, parse_template};
pub use term::{Coercion, ExprNode, MethodCall, RefTarget, RefTerm, Segment, Term, TermCode};
