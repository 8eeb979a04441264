//! Expression kind inference and bind-coercion insertion.
//!
//! The overall kind of an expression is computed from its terms with a
//! short-circuiting left-to-right scan: the first `Str` term makes the whole
//! expression a string and stops the scan. Otherwise the strongest kind seen
//! wins, where `Bool` beats `Double` beats `Long` beats `Bind` beats `None`.
//! This is intentionally not conventional type promotion; it matches the
//! engine's documented semantics exactly.
//!
//! Once a numeric or boolean overall kind is decided, every `Bind`-kind term
//! that does not already carry a type-hint coercion is rewritten to coerce
//! its render-time value to that kind. `Bind` terms are left untouched when
//! the overall kind is `Bind` or `Str`.

use stencil_core::ValueKind;

use crate::term::{Coercion, ExprNode, Term};

fn strength(kind: ValueKind) -> u8 {
    match kind {
        ValueKind::None => 0,
        ValueKind::Bind => 1,
        ValueKind::Long => 2,
        ValueKind::Double => 3,
        ValueKind::Bool => 4,
        ValueKind::Str => 5,
    }
}

/// Build an [`ExprNode`] from parsed terms: infer the overall kind and
/// insert coercions on `Bind` terms.
pub fn finish(terms: Vec<Term>) -> ExprNode {
    let mut overall = ValueKind::None;
    for term in &terms {
        if term.kind == ValueKind::Str {
            overall = ValueKind::Str;
            break;
        }
        if strength(term.kind) > strength(overall) {
            overall = term.kind;
        }
    }

    let mut node = ExprNode {
        terms,
        kind: overall,
    };
    let coercion = match overall {
        ValueKind::Long => Some(Coercion::Long),
        ValueKind::Double => Some(Coercion::Double),
        ValueKind::Bool => Some(Coercion::Bool),
        _ => None,
    };
    if let Some(coercion) = coercion {
        for term in &mut node.terms {
            if term.kind == ValueKind::Bind && term.coerce.is_none() {
                term.coerce = Some(coercion);
            }
        }
    }
    node
}
