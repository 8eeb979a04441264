//! Overload resolution for template calls.
//!
//! Given a callable name, its registered overload list, and the evaluated
//! arguments, selects the cheapest viable candidate:
//!
//! 1. Filter candidates by parameter count.
//! 2. Find a conversion for every argument (rejecting the candidate if any
//!    argument has none).
//! 3. Sum the conversion costs into the candidate's rank.
//! 4. Pick the lowest-ranked candidate; ties go to the first found.
//!
//! Failure is a recoverable [`BadReference`] naming the attempted call and
//! the argument kinds - the renderer falls back to the expression's source
//! text.

mod ranking;

pub use ranking::best_match;

use stencil_core::{BadReference, Value};
use stencil_registry::FunctionEntry;

use crate::conversion::find_conversion;

/// Result of successful overload resolution. Transient: consumed by the
/// call and discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct CallCandidate {
    /// Index of the selected entry in the overload list.
    pub index: usize,
    /// Total conversion cost (lower is better).
    pub rank: u32,
    /// Arguments coerced to the selected signature.
    pub args: Vec<Value>,
}

/// Resolve a call against an overload list.
pub fn resolve_overload(
    name: &str,
    entries: &[FunctionEntry],
    args: &[Value],
) -> Result<CallCandidate, BadReference> {
    let mut viable = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if entry.params.len() != args.len() {
            continue;
        }
        let mut rank = 0;
        let mut coerced = Vec::with_capacity(args.len());
        let mut rejected = false;
        for (arg, &param) in args.iter().zip(&entry.params) {
            match find_conversion(arg, param) {
                Some(conversion) => {
                    rank += conversion.cost;
                    coerced.push(conversion.coerced);
                }
                None => {
                    rejected = true;
                    break;
                }
            }
        }
        if !rejected {
            viable.push(CallCandidate {
                index,
                rank,
                args: coerced,
            });
        }
    }

    match best_match(viable) {
        Some(candidate) => {
            tracing::trace!(name, rank = candidate.rank, index = candidate.index, "overload selected");
            Ok(candidate)
        }
        None => Err(BadReference::NoMatchingOverload {
            name: name.to_string(),
            args: format_arg_kinds(args),
        }),
    }
}

/// Render argument kinds for error messages: `"Long, Double"`.
pub fn format_arg_kinds(args: &[Value]) -> String {
    let kinds: Vec<String> = args.iter().map(|a| format!("{:?}", a.kind())).collect();
    kinds.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::NativeError;
    use stencil_registry::ParamKind;

    fn first_arg(args: &[Value]) -> Result<Value, NativeError> {
        Ok(args.first().cloned().unwrap_or(Value::Long(0)))
    }

    fn min_overloads() -> Vec<FunctionEntry> {
        vec![
            FunctionEntry::new("min", &[ParamKind::Long, ParamKind::Long], first_arg),
            FunctionEntry::new("min", &[ParamKind::Double, ParamKind::Double], first_arg),
        ]
    }

    #[test]
    fn exact_integral_match_beats_widening() {
        let candidate =
            resolve_overload("min", &min_overloads(), &[Value::Long(1), Value::Long(2)]).unwrap();
        assert_eq!(candidate.index, 0);
        assert_eq!(candidate.rank, 0);
    }

    #[test]
    fn mixed_args_pick_the_floating_overload() {
        // (Long, Double): the integral overload is rejected outright, the
        // floating one widens the long with penalty 2.
        let candidate = resolve_overload(
            "min",
            &min_overloads(),
            &[Value::Long(5), Value::Double(5.2)],
        )
        .unwrap();
        assert_eq!(candidate.index, 1);
        assert_eq!(candidate.rank, 2);
        assert_eq!(candidate.args, vec![Value::Double(5.0), Value::Double(5.2)]);
    }

    #[test]
    fn arity_mismatch_filters_candidates() {
        let err = resolve_overload("min", &min_overloads(), &[Value::Long(1)]).unwrap_err();
        assert!(matches!(err, BadReference::NoMatchingOverload { .. }));
    }

    #[test]
    fn incompatible_args_are_a_bad_reference() {
        let err = resolve_overload(
            "min",
            &min_overloads(),
            &[Value::from("a"), Value::Long(1)],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "no overload of 'min' matches (Str, Long)"
        );
    }

    #[test]
    fn empty_overload_list_is_a_bad_reference() {
        let err = resolve_overload("nope", &[], &[]).unwrap_err();
        assert!(matches!(err, BadReference::NoMatchingOverload { .. }));
    }
}
