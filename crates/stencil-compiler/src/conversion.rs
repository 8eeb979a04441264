//! Argument-to-parameter conversions for overload resolution.
//!
//! Unlike a conventional static checker, conversions here are ranked against
//! the concrete argument *value*: narrowing within a numeric family is
//! allowed only when the value provably fits the parameter kind's range.
//!
//! ## Rules
//!
//! 1. Identical kind: no penalty.
//! 2. Integral argument, floating parameter: widen, penalty 2.
//! 3. Floating argument, integral parameter: rejected outright.
//! 4. Same family, different width: consult the range table
//!    (`byte < short < int < long`; `float < double` by max magnitude) and
//!    accept with penalty 1 when the value fits.
//! 5. Non-numeric argument: the parameter must be assignable from it
//!    (`Any` accepts everything), penalty 2.

use stencil_core::Value;
use stencil_registry::ParamKind;

/// A viable conversion: its rank cost plus the already-coerced value.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Rank penalty (lower is better).
    pub cost: u32,
    /// The argument after coercion to the parameter's kind.
    pub coerced: Value,
}

impl Conversion {
    /// Identical kind.
    pub const COST_EXACT: u32 = 0;
    /// Same numeric family, different width, value fits the range.
    pub const COST_NUMERIC_FIT: u32 = 1;
    /// Integral argument widened to a floating parameter.
    pub const COST_INT_TO_FLOAT: u32 = 2;
    /// Non-numeric argument accepted by an assignable parameter.
    pub const COST_ASSIGNABLE: u32 = 2;
}

/// Find the conversion from a concrete argument to a parameter kind, or
/// `None` if the candidate must be rejected.
pub fn find_conversion(arg: &Value, param: ParamKind) -> Option<Conversion> {
    match arg {
        Value::Long(v) => long_conversion(*v, param),
        Value::Double(v) => double_conversion(*v, param),
        Value::Str(_) => assignable(arg, matches!(param, ParamKind::Str), param),
        Value::Bool(_) => assignable(arg, matches!(param, ParamKind::Bool), param),
        Value::Opaque(_) => assignable(arg, false, param),
    }
}

fn long_conversion(v: i64, param: ParamKind) -> Option<Conversion> {
    match param {
        ParamKind::Long => Some(Conversion {
            cost: Conversion::COST_EXACT,
            coerced: Value::Long(v),
        }),
        ParamKind::Byte | ParamKind::Short | ParamKind::Int => {
            // Integral narrowing is allowed only when the value fits.
            integral_fits(v, param).then_some(Conversion {
                cost: Conversion::COST_NUMERIC_FIT,
                coerced: Value::Long(v),
            })
        }
        ParamKind::Float | ParamKind::Double => Some(Conversion {
            cost: Conversion::COST_INT_TO_FLOAT,
            coerced: Value::Double(v as f64),
        }),
        ParamKind::Any => Some(Conversion {
            cost: Conversion::COST_ASSIGNABLE,
            coerced: Value::Long(v),
        }),
        ParamKind::Bool | ParamKind::Str => None,
    }
}

fn double_conversion(v: f64, param: ParamKind) -> Option<Conversion> {
    match param {
        ParamKind::Double => Some(Conversion {
            cost: Conversion::COST_EXACT,
            coerced: Value::Double(v),
        }),
        ParamKind::Float => {
            // Range check by max magnitude; the value itself is kept as a
            // double.
            (v.abs() <= f32::MAX as f64).then_some(Conversion {
                cost: Conversion::COST_NUMERIC_FIT,
                coerced: Value::Double(v),
            })
        }
        // No implicit narrowing from a floating kind to an integral kind.
        ParamKind::Byte | ParamKind::Short | ParamKind::Int | ParamKind::Long => None,
        ParamKind::Any => Some(Conversion {
            cost: Conversion::COST_ASSIGNABLE,
            coerced: Value::Double(v),
        }),
        ParamKind::Bool | ParamKind::Str => None,
    }
}

fn assignable(arg: &Value, identical: bool, param: ParamKind) -> Option<Conversion> {
    if identical {
        return Some(Conversion {
            cost: Conversion::COST_EXACT,
            coerced: arg.clone(),
        });
    }
    matches!(param, ParamKind::Any).then_some(Conversion {
        cost: Conversion::COST_ASSIGNABLE,
        coerced: arg.clone(),
    })
}

/// Sign-aware range table for integral parameter kinds.
fn integral_fits(v: i64, param: ParamKind) -> bool {
    match param {
        ParamKind::Byte => (i64::from(i8::MIN)..=i64::from(i8::MAX)).contains(&v),
        ParamKind::Short => (i64::from(i16::MIN)..=i64::from(i16::MAX)).contains(&v),
        ParamKind::Int => (i64::from(i32::MIN)..=i64::from(i32::MAX)).contains(&v),
        ParamKind::Long => true,
        _ => false,
    }
}
