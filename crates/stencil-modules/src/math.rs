//! Static math functions on `stencil.math.Math`.
//!
//! Each function is registered in integral and floating overloads where the
//! distinction matters; the resolver picks the cheaper one for the actual
//! argument values, so `$Math::min(5,5.2)` lands on the double overload and
//! renders `5.0`.

use stencil_core::{NativeError, RegistrationError, Value};
use stencil_registry::{FunctionEntry, HostRegistry, ParamKind};

use crate::MATH_TYPE;

pub(crate) fn register(registry: &mut HostRegistry) -> Result<(), RegistrationError> {
    registry.register_type(MATH_TYPE)?;

    let entries = vec![
        FunctionEntry::new("min", &[ParamKind::Long, ParamKind::Long], |args: &[Value]| {
            let (a, b) = two_longs(args)?;
            Ok(Value::Long(a.min(b)))
        }),
        FunctionEntry::new(
            "min",
            &[ParamKind::Double, ParamKind::Double],
            |args: &[Value]| {
                let (a, b) = two_doubles(args)?;
                Ok(Value::Double(a.min(b)))
            },
        ),
        FunctionEntry::new("max", &[ParamKind::Long, ParamKind::Long], |args: &[Value]| {
            let (a, b) = two_longs(args)?;
            Ok(Value::Long(a.max(b)))
        }),
        FunctionEntry::new(
            "max",
            &[ParamKind::Double, ParamKind::Double],
            |args: &[Value]| {
                let (a, b) = two_doubles(args)?;
                Ok(Value::Double(a.max(b)))
            },
        ),
        FunctionEntry::new("abs", &[ParamKind::Long], |args: &[Value]| {
            Ok(Value::Long(one_long(args)?.wrapping_abs()))
        }),
        FunctionEntry::new("abs", &[ParamKind::Double], |args: &[Value]| {
            Ok(Value::Double(one_double(args)?.abs()))
        }),
        FunctionEntry::new("floor", &[ParamKind::Double], |args: &[Value]| {
            Ok(Value::Double(one_double(args)?.floor()))
        }),
        FunctionEntry::new("ceil", &[ParamKind::Double], |args: &[Value]| {
            Ok(Value::Double(one_double(args)?.ceil()))
        }),
        FunctionEntry::new("sqrt", &[ParamKind::Double], |args: &[Value]| {
            Ok(Value::Double(one_double(args)?.sqrt()))
        }),
        FunctionEntry::new(
            "pow",
            &[ParamKind::Double, ParamKind::Double],
            |args: &[Value]| {
                let (a, b) = two_doubles(args)?;
                Ok(Value::Double(a.powf(b)))
            },
        ),
        FunctionEntry::new("round", &[ParamKind::Double], |args: &[Value]| {
            Ok(Value::Long(one_double(args)?.round() as i64))
        }),
    ];
    for entry in entries {
        registry.register_static(MATH_TYPE, entry)?;
    }
    Ok(())
}

fn one_long(args: &[Value]) -> Result<i64, NativeError> {
    args.first()
        .and_then(Value::long_value)
        .ok_or_else(|| NativeError::new("expected an integral argument"))
}

fn one_double(args: &[Value]) -> Result<f64, NativeError> {
    args.first()
        .and_then(Value::double_value)
        .ok_or_else(|| NativeError::new("expected a numeric argument"))
}

fn two_longs(args: &[Value]) -> Result<(i64, i64), NativeError> {
    match args {
        [a, b] => match (a.long_value(), b.long_value()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(NativeError::new("expected integral arguments")),
        },
        _ => Err(NativeError::new("expected two arguments")),
    }
}

fn two_doubles(args: &[Value]) -> Result<(f64, f64), NativeError> {
    match args {
        [a, b] => match (a.double_value(), b.double_value()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(NativeError::new("expected numeric arguments")),
        },
        _ => Err(NativeError::new("expected two arguments")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_registry;

    #[test]
    fn stock_math_overloads_are_registered() {
        let registry = default_registry();
        assert!(registry.contains_type(MATH_TYPE));
        assert_eq!(registry.statics(MATH_TYPE, "min").len(), 2);
        assert_eq!(registry.statics(MATH_TYPE, "max").len(), 2);
        assert_eq!(registry.statics(MATH_TYPE, "abs").len(), 2);
        assert_eq!(registry.statics(MATH_TYPE, "round").len(), 1);
        assert!(registry.statics(MATH_TYPE, "nope").is_empty());
    }

    #[test]
    fn min_double_overload_computes() {
        let registry = default_registry();
        let entry = &registry.statics(MATH_TYPE, "min")[1];
        let result = entry
            .func
            .call(&[Value::Double(-5.2), Value::Double(5.1)])
            .unwrap();
        assert_eq!(result, Value::Double(-5.2));
    }

    #[test]
    fn round_yields_long() {
        let registry = default_registry();
        let entry = &registry.statics(MATH_TYPE, "round")[0];
        assert_eq!(entry.func.call(&[Value::Double(2.5)]).unwrap(), Value::Long(3));
        assert_eq!(entry.func.call(&[Value::Double(-2.5)]).unwrap(), Value::Long(-3));
    }
}
