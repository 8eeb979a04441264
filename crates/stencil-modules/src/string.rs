//! Instance methods on string values.
//!
//! Registered against [`TypeTag::Str`], so any string-valued receiver in a
//! template can chain them: `{$name.trim().length()}`. Indices are counted
//! in characters, not bytes, and out-of-range indices fail the call with a
//! [`NativeError`].

use stencil_core::{NativeError, Value};
use stencil_registry::{FunctionEntry, HostRegistry, ParamKind, TypeTag};

pub(crate) fn register(registry: &mut HostRegistry) {
    let entries = vec![
        FunctionEntry::new("length", &[], |args: &[Value]| {
            Ok(Value::Long(receiver(args)?.chars().count() as i64))
        }),
        FunctionEntry::new("isEmpty", &[], |args: &[Value]| {
            Ok(Value::Bool(receiver(args)?.is_empty()))
        }),
        FunctionEntry::new("toUpperCase", &[], |args: &[Value]| {
            Ok(Value::Str(receiver(args)?.to_uppercase()))
        }),
        FunctionEntry::new("toLowerCase", &[], |args: &[Value]| {
            Ok(Value::Str(receiver(args)?.to_lowercase()))
        }),
        FunctionEntry::new("trim", &[], |args: &[Value]| {
            Ok(Value::Str(receiver(args)?.trim().to_string()))
        }),
        FunctionEntry::new("substring", &[ParamKind::Int], |args: &[Value]| {
            let s = receiver(args)?;
            let begin = index_arg(args, 1)?;
            char_range(s, begin, s.chars().count()).map(Value::Str)
        }),
        FunctionEntry::new(
            "substring",
            &[ParamKind::Int, ParamKind::Int],
            |args: &[Value]| {
                let s = receiver(args)?;
                let begin = index_arg(args, 1)?;
                let end = index_arg(args, 2)?;
                char_range(s, begin, end).map(Value::Str)
            },
        ),
        FunctionEntry::new("charAt", &[ParamKind::Int], |args: &[Value]| {
            let s = receiver(args)?;
            let index = index_arg(args, 1)?;
            s.chars()
                .nth(index)
                .map(|c| Value::Str(c.to_string()))
                .ok_or_else(|| {
                    NativeError::new(format!("index {index} out of range for length {}", s.chars().count()))
                })
        }),
        FunctionEntry::new("indexOf", &[ParamKind::Str], |args: &[Value]| {
            let s = receiver(args)?;
            let needle = str_arg(args, 1)?;
            let position = s.find(needle).map_or(-1, |byte| {
                s[..byte].chars().count() as i64
            });
            Ok(Value::Long(position))
        }),
        FunctionEntry::new("contains", &[ParamKind::Str], |args: &[Value]| {
            Ok(Value::Bool(receiver(args)?.contains(str_arg(args, 1)?)))
        }),
        FunctionEntry::new("startsWith", &[ParamKind::Str], |args: &[Value]| {
            Ok(Value::Bool(receiver(args)?.starts_with(str_arg(args, 1)?)))
        }),
        FunctionEntry::new("endsWith", &[ParamKind::Str], |args: &[Value]| {
            Ok(Value::Bool(receiver(args)?.ends_with(str_arg(args, 1)?)))
        }),
        FunctionEntry::new(
            "replace",
            &[ParamKind::Str, ParamKind::Str],
            |args: &[Value]| {
                let s = receiver(args)?;
                Ok(Value::Str(s.replace(str_arg(args, 1)?, str_arg(args, 2)?)))
            },
        ),
        FunctionEntry::new("concat", &[ParamKind::Str], |args: &[Value]| {
            let mut out = receiver(args)?.to_string();
            out.push_str(str_arg(args, 1)?);
            Ok(Value::Str(out))
        }),
    ];
    for entry in entries {
        registry.register_method(TypeTag::Str, entry);
    }
}

fn receiver(args: &[Value]) -> Result<&str, NativeError> {
    match args.first() {
        Some(Value::Str(s)) => Ok(s),
        _ => Err(NativeError::new("expected a string receiver")),
    }
}

fn str_arg(args: &[Value], index: usize) -> Result<&str, NativeError> {
    match args.get(index) {
        Some(Value::Str(s)) => Ok(s),
        _ => Err(NativeError::new("expected a string argument")),
    }
}

fn index_arg(args: &[Value], index: usize) -> Result<usize, NativeError> {
    let raw = args
        .get(index)
        .and_then(Value::long_value)
        .ok_or_else(|| NativeError::new("expected an index argument"))?;
    usize::try_from(raw).map_err(|_| NativeError::new(format!("negative index {raw}")))
}

fn char_range(s: &str, begin: usize, end: usize) -> Result<String, NativeError> {
    let total = s.chars().count();
    if begin > end || end > total {
        return Err(NativeError::new(format!(
            "range {begin}..{end} out of bounds for length {total}"
        )));
    }
    Ok(s.chars().skip(begin).take(end - begin).collect())
}
