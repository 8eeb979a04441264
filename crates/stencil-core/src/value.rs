//! The closed value union carried through template evaluation.
//!
//! Templates never see arbitrary runtime objects: every binding, argument,
//! and call result is one of the [`Value`] variants below. Dispatch happens
//! on the tag, never on runtime type introspection.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A value bound into a template or produced by evaluating an expression.
#[derive(Clone)]
pub enum Value {
    /// A text value.
    Str(String),
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Long(i64),
    /// An IEEE double.
    Double(f64),
    /// An opaque host handle; templates can pass it around but only
    /// registered host functions can look inside.
    Opaque(Arc<dyn Any + Send + Sync>),
}

/// The kind of a value, term, or whole expression.
///
/// `Bind` marks a term whose concrete kind is only known at render time
/// (a binding lookup or a call result); `None` marks terms that carry no
/// value of their own (operator runs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Str,
    Bool,
    Long,
    Double,
    Bind,
    None,
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::Str,
            Value::Bool(_) => ValueKind::Bool,
            Value::Long(_) => ValueKind::Long,
            Value::Double(_) => ValueKind::Double,
            Value::Opaque(_) => ValueKind::Bind,
        }
    }

    /// The integral content of this value, truncating a double.
    ///
    /// Returns `None` for non-numeric values.
    pub fn long_value(&self) -> Option<i64> {
        match self {
            Value::Long(v) => Some(*v),
            Value::Double(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// The floating content of this value, widening an integer.
    ///
    /// Returns `None` for non-numeric values.
    pub fn double_value(&self) -> Option<f64> {
        match self {
            Value::Long(v) => Some(*v as f64),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this value is numeric (`Long` or `Double`).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Long(_) | Value::Double(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Double(v) => f.write_str(&format_double(*v)),
            Value::Opaque(_) => f.write_str("<opaque>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Long(v) => f.debug_tuple("Long").field(v).finish(),
            Value::Double(v) => f.debug_tuple("Double").field(v).finish(),
            Value::Opaque(_) => f.debug_struct("Opaque").finish_non_exhaustive(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

/// Render a double the way templates expect: a whole-valued double keeps
/// its decimal point (`5.0`), everything else uses the shortest form.
pub fn format_double(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_double_keeps_decimal_point() {
        assert_eq!(Value::Double(5.0).to_string(), "5.0");
        assert_eq!(Value::Double(-2.0).to_string(), "-2.0");
    }

    #[test]
    fn fractional_double_is_shortest_form() {
        assert_eq!(Value::Double(-5.2).to_string(), "-5.2");
        assert_eq!(Value::Double(0.5).to_string(), "0.5");
    }

    #[test]
    fn long_has_no_decimal_point() {
        assert_eq!(Value::Long(3).to_string(), "3");
    }

    #[test]
    fn long_value_truncates_double() {
        assert_eq!(Value::Double(5.9).long_value(), Some(5));
        assert_eq!(Value::Double(-5.9).long_value(), Some(-5));
        assert_eq!(Value::Str("x".into()).long_value(), None);
    }

    #[test]
    fn double_value_widens_long() {
        assert_eq!(Value::Long(5).double_value(), Some(5.0));
    }

    #[test]
    fn kind_tags() {
        assert_eq!(Value::from("hi").kind(), ValueKind::Str);
        assert_eq!(Value::from(1i64).kind(), ValueKind::Long);
        assert_eq!(Value::from(1.0).kind(), ValueKind::Double);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
    }
}
