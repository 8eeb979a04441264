//! HostRegistry - the statically registered capability table.
//!
//! Every type and function a template can call must be registered here ahead
//! of time with a typed signature; the overload resolver ranks only against
//! this table, never against runtime introspection. Static functions hang
//! off a host type registered under a dotted qualified name
//! (`"stencil.math.Math"`); instance methods hang off the receiver's value
//! kind.
//!
//! # Thread Safety
//!
//! `HostRegistry` is not synchronized. The intended pattern is two phases:
//! populate it single-threaded during setup, then treat it as read-only
//! while templates compile and render (shared via `&` or `Arc`).

use rustc_hash::FxHashMap;

use stencil_core::{NativeCallable, NativeFn, RegistrationError, Value, ValueKind};

/// The declared kind of one host-function parameter.
///
/// Parameters may declare numeric kinds narrower than the engine's `Long` /
/// `Double` values; the overload resolver's range table decides whether a
/// concrete argument value fits such a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// 8-bit signed integer range.
    Byte,
    /// 16-bit signed integer range.
    Short,
    /// 32-bit signed integer range.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit float magnitude range.
    Float,
    /// IEEE double.
    Double,
    /// Boolean.
    Bool,
    /// Text.
    Str,
    /// Assignable from any value (lowest-rank match).
    Any,
}

impl ParamKind {
    /// Whether this parameter kind is numeric.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ParamKind::Byte
                | ParamKind::Short
                | ParamKind::Int
                | ParamKind::Long
                | ParamKind::Float
                | ParamKind::Double
        )
    }

    /// Whether this parameter kind is an integral kind.
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            ParamKind::Byte | ParamKind::Short | ParamKind::Int | ParamKind::Long
        )
    }

    /// Whether this parameter kind is a floating kind.
    pub fn is_floating(self) -> bool {
        matches!(self, ParamKind::Float | ParamKind::Double)
    }
}

/// The receiver kind an instance method is registered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Str,
    Bool,
    Long,
    Double,
}

impl TypeTag {
    /// The receiver tag for a value, if instance methods can exist on it.
    pub fn of(value: &Value) -> Option<TypeTag> {
        match value.kind() {
            ValueKind::Str => Some(TypeTag::Str),
            ValueKind::Bool => Some(TypeTag::Bool),
            ValueKind::Long => Some(TypeTag::Long),
            ValueKind::Double => Some(TypeTag::Double),
            _ => None,
        }
    }
}

/// One registered callable: a name, a typed parameter list, and the host
/// function to invoke.
#[derive(Debug, Clone)]
pub struct FunctionEntry {
    pub name: String,
    pub params: Vec<ParamKind>,
    pub func: NativeFn,
}

impl FunctionEntry {
    /// Build an entry from a name, parameter kinds, and a callable.
    pub fn new<F>(name: impl Into<String>, params: &[ParamKind], func: F) -> Self
    where
        F: NativeCallable + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params: params.to_vec(),
            func: NativeFn::new(func),
        }
    }
}

/// A host type: a qualified name plus its static functions, stored as
/// overload lists keyed by simple function name.
#[derive(Debug, Default, Clone)]
struct HostType {
    functions: FxHashMap<String, Vec<FunctionEntry>>,
}

/// The capability table templates resolve calls against.
#[derive(Debug, Default, Clone)]
pub struct HostRegistry {
    /// Host types by dotted qualified name.
    types: FxHashMap<String, HostType>,
    /// Instance methods by receiver kind, then simple name (overload lists).
    methods: FxHashMap<TypeTag, FxHashMap<String, Vec<FunctionEntry>>>,
}

impl HostRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a host type under a dotted qualified name.
    pub fn register_type(&mut self, qualified_name: &str) -> Result<(), RegistrationError> {
        if self.types.contains_key(qualified_name) {
            return Err(RegistrationError::DuplicateType(qualified_name.to_string()));
        }
        self.types.insert(qualified_name.to_string(), HostType::default());
        Ok(())
    }

    /// Register a static function on a previously registered type.
    pub fn register_static(
        &mut self,
        type_name: &str,
        entry: FunctionEntry,
    ) -> Result<(), RegistrationError> {
        let host = self
            .types
            .get_mut(type_name)
            .ok_or_else(|| RegistrationError::UnknownType(type_name.to_string()))?;
        host.functions
            .entry(entry.name.clone())
            .or_default()
            .push(entry);
        Ok(())
    }

    /// Register an instance method on a receiver kind. The native callable
    /// receives the receiver as the first element of its argument slice;
    /// `params` lists only the declared parameters.
    pub fn register_method(&mut self, tag: TypeTag, entry: FunctionEntry) {
        self.methods
            .entry(tag)
            .or_default()
            .entry(entry.name.clone())
            .or_default()
            .push(entry);
    }

    /// Whether a type with this qualified name is registered.
    pub fn contains_type(&self, qualified_name: &str) -> bool {
        self.types.contains_key(qualified_name)
    }

    /// Static-function overloads on a type, by simple name.
    pub fn statics(&self, type_name: &str, name: &str) -> &[FunctionEntry] {
        self.types
            .get(type_name)
            .and_then(|t| t.functions.get(name))
            .map_or(&[], Vec::as_slice)
    }

    /// Whether the named type has any static function with this name.
    pub fn has_static(&self, type_name: &str, name: &str) -> bool {
        !self.statics(type_name, name).is_empty()
    }

    /// Instance-method overloads on a receiver kind, by simple name.
    pub fn methods(&self, tag: TypeTag, name: &str) -> &[FunctionEntry] {
        self.methods
            .get(&tag)
            .and_then(|m| m.get(name))
            .map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_identity(args: &[Value]) -> Result<Value, stencil_core::NativeError> {
        Ok(args[0].clone())
    }

    #[test]
    fn register_and_look_up_static_overloads() {
        let mut registry = HostRegistry::new();
        registry.register_type("test.Math").unwrap();
        registry
            .register_static(
                "test.Math",
                FunctionEntry::new("min", &[ParamKind::Long, ParamKind::Long], long_identity),
            )
            .unwrap();
        registry
            .register_static(
                "test.Math",
                FunctionEntry::new("min", &[ParamKind::Double, ParamKind::Double], long_identity),
            )
            .unwrap();

        assert_eq!(registry.statics("test.Math", "min").len(), 2);
        assert!(registry.has_static("test.Math", "min"));
        assert!(!registry.has_static("test.Math", "max"));
        assert!(registry.statics("other.Math", "min").is_empty());
    }

    #[test]
    fn duplicate_type_is_rejected() {
        let mut registry = HostRegistry::new();
        registry.register_type("test.Math").unwrap();
        assert_eq!(
            registry.register_type("test.Math"),
            Err(RegistrationError::DuplicateType("test.Math".to_string()))
        );
    }

    #[test]
    fn static_on_unknown_type_is_rejected() {
        let mut registry = HostRegistry::new();
        let result = registry.register_static(
            "nowhere.Math",
            FunctionEntry::new("min", &[ParamKind::Long], long_identity),
        );
        assert!(matches!(result, Err(RegistrationError::UnknownType(_))));
    }

    #[test]
    fn methods_are_keyed_by_receiver_kind() {
        let mut registry = HostRegistry::new();
        registry.register_method(
            TypeTag::Str,
            FunctionEntry::new("length", &[], long_identity),
        );

        assert_eq!(registry.methods(TypeTag::Str, "length").len(), 1);
        assert!(registry.methods(TypeTag::Long, "length").is_empty());
    }

    #[test]
    fn type_tag_of_value() {
        assert_eq!(TypeTag::of(&Value::from("s")), Some(TypeTag::Str));
        assert_eq!(TypeTag::of(&Value::from(1i64)), Some(TypeTag::Long));
        assert_eq!(TypeTag::of(&Value::from(1.0)), Some(TypeTag::Double));
        assert_eq!(TypeTag::of(&Value::from(true)), Some(TypeTag::Bool));
    }
}
