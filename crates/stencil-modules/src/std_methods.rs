//! Conversion methods shared by the primitive kinds.
//!
//! Every Long, Double, and Bool receiver answers `toString()`; the numeric
//! kinds also answer `longValue()` and `doubleValue()` for explicit
//! conversion inside an expression, mirroring the `(i)`/`(f)` hints.

use stencil_core::{NativeError, Value};
use stencil_registry::{FunctionEntry, HostRegistry, TypeTag};

pub(crate) fn register(registry: &mut HostRegistry) {
    for tag in [TypeTag::Long, TypeTag::Double, TypeTag::Bool] {
        registry.register_method(
            tag,
            FunctionEntry::new("toString", &[], |args: &[Value]| {
                Ok(Value::Str(receiver(args)?.to_string()))
            }),
        );
    }
    for tag in [TypeTag::Long, TypeTag::Double] {
        registry.register_method(
            tag,
            FunctionEntry::new("longValue", &[], |args: &[Value]| {
                receiver(args)?
                    .long_value()
                    .map(Value::Long)
                    .ok_or_else(|| NativeError::new("expected a numeric receiver"))
            }),
        );
        registry.register_method(
            tag,
            FunctionEntry::new("doubleValue", &[], |args: &[Value]| {
                receiver(args)?
                    .double_value()
                    .map(Value::Double)
                    .ok_or_else(|| NativeError::new("expected a numeric receiver"))
            }),
        );
    }
}

fn receiver(args: &[Value]) -> Result<&Value, NativeError> {
    args.first()
        .ok_or_else(|| NativeError::new("missing receiver"))
}
