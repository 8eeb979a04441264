//! Host function storage.
//!
//! Registered host functions are type-erased behind [`NativeFn`] so that
//! callables of different shapes can sit in one overload list. Instance
//! methods receive their receiver as the first element of the argument
//! slice; static functions receive only their declared arguments.

use std::fmt;
use std::sync::Arc;

use crate::error::NativeError;
use crate::value::Value;

/// Type-erased host function.
///
/// Wraps any callable implementing [`NativeCallable`]. The inner callable is
/// behind an `Arc` so a `NativeFn` can be cloned into lookup structures
/// cheaply.
pub struct NativeFn {
    inner: Arc<dyn NativeCallable + Send + Sync>,
}

impl NativeFn {
    /// Wrap a callable.
    pub fn new<F>(f: F) -> Self
    where
        F: NativeCallable + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Invoke the function with already-coerced arguments.
    pub fn call(&self, args: &[Value]) -> Result<Value, NativeError> {
        self.inner.call(args)
    }
}

impl Clone for NativeFn {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn").finish_non_exhaustive()
    }
}

/// Trait for callable host functions.
pub trait NativeCallable {
    /// Call the function. Arguments have already passed overload resolution
    /// and numeric coercion.
    fn call(&self, args: &[Value]) -> Result<Value, NativeError>;
}

impl<F> NativeCallable for F
where
    F: Fn(&[Value]) -> Result<Value, NativeError>,
{
    fn call(&self, args: &[Value]) -> Result<Value, NativeError> {
        (self)(args)
    }
}
