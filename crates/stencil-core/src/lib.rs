//! Core types shared by every stencil crate.
//!
//! This crate defines the closed [`Value`] union that flows through template
//! evaluation, the [`Bindings`] map supplied by callers, source [`Span`]s for
//! error reporting, the [`NativeFn`] wrapper for host callables, and the
//! error hierarchy for each phase:
//!
//! ```text
//! ParseError        - compile-time, fatal; template is rejected
//! RegistrationError - host type/function registration failures
//! BadReference      - render-time, recoverable per expression
//! RenderError       - render-time, fatal; the whole render aborts
//! ```

mod bindings;
mod error;
mod native_fn;
mod span;
mod value;

pub use bindings::Bindings;
pub use error::{BadReference, NativeError, ParseError, RegistrationError, RenderError};
pub use native_fn::{NativeCallable, NativeFn};
pub use span::Span;
pub use value::{Value, ValueKind, format_double};
