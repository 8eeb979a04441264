//! The stencil capability table.
//!
//! Templates can only call what a host application registered ahead of time:
//! [`HostRegistry`] stores host types and typed function signatures, and
//! [`ImportPattern`] whitelists which of them a given template may name.

mod imports;
mod registry;

pub use imports::{ImportPattern, resolve_static_import, resolve_type};
pub use registry::{FunctionEntry, HostRegistry, ParamKind, TypeTag};
