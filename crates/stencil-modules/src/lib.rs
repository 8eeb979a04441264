//! The built-in host library for stencil templates.
//!
//! [`default_registry`] populates a [`HostRegistry`] with the stock modules:
//! math statics on `stencil.math.Math`, instance methods on strings, and
//! conversion methods on the primitive kinds. [`default_imports`] whitelists
//! the stock types so `$Math::min(...)` works out of the box.
//!
//! Hosts that want a tighter capability surface build their own registry
//! (or start from this one) and pass narrower whitelists.

mod math;
mod std_methods;
mod string;

use stencil_registry::HostRegistry;

/// The qualified name of the stock math type.
pub const MATH_TYPE: &str = "stencil.math.Math";

/// A registry pre-populated with every stock module.
pub fn default_registry() -> HostRegistry {
    let mut registry = HostRegistry::new();
    // Registration of the stock modules cannot collide with anything in a
    // fresh registry.
    math::register(&mut registry).unwrap_or_else(|err| panic!("stock math module: {err}"));
    string::register(&mut registry);
    std_methods::register(&mut registry);
    registry
}

/// The import whitelist covering the stock types.
pub fn default_imports() -> Vec<&'static str> {
    vec![MATH_TYPE]
}

/// The static-import whitelist covering the stock static functions.
pub fn default_static_imports() -> Vec<&'static str> {
    vec!["stencil.math.Math.*"]
}
