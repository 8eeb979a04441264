//! stencil - a small text-template engine with typed host calls.
//!
//! Templates are plain text with `{expression}` regions and inline `$name`
//! references. Expressions support numeric, string, and boolean literals,
//! binding lookups, chained instance calls, and whitelisted static calls on
//! registered host types, evaluated as a strict left-to-right fold.
//!
//! ```
//! use stencil::prelude::*;
//!
//! let engine = TemplateEngine::new(
//!     stencil::modules::default_registry(),
//!     &stencil::modules::default_imports(),
//!     &[],
//! )
//! .unwrap();
//! let template = engine.compile("Hello {$greeting}, {$Math::min(5,5.2)}").unwrap();
//! let mut bindings = Bindings::new().with("greeting", "world");
//! assert_eq!(engine.render(&template, &mut bindings).unwrap(), "Hello world, 5.0");
//! ```

pub use stencil_compiler::{CompiledTemplate, TemplateEngine};
pub use stencil_core::{
    BadReference, Bindings, NativeCallable, NativeError, NativeFn, ParseError, RegistrationError,
    RenderError, Value, ValueKind,
};
pub use stencil_parser::{ExprNode, Segment, Term, TermCode};
pub use stencil_registry::{FunctionEntry, HostRegistry, ImportPattern, ParamKind, TypeTag};

/// The stock host modules: math statics, string methods, conversions.
pub mod modules {
    pub use stencil_modules::{
        MATH_TYPE, default_imports, default_registry, default_static_imports,
    };
}

/// Everything most hosts need to compile and render templates.
pub mod prelude {
    pub use crate::modules::{default_imports, default_registry, default_static_imports};
    pub use stencil_compiler::{CompiledTemplate, TemplateEngine};
    pub use stencil_core::{
        BadReference, Bindings, NativeError, ParseError, RenderError, Value, ValueKind,
    };
    pub use stencil_registry::{FunctionEntry, HostRegistry, ParamKind, TypeTag};
}
