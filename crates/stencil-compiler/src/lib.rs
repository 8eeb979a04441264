//! Template compilation and rendering for stencil.
//!
//! [`TemplateEngine`] is the front door: it holds the host registry and the
//! import whitelists, compiles template source into an immutable
//! [`CompiledTemplate`], and renders compiled templates against caller
//! [`Bindings`](stencil_core::Bindings).
//!
//! # Pipeline
//!
//! 1. Parse the source into segments (stencil-parser).
//! 2. Resolve every static call against the import whitelists; an
//!    unresolvable call fails compilation.
//! 3. Render by walking segments, evaluating each expression as a
//!    left-to-right fold over its terms.
//!
//! Compilation is deterministic: the same source and the same engine always
//! produce an equivalent template. A compiled template is immutable and can
//! be rendered concurrently, with each render using its own bindings.

mod conversion;
mod eval;
mod overload;
mod template;

pub use conversion::{Conversion, find_conversion};
pub use overload::{CallCandidate, resolve_overload};
pub use template::CompiledTemplate;

use stencil_core::{Bindings, ParseError, RegistrationError, RenderError};
use stencil_parser::parse_template;
use stencil_registry::{HostRegistry, ImportPattern};

/// Compiles and renders templates against a fixed host registry and import
/// whitelists.
pub struct TemplateEngine {
    registry: HostRegistry,
    imports: Vec<ImportPattern>,
    static_imports: Vec<ImportPattern>,
}

impl TemplateEngine {
    /// Create an engine over a populated registry.
    ///
    /// `imports` whitelists types for `$Type::method(...)` calls, either as
    /// exact qualified names (`"stencil.math.Math"`) or as wildcard packages
    /// (`"stencil.math.*"`). `static_imports` whitelists individual static
    /// functions callable as bare `$name(...)`, with the same two shapes
    /// (`"stencil.math.Math.min"` or `"stencil.math.Math.*"`).
    pub fn new(
        registry: HostRegistry,
        imports: &[&str],
        static_imports: &[&str],
    ) -> Result<Self, RegistrationError> {
        Ok(Self {
            registry,
            imports: ImportPattern::parse_all(imports)?,
            static_imports: ImportPattern::parse_all(static_imports)?,
        })
    }

    /// Compile template source into its executable form.
    pub fn compile(&self, source: &str) -> Result<CompiledTemplate, ParseError> {
        let mut segments = parse_template(source)?;
        template::resolve_imports(
            &mut segments,
            &self.registry,
            &self.imports,
            &self.static_imports,
        )?;
        tracing::debug!(segments = segments.len(), "template compiled");
        Ok(CompiledTemplate { segments })
    }

    /// Render a compiled template against the given bindings.
    ///
    /// Assignments evaluated during the render write into `bindings` and
    /// stay visible to the caller afterwards.
    pub fn render(
        &self,
        template: &CompiledTemplate,
        bindings: &mut Bindings,
    ) -> Result<String, RenderError> {
        eval::render(&self.registry, template, bindings)
    }

    /// The registry this engine resolves calls against.
    pub fn registry(&self) -> &HostRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::{NativeError, Value};
    use stencil_registry::{FunctionEntry, ParamKind};

    fn math_registry() -> HostRegistry {
        let mut registry = HostRegistry::new();
        registry.register_type("test.math.Math").unwrap();
        registry
            .register_static(
                "test.math.Math",
                FunctionEntry::new("min", &[ParamKind::Long, ParamKind::Long], |args: &[Value]| {
                    let (Some(a), Some(b)) = (args[0].long_value(), args[1].long_value()) else {
                        return Err(NativeError::new("min expects numbers"));
                    };
                    Ok(Value::Long(a.min(b)))
                }),
            )
            .unwrap();
        registry
            .register_static(
                "test.math.Math",
                FunctionEntry::new(
                    "min",
                    &[ParamKind::Double, ParamKind::Double],
                    |args: &[Value]| {
                        let (Some(a), Some(b)) = (args[0].double_value(), args[1].double_value())
                        else {
                            return Err(NativeError::new("min expects numbers"));
                        };
                        Ok(Value::Double(a.min(b)))
                    },
                ),
            )
            .unwrap();
        registry
    }

    fn render_one(engine: &TemplateEngine, source: &str) -> String {
        let template = engine.compile(source).unwrap();
        engine.render(&template, &mut Bindings::new()).unwrap()
    }

    #[test]
    fn static_call_resolves_through_exact_import() {
        let engine = TemplateEngine::new(math_registry(), &["test.math.Math"], &[]).unwrap();
        assert_eq!(render_one(&engine, "{$Math::min(3,5)}"), "3");
    }

    #[test]
    fn static_call_resolves_through_wildcard_import() {
        let engine = TemplateEngine::new(math_registry(), &["test.math.*"], &[]).unwrap();
        assert_eq!(render_one(&engine, "{$Math::min(5,5.2)}"), "5.0");
    }

    #[test]
    fn unimported_type_fails_compilation() {
        let engine = TemplateEngine::new(math_registry(), &[], &[]).unwrap();
        assert!(matches!(
            engine.compile("{$Math::min(1,2)}"),
            Err(ParseError::NoImportMatch { .. })
        ));
    }

    #[test]
    fn static_import_enables_bare_calls() {
        let engine =
            TemplateEngine::new(math_registry(), &[], &["test.math.Math.min"]).unwrap();
        assert_eq!(render_one(&engine, "{$min(4,2)}"), "2");
    }

    #[test]
    fn wildcard_static_import_enables_bare_calls() {
        let engine = TemplateEngine::new(math_registry(), &[], &["test.math.Math.*"]).unwrap();
        assert_eq!(render_one(&engine, "{$min(4,2)}"), "2");
    }

    #[test]
    fn unknown_method_on_imported_type_echoes_the_expression() {
        let engine = TemplateEngine::new(math_registry(), &["test.math.Math"], &[]).unwrap();
        assert_eq!(
            render_one(&engine, "{$Math::noSuchMethod(1)}"),
            "{$Math::noSuchMethod(1)}"
        );
    }

    #[test]
    fn malformed_import_pattern_is_rejected() {
        assert!(matches!(
            TemplateEngine::new(math_registry(), &["*"], &[]),
            Err(RegistrationError::InvalidImport(_))
        ));
    }

    #[test]
    fn compilation_is_deterministic() {
        let engine = TemplateEngine::new(math_registry(), &["test.math.Math"], &[]).unwrap();
        let source = "a {$Math::min(1,2)} b {$x+1} c";
        let first = format!("{:?}", engine.compile(source).unwrap().segments());
        let second = format!("{:?}", engine.compile(source).unwrap().segments());
        assert_eq!(first, second);
    }
}
