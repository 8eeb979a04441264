//! The immutable compiled form of a template, plus compile-time resolution
//! of static calls against the import whitelists.

use stencil_core::ParseError;
use stencil_parser::{ExprNode, RefTarget, Segment, TermCode};
use stencil_registry::{HostRegistry, ImportPattern, resolve_static_import, resolve_type};

/// The executable representation of one template: ordered literal and
/// expression segments.
///
/// Immutable after compilation; safe to share and render concurrently as
/// long as each concurrent render uses its own `Bindings`.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    pub(crate) segments: Vec<Segment>,
}

impl CompiledTemplate {
    /// The ordered segments of this template.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Resolve every static and static-import call in the parsed segments
/// against the whitelists, or fail compilation.
pub(crate) fn resolve_imports(
    segments: &mut [Segment],
    registry: &HostRegistry,
    imports: &[ImportPattern],
    static_imports: &[ImportPattern],
) -> Result<(), ParseError> {
    for segment in segments {
        if let Segment::Expr { node, .. } = segment {
            resolve_node(node, registry, imports, static_imports)?;
        }
    }
    Ok(())
}

fn resolve_node(
    node: &mut ExprNode,
    registry: &HostRegistry,
    imports: &[ImportPattern],
    static_imports: &[ImportPattern],
) -> Result<(), ParseError> {
    for term in &mut node.terms {
        match &mut term.code {
            TermCode::Group(inner) => {
                resolve_node(inner, registry, imports, static_imports)?;
            }
            TermCode::Assign { rhs, .. } => {
                resolve_node(rhs, registry, imports, static_imports)?;
            }
            TermCode::Ref(ref_term) => {
                match &mut ref_term.target {
                    RefTarget::Binding { .. } => {}
                    RefTarget::Static {
                        ident,
                        type_name,
                        args,
                        ..
                    } => {
                        let resolved = resolve_type(registry, imports, ident).ok_or_else(|| {
                            ParseError::NoImportMatch {
                                name: ident.clone(),
                                span: ref_term.span,
                            }
                        })?;
                        *type_name = Some(resolved);
                        for arg in args {
                            resolve_node(arg, registry, imports, static_imports)?;
                        }
                    }
                    RefTarget::Free {
                        name,
                        type_name,
                        args,
                    } => {
                        let resolved = resolve_static_import(registry, static_imports, name)
                            .ok_or_else(|| ParseError::NoStaticImportMatch {
                                name: name.clone(),
                                span: ref_term.span,
                            })?;
                        *type_name = Some(resolved);
                        for arg in args {
                            resolve_node(arg, registry, imports, static_imports)?;
                        }
                    }
                }
                for call in &mut ref_term.calls {
                    for arg in &mut call.args {
                        resolve_node(arg, registry, imports, static_imports)?;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}
