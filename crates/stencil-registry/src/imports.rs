//! Import whitelist patterns.
//!
//! `compile` receives two whitelists of dotted names: `imports` gate
//! `$Type::method(...)` static calls, `static_imports` gate direct
//! `$func(...)` calls. A pattern is either an exact qualified name or a
//! wildcard with a trailing `*` segment. Nothing outside the whitelists is
//! ever callable - this is the engine's capability boundary.

use stencil_core::RegistrationError;

use crate::registry::HostRegistry;

/// One whitelist entry: `"a.b.C"` exact, or `"a.b.*"` wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportPattern {
    /// Matches exactly the qualified name.
    Exact(String),
    /// Matches `<prefix>.<one more segment>`.
    Wildcard { prefix: String },
}

impl ImportPattern {
    /// Parse a dotted pattern string.
    pub fn parse(pattern: &str) -> Result<Self, RegistrationError> {
        if pattern.is_empty() || pattern == "*" || pattern.ends_with('.') {
            return Err(RegistrationError::InvalidImport(pattern.to_string()));
        }
        if let Some(prefix) = pattern.strip_suffix(".*") {
            if prefix.is_empty() {
                return Err(RegistrationError::InvalidImport(pattern.to_string()));
            }
            return Ok(ImportPattern::Wildcard {
                prefix: prefix.to_string(),
            });
        }
        if pattern.contains('*') {
            return Err(RegistrationError::InvalidImport(pattern.to_string()));
        }
        Ok(ImportPattern::Exact(pattern.to_string()))
    }

    /// Parse a whole whitelist.
    pub fn parse_all(patterns: &[&str]) -> Result<Vec<Self>, RegistrationError> {
        patterns.iter().map(|p| Self::parse(p)).collect()
    }

    /// The qualified name this pattern yields for a simple name, if the
    /// pattern covers it.
    fn qualify(&self, simple: &str) -> Option<String> {
        match self {
            ImportPattern::Exact(full) => {
                let matches = full == simple
                    || full
                        .rsplit_once('.')
                        .is_some_and(|(_, last)| last == simple);
                matches.then(|| full.clone())
            }
            ImportPattern::Wildcard { prefix } => Some(format!("{prefix}.{simple}")),
        }
    }
}

/// Resolve a static-call identifier (`$Math::...`) against the `imports`
/// whitelist, returning the registered qualified type name.
pub fn resolve_type(
    registry: &HostRegistry,
    imports: &[ImportPattern],
    ident: &str,
) -> Option<String> {
    imports
        .iter()
        .filter_map(|pattern| pattern.qualify(ident))
        .find(|qualified| registry.contains_type(qualified))
}

/// Resolve a direct-call name (`$min(...)`) against the `static_imports`
/// whitelist. Patterns name a function on a type (`"a.b.C.min"`) or all of
/// a type's functions (`"a.b.C.*"`); returns the owning qualified type name.
pub fn resolve_static_import(
    registry: &HostRegistry,
    static_imports: &[ImportPattern],
    name: &str,
) -> Option<String> {
    for pattern in static_imports {
        match pattern {
            ImportPattern::Exact(full) => {
                let Some((type_name, func)) = full.rsplit_once('.') else {
                    continue;
                };
                if func == name && registry.has_static(type_name, name) {
                    return Some(type_name.to_string());
                }
            }
            ImportPattern::Wildcard { prefix } => {
                if registry.has_static(prefix, name) {
                    return Some(prefix.clone());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FunctionEntry, ParamKind};
    use stencil_core::Value;

    fn registry_with_math() -> HostRegistry {
        let mut registry = HostRegistry::new();
        registry.register_type("stencil.math.Math").unwrap();
        registry
            .register_static(
                "stencil.math.Math",
                FunctionEntry::new("min", &[ParamKind::Long, ParamKind::Long], |args: &[Value]| {
                    Ok(args[0].clone())
                }),
            )
            .unwrap();
        registry
    }

    #[test]
    fn exact_import_matches_simple_name() {
        let registry = registry_with_math();
        let imports = ImportPattern::parse_all(&["stencil.math.Math"]).unwrap();
        assert_eq!(
            resolve_type(&registry, &imports, "Math"),
            Some("stencil.math.Math".to_string())
        );
        assert_eq!(resolve_type(&registry, &imports, "Str"), None);
    }

    #[test]
    fn wildcard_import_matches_registered_types_only() {
        let registry = registry_with_math();
        let imports = ImportPattern::parse_all(&["stencil.math.*"]).unwrap();
        assert_eq!(
            resolve_type(&registry, &imports, "Math"),
            Some("stencil.math.Math".to_string())
        );
        assert_eq!(resolve_type(&registry, &imports, "Nope"), None);
    }

    #[test]
    fn first_matching_import_wins() {
        let mut registry = registry_with_math();
        registry.register_type("other.Math").unwrap();
        let imports = ImportPattern::parse_all(&["other.Math", "stencil.math.*"]).unwrap();
        assert_eq!(
            resolve_type(&registry, &imports, "Math"),
            Some("other.Math".to_string())
        );
    }

    #[test]
    fn static_import_exact_and_wildcard() {
        let registry = registry_with_math();
        let exact = ImportPattern::parse_all(&["stencil.math.Math.min"]).unwrap();
        assert_eq!(
            resolve_static_import(&registry, &exact, "min"),
            Some("stencil.math.Math".to_string())
        );
        assert_eq!(resolve_static_import(&registry, &exact, "max"), None);

        let wildcard = ImportPattern::parse_all(&["stencil.math.Math.*"]).unwrap();
        assert_eq!(
            resolve_static_import(&registry, &wildcard, "min"),
            Some("stencil.math.Math".to_string())
        );
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        assert!(ImportPattern::parse("").is_err());
        assert!(ImportPattern::parse("*").is_err());
        assert!(ImportPattern::parse("a.b.").is_err());
        assert!(ImportPattern::parse("a.*.b").is_err());
    }
}
