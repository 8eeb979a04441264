//! The name-to-value mapping supplied by callers of `render`.

use rustc_hash::FxHashMap;

use crate::value::Value;

/// Named values substitutable into a template.
///
/// Mutable during a single render call: assignment expressions write new
/// bindings through it. Callers must not share one `Bindings` instance
/// across concurrent render calls; create one per call (or reuse it
/// single-threaded).
#[derive(Debug, Default, Clone)]
pub struct Bindings {
    map: FxHashMap<String, Value>,
}

impl Bindings {
    /// Create an empty bindings map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a binding by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.map.get(name)
    }

    /// Insert or overwrite a binding.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.map.insert(name.into(), value.into());
    }

    /// Builder-style insertion for test and call-site convenience.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Whether a binding with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut bindings = Bindings::new();
        for (name, value) in iter {
            bindings.set(name, value);
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let mut b = Bindings::new();
        b.set("greeting", "world");
        assert_eq!(b.get("greeting"), Some(&Value::from("world")));
        assert!(b.get("missing").is_none());
    }

    #[test]
    fn with_builds_incrementally() {
        let b = Bindings::new().with("one", 1i64).with("two", 2i64);
        assert_eq!(b.len(), 2);
        assert!(b.contains("two"));
    }

    #[test]
    fn set_overwrites() {
        let mut b = Bindings::new().with("x", 1i64);
        b.set("x", 2i64);
        assert_eq!(b.get("x"), Some(&Value::Long(2)));
        assert_eq!(b.len(), 1);
    }
}
