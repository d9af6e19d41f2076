//! Variable lookup for predicate evaluation.
//!
//! A [`Lookup`] supplies the values that key expressions resolve to. An
//! implementor supports only the value kinds relevant to its domain; the
//! default methods fail with [`ResolveError::Unsupported`].
//!
//! Lookups may expose named nested lookups ("scopes"), reached with dotted
//! keys such as `npc.mood`. [`Scopes`] is the default registry for them.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::error::{ResolveError, ValueKind};

/// Shared handle to a lookup registered as a scope.
pub type ScopeRef = Arc<dyn Lookup + Send + Sync>;

/// Capability set for resolving variable values.
pub trait Lookup {
    /// Resolve an integer variable.
    fn get_int(&self, key: &str) -> Result<i64, ResolveError> {
        Err(ResolveError::unsupported(ValueKind::Integer, key))
    }

    /// Resolve a string variable.
    fn get_str(&self, key: &str) -> Result<String, ResolveError> {
        Err(ResolveError::unsupported(ValueKind::String, key))
    }

    /// Resolve a string-array variable.
    fn get_str_arr(&self, key: &str) -> Result<Vec<String>, ResolveError> {
        Err(ResolveError::unsupported(ValueKind::StringArray, key))
    }

    /// Get a named nested lookup.
    fn get_scope(&self, _name: &str) -> Option<&dyn Lookup> {
        None
    }

    /// Register a named nested lookup.
    fn set_scope(&mut self, name: &str, _scope: ScopeRef) -> Result<(), ResolveError> {
        Err(ResolveError::ScopesUnsupported {
            name: name.to_string(),
        })
    }

    /// Names of the registered scopes, sorted.
    fn list_scopes(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Default in-memory scope registry.
///
/// Lookup implementors can embed this instead of managing their own
/// name to lookup mapping.
#[derive(Clone, Default)]
pub struct Scopes {
    scopes: FxHashMap<String, ScopeRef>,
}

impl Scopes {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scope (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, scope: ScopeRef) -> Self {
        self.set(name, scope);
        self
    }

    /// Get a scope by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Lookup> {
        self.scopes.get(name).map(|scope| scope.as_ref() as &dyn Lookup)
    }

    /// Register or replace a scope.
    pub fn set(&mut self, name: impl Into<String>, scope: ScopeRef) {
        self.scopes.insert(name.into(), scope);
    }

    /// Registered scope names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.scopes.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get scope count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Check if no scopes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl std::fmt::Debug for Scopes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scopes").field("names", &self.names()).finish()
    }
}

/// A lookup backed by in-memory maps.
///
/// Unknown keys are errors. Useful for composing scopes (an NPC's state,
/// say) and for tests.
///
/// ```
/// use cyoa_engine::logic::{Evaluator, MemoryLookup, Predicate};
///
/// let lookup = MemoryLookup::new()
///     .with_int("Strength", 5)
///     .with_str_arr("inventory", ["sword", "rope"]);
///
/// assert!(Evaluator::eval(&Predicate::gt("Strength", "3"), &lookup).unwrap());
/// assert!(Evaluator::eval(&Predicate::str_in("'rope", "inventory"), &lookup).unwrap());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryLookup {
    ints: FxHashMap<String, i64>,
    strs: FxHashMap<String, String>,
    str_arrs: FxHashMap<String, Vec<String>>,
    scopes: Scopes,
}

impl MemoryLookup {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an integer (builder pattern).
    #[must_use]
    pub fn with_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.ints.insert(key.into(), value);
        self
    }

    /// Add a string (builder pattern).
    #[must_use]
    pub fn with_str(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strs.insert(key.into(), value.into());
        self
    }

    /// Add a string array (builder pattern).
    #[must_use]
    pub fn with_str_arr<S: Into<String>>(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.str_arrs
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Add a scope (builder pattern).
    #[must_use]
    pub fn with_scope(mut self, name: impl Into<String>, scope: ScopeRef) -> Self {
        self.scopes.set(name, scope);
        self
    }
}

impl Lookup for MemoryLookup {
    fn get_int(&self, key: &str) -> Result<i64, ResolveError> {
        self.ints
            .get(key)
            .copied()
            .ok_or_else(|| ResolveError::unknown(ValueKind::Integer, key))
    }

    fn get_str(&self, key: &str) -> Result<String, ResolveError> {
        self.strs
            .get(key)
            .cloned()
            .ok_or_else(|| ResolveError::unknown(ValueKind::String, key))
    }

    fn get_str_arr(&self, key: &str) -> Result<Vec<String>, ResolveError> {
        self.str_arrs
            .get(key)
            .cloned()
            .ok_or_else(|| ResolveError::unknown(ValueKind::StringArray, key))
    }

    fn get_scope(&self, name: &str) -> Option<&dyn Lookup> {
        self.scopes.get(name)
    }

    fn set_scope(&mut self, name: &str, scope: ScopeRef) -> Result<(), ResolveError> {
        self.scopes.set(name, scope);
        Ok(())
    }

    fn list_scopes(&self) -> Vec<String> {
        self.scopes.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lookup that only knows integers.
    struct IntsOnly;

    impl Lookup for IntsOnly {
        fn get_int(&self, _key: &str) -> Result<i64, ResolveError> {
            Ok(1)
        }
    }

    #[test]
    fn test_memory_lookup_values() {
        let lookup = MemoryLookup::new()
            .with_int("one", 1)
            .with_str("name", "Grima")
            .with_str_arr("tags", ["a", "b"]);

        assert_eq!(lookup.get_int("one"), Ok(1));
        assert_eq!(lookup.get_str("name"), Ok("Grima".to_string()));
        assert_eq!(lookup.get_str_arr("tags"), Ok(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_memory_lookup_unknown_keys() {
        let lookup = MemoryLookup::new();

        assert_eq!(
            lookup.get_int("missing"),
            Err(ResolveError::UnknownKey {
                kind: ValueKind::Integer,
                key: "missing".to_string(),
            })
        );
        assert!(lookup.get_str("missing").is_err());
        assert!(lookup.get_str_arr("missing").is_err());
    }

    #[test]
    fn test_default_methods_are_unsupported() {
        let mut lookup = IntsOnly;

        assert_eq!(lookup.get_int("anything"), Ok(1));
        assert!(matches!(
            lookup.get_str("x"),
            Err(ResolveError::Unsupported { kind: ValueKind::String, .. })
        ));
        assert!(matches!(
            lookup.get_str_arr("x"),
            Err(ResolveError::Unsupported { kind: ValueKind::StringArray, .. })
        ));
        assert!(lookup.get_scope("s").is_none());
        assert!(lookup.list_scopes().is_empty());
        assert!(lookup.set_scope("s", Arc::new(MemoryLookup::new())).is_err());
    }

    #[test]
    fn test_scopes_sorted_names() {
        let mut lookup = MemoryLookup::new();
        lookup.set_scope("tele", Arc::new(MemoryLookup::new())).unwrap();
        lookup.set_scope("alpha", Arc::new(MemoryLookup::new())).unwrap();

        assert_eq!(lookup.list_scopes(), vec!["alpha".to_string(), "tele".to_string()]);
        assert!(lookup.get_scope("alpha").is_some());
        assert!(lookup.get_scope("beta").is_none());
    }

    #[test]
    fn test_scopes_replace() {
        let scopes = Scopes::new()
            .with("npc", Arc::new(MemoryLookup::new().with_int("mood", 1)))
            .with("npc", Arc::new(MemoryLookup::new().with_int("mood", 2)));

        assert_eq!(scopes.len(), 1);
        assert_eq!(scopes.get("npc").unwrap().get_int("mood"), Ok(2));
        assert_eq!(format!("{:?}", scopes), "Scopes { names: [\"npc\"] }");
    }
}
