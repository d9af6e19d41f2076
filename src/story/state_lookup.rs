//! Run-state view for predicates.

use crate::core::{GameState, MissingValuePolicy};
use crate::logic::{Lookup, ResolveError, Scopes, ValueKind};

/// String key holding the current location id.
pub const LOCATION_KEY: &str = "location";
/// String key holding the run state name.
pub const RUN_STATE_KEY: &str = "run_state";

/// Exposes a [`GameState`] snapshot to the evaluator.
///
/// Integer keys read the values map; absent values follow the
/// [`MissingValuePolicy`]. The string keys `location` and `run_state`
/// read the snapshot's location id and run state. String arrays are not
/// supported. Scopes come from the event and cannot be added through
/// this view.
pub struct GameStateLookup<'a> {
    state: &'a GameState,
    scopes: Option<&'a Scopes>,
    missing: MissingValuePolicy,
}

impl<'a> GameStateLookup<'a> {
    /// Create a view with no scopes.
    pub fn new(state: &'a GameState, missing: MissingValuePolicy) -> Self {
        Self {
            state,
            scopes: None,
            missing,
        }
    }

    /// Expose event scopes (builder pattern).
    #[must_use]
    pub fn with_scopes(mut self, scopes: &'a Scopes) -> Self {
        self.scopes = Some(scopes);
        self
    }
}

impl Lookup for GameStateLookup<'_> {
    fn get_int(&self, key: &str) -> Result<i64, ResolveError> {
        match (self.state.value(key), self.missing) {
            (Some(value), _) => Ok(value),
            (None, MissingValuePolicy::Zero) => Ok(0),
            (None, MissingValuePolicy::Error) => Err(ResolveError::UnknownKey {
                kind: ValueKind::Integer,
                key: key.to_string(),
            }),
        }
    }

    fn get_str(&self, key: &str) -> Result<String, ResolveError> {
        match key {
            LOCATION_KEY => Ok(self.state.location_id.to_string()),
            RUN_STATE_KEY => Ok(self.state.run_state.as_str().to_string()),
            _ => Err(ResolveError::UnknownKey {
                kind: ValueKind::String,
                key: key.to_string(),
            }),
        }
    }

    fn get_scope(&self, name: &str) -> Option<&dyn Lookup> {
        self.scopes.and_then(|scopes| scopes.get(name))
    }

    fn list_scopes(&self) -> Vec<String> {
        self.scopes.map(Scopes::names).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::RunState;
    use crate::logic::{MemoryLookup, Predicate};

    #[test]
    fn test_values_and_missing_policy() {
        let state = GameState::new("cave").with_value("Strength", 5);

        let lenient = GameStateLookup::new(&state, MissingValuePolicy::Zero);
        assert_eq!(lenient.get_int("Strength"), Ok(5));
        assert_eq!(lenient.get_int("Dexterity"), Ok(0));

        let strict = GameStateLookup::new(&state, MissingValuePolicy::Error);
        assert!(matches!(
            strict.get_int("Dexterity"),
            Err(ResolveError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_string_keys() {
        let state = GameState::new("cave").with_run_state(RunState::Active);
        let lookup = GameStateLookup::new(&state, MissingValuePolicy::Zero);

        assert_eq!(lookup.get_str("location"), Ok("cave".to_string()));
        assert_eq!(lookup.get_str("run_state"), Ok("ACTIVE".to_string()));
        assert!(lookup.get_str("weather").is_err());
        assert!(matches!(
            lookup.get_str_arr("inventory"),
            Err(ResolveError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_scopes_from_event() {
        let state = GameState::new("cave");
        let scopes = Scopes::new().with("npc", Arc::new(MemoryLookup::new().with_int("mood", 3)));
        let lookup = GameStateLookup::new(&state, MissingValuePolicy::Zero).with_scopes(&scopes);

        assert_eq!(Predicate::gt("npc.mood", "2").eval(&lookup), Ok(true));
        assert_eq!(lookup.list_scopes(), vec!["npc".to_string()]);
        assert!(Predicate::gt("ghost.mood", "2").eval(&lookup).is_err());
    }

    #[test]
    fn test_cannot_register_scopes() {
        let state = GameState::new("cave");
        let mut lookup = GameStateLookup::new(&state, MissingValuePolicy::Zero);

        assert!(matches!(
            lookup.set_scope("npc", Arc::new(MemoryLookup::new())),
            Err(ResolveError::ScopesUnsupported { .. })
        ));
    }
}
