//! Playthrough run state.
//!
//! ## GameState
//!
//! The only mutable entity the engine knows about:
//! - Current location
//! - Accumulated values (strength, flags, counters)
//! - Run state (active, complete)
//!
//! Snapshots are never modified in place by the engine. Each evaluation
//! clones the caller's snapshot and mutates the clone, so the original
//! stays valid for diffing and logging.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::ids::LocationId;

/// Completion status of a playthrough.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunState {
    /// Not set. As an effect field this means "leave the run state alone".
    #[default]
    Unspecified,
    /// The player is still making choices.
    Active,
    /// The story has ended for this playthrough.
    Complete,
}

impl RunState {
    /// Upper-case name, as exposed to predicates.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RunState::Unspecified => "UNSPECIFIED",
            RunState::Active => "ACTIVE",
            RunState::Complete => "COMPLETE",
        }
    }

    /// Check if this is the "not set" sentinel.
    #[must_use]
    pub const fn is_unspecified(self) -> bool {
        matches!(self, RunState::Unspecified)
    }

    /// Check if the playthrough has ended.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, RunState::Complete)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one playthrough.
///
/// Uses an `im` persistent map for values, so cloning a snapshot is O(1)
/// and iteration order is stable.
///
/// ## Values (i64 only)
///
/// Values are integers keyed by name. Absent keys have never been
/// tweaked; whether they read as zero in predicates is decided by
/// [`MissingValuePolicy`](super::config::MissingValuePolicy).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Location the player is currently at.
    pub location_id: LocationId,

    /// Named integer values accumulated by effects.
    pub values: OrdMap<String, i64>,

    /// Completion status.
    pub run_state: RunState,
}

impl GameState {
    /// Create a snapshot at a location with no values.
    #[must_use]
    pub fn new(location_id: impl Into<LocationId>) -> Self {
        Self {
            location_id: location_id.into(),
            values: OrdMap::new(),
            run_state: RunState::Unspecified,
        }
    }

    /// Set a value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: i64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Set the run state (builder pattern).
    #[must_use]
    pub fn with_run_state(mut self, run_state: RunState) -> Self {
        self.run_state = run_state;
        self
    }

    // === Values ===

    /// Get a value, if it was ever set.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    /// Add `amount` to a value, creating it at `amount` if absent.
    pub fn tweak(&mut self, key: &str, amount: i64) {
        let current = self.value(key).unwrap_or(0);
        self.values.insert(key.to_string(), current.saturating_add(amount));
    }

    // === Status ===

    /// Check if the playthrough has ended.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.run_state.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new("start");

        assert_eq!(state.location_id, LocationId::new("start"));
        assert!(state.values.is_empty());
        assert_eq!(state.run_state, RunState::Unspecified);
        assert!(!state.is_complete());
    }

    #[test]
    fn test_tweak_accumulates() {
        let mut state = GameState::new("start");

        state.tweak("gold", 5);
        state.tweak("gold", 1);
        state.tweak("gold", -2);

        assert_eq!(state.value("gold"), Some(4));
        assert_eq!(state.value("silver"), None);
    }

    #[test]
    fn test_tweak_saturates() {
        let mut state = GameState::new("start").with_value("big", i64::MAX);
        state.tweak("big", 1);
        assert_eq!(state.value("big"), Some(i64::MAX));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = GameState::new("start").with_value("hp", 10);
        let mut copy = original.clone();

        copy.tweak("hp", -3);
        copy.location_id = LocationId::new("elsewhere");

        assert_eq!(original.value("hp"), Some(10));
        assert_eq!(original.location_id, LocationId::new("start"));
        assert_eq!(copy.value("hp"), Some(7));
    }

    #[test]
    fn test_run_state_names() {
        assert_eq!(RunState::Active.as_str(), "ACTIVE");
        assert_eq!(format!("{}", RunState::Complete), "COMPLETE");
        assert!(RunState::Unspecified.is_unspecified());

        let json = serde_json::to_string(&RunState::Complete).unwrap();
        assert_eq!(json, "\"COMPLETE\"");
    }
}
