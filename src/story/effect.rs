//! Effects and their application to a run-state snapshot.
//!
//! An effect has three independent, optional parts. Each part that is
//! present is applied; absent parts leave the snapshot untouched, so an
//! empty effect is a legal no-op.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, LocationId, RunState};

/// An atomic state mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Effect {
    /// Move the player here. Empty ids are ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_location_id: Option<LocationId>,

    /// Value to adjust. Ignored when empty or when the amount is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweak_key: Option<String>,

    /// Signed amount added to `tweak_key`.
    pub tweak_amount: i64,

    /// New run state. `Unspecified` leaves it alone.
    pub new_state: RunState,
}

impl Effect {
    /// Create a no-op effect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effect that moves the player.
    pub fn move_to(location: impl Into<LocationId>) -> Self {
        Self::new().with_location(location)
    }

    /// Effect that adds `amount` to `key`.
    pub fn tweak(key: impl Into<String>, amount: i64) -> Self {
        Self::new().with_tweak(key, amount)
    }

    /// Effect that sets the run state.
    pub fn set_state(state: RunState) -> Self {
        Self::new().with_state(state)
    }

    /// Set the new location (builder pattern).
    #[must_use]
    pub fn with_location(mut self, location: impl Into<LocationId>) -> Self {
        self.new_location_id = Some(location.into());
        self
    }

    /// Set the value tweak (builder pattern).
    #[must_use]
    pub fn with_tweak(mut self, key: impl Into<String>, amount: i64) -> Self {
        self.tweak_key = Some(key.into());
        self.tweak_amount = amount;
        self
    }

    /// Set the new run state (builder pattern).
    #[must_use]
    pub fn with_state(mut self, state: RunState) -> Self {
        self.new_state = state;
        self
    }

    /// Location this effect moves to, if any.
    #[must_use]
    pub fn destination(&self) -> Option<&LocationId> {
        self.new_location_id.as_ref().filter(|loc| !loc.is_empty())
    }

    /// Value tweak this effect applies, if any.
    #[must_use]
    pub fn value_tweak(&self) -> Option<(&str, i64)> {
        match self.tweak_key.as_deref() {
            Some(key) if !key.is_empty() && self.tweak_amount != 0 => {
                Some((key, self.tweak_amount))
            }
            _ => None,
        }
    }

    /// Check if applying this effect changes nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.destination().is_none()
            && self.value_tweak().is_none()
            && self.new_state.is_unspecified()
    }
}

/// Applies effects to run-state snapshots.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply one effect in place.
    ///
    /// Value tweaks accumulate: two effects adding `+5` and `+1` to the
    /// same key leave it at `6` more than before.
    pub fn apply(state: &mut GameState, effect: &Effect) {
        if let Some(location) = effect.destination() {
            state.location_id = location.clone();
        }
        if let Some((key, amount)) = effect.value_tweak() {
            state.tweak(key, amount);
        }
        if !effect.new_state.is_unspecified() {
            state.run_state = effect.new_state;
        }
    }

    /// Apply effects in order.
    pub fn apply_all<'e>(state: &mut GameState, effects: impl IntoIterator<Item = &'e Effect>) {
        for effect in effects {
            Self::apply(state, effect);
        }
    }
}
