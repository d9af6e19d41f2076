//! Read-only story content: actions, locations, stories.
//!
//! Content arrives already loaded from storage. The engine never
//! modifies it; only [`GameState`](crate::core::GameState) snapshots change.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ActionId, LocationId, StoryId};
use crate::logic::Predicate;

use super::effect::Effect;

/// An action offered at a location, gated by a condition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCondition {
    pub action_id: ActionId,

    /// Offered only while this holds. Defaults to always.
    #[serde(default)]
    pub condition: Predicate,
}

impl ActionCondition {
    /// Offer an action unconditionally.
    pub fn new(action_id: impl Into<ActionId>) -> Self {
        Self {
            action_id: action_id.into(),
            condition: Predicate::Always,
        }
    }

    /// Set the gating condition (builder pattern).
    #[must_use]
    pub fn when(mut self, condition: Predicate) -> Self {
        self.condition = condition;
        self
    }
}

/// A conditional rule: when the condition holds, apply the effects.
///
/// A fired trigger marked final stops evaluation of the rest of its list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerAction {
    pub condition: Predicate,
    pub effects: SmallVec<[Effect; 2]>,
    pub is_final: bool,
}

impl TriggerAction {
    /// Create an unconditional trigger with no effects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: Predicate) -> Self {
        self.condition = condition;
        self
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Mark this trigger final (builder pattern).
    #[must_use]
    pub fn as_final(mut self) -> Self {
        self.is_final = true;
        self
    }
}

/// A choice the player can make.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Rules run, in order, when the action is taken.
    #[serde(default)]
    pub triggers: Vec<TriggerAction>,
}

impl Action {
    /// Create an action with no triggers.
    pub fn new(id: impl Into<ActionId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            triggers: Vec::new(),
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a trigger (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerAction) -> Self {
        self.triggers.push(trigger);
        self
    }
}

/// A place in the story.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Actions offered here, in display order.
    #[serde(default)]
    pub possible_actions: Vec<ActionCondition>,
}

impl Location {
    /// Create a location offering nothing.
    pub fn new(id: impl Into<LocationId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            possible_actions: Vec::new(),
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Offer an action (builder pattern).
    #[must_use]
    pub fn offering(mut self, offer: ActionCondition) -> Self {
        self.possible_actions.push(offer);
        self
    }

    /// Find the offer for an action.
    #[must_use]
    pub fn offer_for(&self, action_id: &ActionId) -> Option<&ActionCondition> {
        self.possible_actions
            .iter()
            .find(|offer| &offer.action_id == action_id)
    }
}

/// A story: its entry point and the rules that run after every action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location_id: Option<LocationId>,
    /// Story-wide rules, run after the action's own triggers.
    #[serde(default)]
    pub triggers: Vec<TriggerAction>,
}

impl Story {
    /// Create a story with no triggers.
    pub fn new(id: StoryId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            start_location_id: None,
            triggers: Vec::new(),
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the start location (builder pattern).
    #[must_use]
    pub fn starting_at(mut self, location: impl Into<LocationId>) -> Self {
        self.start_location_id = Some(location.into());
        self
    }

    /// Add a story-wide trigger (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, trigger: TriggerAction) -> Self {
        self.triggers.push(trigger);
        self
    }
}
