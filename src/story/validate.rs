//! Story content validation.
//!
//! Authoring tools save locations and actions separately from the story,
//! so references between them can dangle. Validate before play.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{ActionId, LocationId};

use super::content::{Action, Location, Story, TriggerAction};
use super::error::ContentError;

/// The locations and actions that make up a story.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryContent {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl StoryContent {
    /// Create empty content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location (builder pattern).
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    /// Add an action (builder pattern).
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Find a location by id.
    #[must_use]
    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.iter().find(|loc| &loc.id == id)
    }

    /// Find an action by id.
    #[must_use]
    pub fn action(&self, id: &ActionId) -> Option<&Action> {
        self.actions.iter().find(|act| &act.id == id)
    }

    /// Check ids and cross references. Returns the first problem found.
    ///
    /// Checked in order: every id is a UUID; every effect destination,
    /// in action and story triggers, is a known location; every offered
    /// action is known; the story's start location, when set, is known.
    pub fn validate(&self, story: &Story) -> Result<(), ContentError> {
        for location in &self.locations {
            Uuid::parse_str(location.id.as_str()).map_err(|source| {
                ContentError::InvalidLocationId {
                    id: location.id.clone(),
                    source,
                }
            })?;
        }
        for action in &self.actions {
            Uuid::parse_str(action.id.as_str()).map_err(|source| ContentError::InvalidActionId {
                id: action.id.clone(),
                source,
            })?;
        }

        let locations: FxHashSet<&LocationId> = self.locations.iter().map(|loc| &loc.id).collect();
        let actions: FxHashSet<&ActionId> = self.actions.iter().map(|act| &act.id).collect();

        for action in &self.actions {
            check_destinations(&format!("action {}", action.id), &action.triggers, &locations)?;
        }
        check_destinations(&story.id.to_string(), &story.triggers, &locations)?;

        for location in &self.locations {
            if let Some(offer) = location
                .possible_actions
                .iter()
                .find(|offer| !actions.contains(&offer.action_id))
            {
                return Err(ContentError::UnknownOfferedAction {
                    location: location.id.clone(),
                    action: offer.action_id.clone(),
                });
            }
        }

        match &story.start_location_id {
            Some(start) if !start.is_empty() && !locations.contains(start) => {
                Err(ContentError::UnknownStartLocation {
                    story: story.id,
                    location: start.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

fn check_destinations(
    owner: &str,
    triggers: &[TriggerAction],
    locations: &FxHashSet<&LocationId>,
) -> Result<(), ContentError> {
    for (index, trigger) in triggers.iter().enumerate() {
        for effect in &trigger.effects {
            if let Some(target) = effect.destination() {
                if !locations.contains(target) {
                    return Err(ContentError::UnknownEffectLocation {
                        owner: owner.to_string(),
                        index,
                        target: target.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}
