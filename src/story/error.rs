//! Engine and content errors.

use thiserror::Error;

use crate::core::{ActionId, LocationId, StoryId};
use crate::logic::EvalError;

/// A turn could not be taken.
///
/// Every variant names the story, so the error reads on its own once it
/// leaves the turn's span. Trigger-condition failures are not here: they
/// are recovered and reported in [`Resolution`](super::Resolution).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{story}: action {action} not in possible-actions list of location {location}")]
    ActionNotOffered {
        action: ActionId,
        location: LocationId,
        story: StoryId,
    },

    #[error("{story}: action {action} not available in location {location}: condition fails")]
    ConditionFailed {
        action: ActionId,
        location: LocationId,
        story: StoryId,
    },

    #[error("{story}: action {action} not available in location {location}: could not evaluate condition: {source}")]
    ConditionUnevaluable {
        action: ActionId,
        location: LocationId,
        story: StoryId,
        #[source]
        source: EvalError,
    },

    #[error(
        "{story}: cannot evaluate {} against location {location} when current location is {current}",
        action_label(.action)
    )]
    LocationMismatch {
        location: LocationId,
        current: LocationId,
        action: Option<ActionId>,
        story: StoryId,
    },

    #[error("cannot apply action {action}: playthrough is already complete")]
    RunComplete { action: ActionId },

    #[error("{story} has no start location")]
    NoStartLocation { story: StoryId },
}

fn action_label(action: &Option<ActionId>) -> String {
    match action {
        Some(action) => format!("action {action}"),
        None => "status query".to_string(),
    }
}

/// Story content failed validation.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("location id {id} is not a valid UUID: {source}")]
    InvalidLocationId {
        id: LocationId,
        #[source]
        source: uuid::Error,
    },

    #[error("action id {id} is not a valid UUID: {source}")]
    InvalidActionId {
        id: ActionId,
        #[source]
        source: uuid::Error,
    },

    #[error("trigger {index} of {owner} moves to unknown location {target}")]
    UnknownEffectLocation {
        owner: String,
        index: usize,
        target: LocationId,
    },

    #[error("location {location} offers unknown action {action}")]
    UnknownOfferedAction {
        location: LocationId,
        action: ActionId,
    },

    #[error("{story} starts at unknown location {location}")]
    UnknownStartLocation { story: StoryId, location: LocationId },
}
