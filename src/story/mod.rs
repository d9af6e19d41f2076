//! Story content and the trigger engine.
//!
//! Content ([`Action`], [`Location`], [`Story`]) is read-only. The
//! [`TriggerEngine`] checks whether a chosen action is legal, runs the
//! action's triggers and then the story's, and returns a new
//! [`GameState`](crate::core::GameState) without touching the caller's.

pub mod content;
pub mod effect;
pub mod engine;
pub mod error;
pub mod state_lookup;
pub mod validate;

pub use content::{Action, ActionCondition, Location, Story, TriggerAction};
pub use effect::{Effect, EffectResolver};
pub use engine::{
    handle_event, possible_actions, FiredTrigger, GameEvent, Resolution, TriggerEngine,
    TriggerFailure, TriggerSource,
};
pub use error::{ContentError, EngineError};
pub use state_lookup::GameStateLookup;
pub use validate::StoryContent;
