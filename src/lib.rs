//! # cyoa-engine
//!
//! Rule evaluation and state transitions for choose-your-own-adventure
//! playthroughs.
//!
//! ## Design Principles
//!
//! 1. **Pure Turns**: Every operation is a function of its inputs. The
//!    caller's snapshot is cloned, never mutated, so it stays valid for
//!    diffing and logging.
//!
//! 2. **Errors Are Values**: Unknown keys, unknown scopes and unknown
//!    operators are returned as errors, never coerced to `false` or `0`.
//!    Only trigger conditions degrade gracefully (logged, not fired).
//!
//! 3. **Storage-Agnostic**: Content and snapshots are plain in-memory
//!    values. Loading and saving them is someone else's job.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot cloning via `im-rs`.
//!
//! - **State Values**: All run-state values are `i64`, accumulated by
//!   effects.
//!
//! ## Modules
//!
//! - `core`: Content identifiers, run-state snapshots, configuration
//! - `logic`: Predicates, lookups with scopes, key resolution, evaluation
//! - `story`: Content entities, effects, the trigger engine, validation
//!
//! ## Example
//!
//! ```
//! use cyoa_engine::{
//!     handle_event, Action, ActionCondition, Effect, GameEvent, GameState, Location,
//!     Predicate, Story, StoryId, TriggerAction,
//! };
//!
//! let attack = Action::new("attack", "Attack!")
//!     .with_trigger(
//!         TriggerAction::new()
//!             .with_condition(Predicate::gt("Strength", "3"))
//!             .with_effect(Effect::tweak("ogre_defeated", 1))
//!             .as_final(),
//!     )
//!     .with_trigger(TriggerAction::new().with_effect(Effect::tweak("player_killed", 1)));
//! let lair = Location::new("lair", "Ogre Encounter").offering(ActionCondition::new("attack"));
//! let story = Story::new(StoryId::new(1), "Ogres");
//!
//! let state = GameState::new("lair").with_value("Strength", 5);
//! let event = GameEvent::new(&lair, &story, &state).with_action(&attack);
//! let next = handle_event(&event).unwrap();
//!
//! assert_eq!(next.value("ogre_defeated"), Some(1));
//! assert_eq!(next.value("player_killed"), None);
//! assert_eq!(state.value("ogre_defeated"), None);
//! ```

pub mod core;
pub mod logic;
pub mod story;

// Re-export commonly used types
pub use crate::core::{
    ActionId, LocationId, StoryId,
    EngineConfig, MissingValuePolicy,
    GameState, RunState,
};

pub use crate::logic::{
    Lookup, MemoryLookup, ScopeRef, Scopes,
    Predicate, Comparison, Combination, CompareOp, CombineOp,
    Evaluator, EvalError, ResolveError,
};

pub use crate::story::{
    Action, ActionCondition, Location, Story, TriggerAction,
    Effect, EffectResolver,
    GameEvent, TriggerEngine, Resolution, FiredTrigger, TriggerFailure, TriggerSource,
    handle_event, possible_actions,
    StoryContent, EngineError, ContentError,
};
