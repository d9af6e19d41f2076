//! The trigger engine.
//!
//! ## Taking a turn
//!
//! 1. The snapshot must be at the event's location.
//! 2. The snapshot is cloned; all mutation happens on the clone.
//! 3. The chosen action must be offered at the location, and its
//!    condition must hold against the snapshot as it was.
//! 4. The action's triggers run in order, then the story's.
//!
//! A trigger whose condition cannot be evaluated does not fire. The
//! failure is logged and reported in the [`Resolution`], and the turn
//! carries on. A fired final trigger stops the rest of its own list.

use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, instrument, warn};

use crate::core::{ActionId, EngineConfig, GameState, RunState, StoryId};
use crate::logic::{EvalError, ScopeRef, Scopes};

use super::content::{Action, Location, Story, TriggerAction};
use super::effect::EffectResolver;
use super::error::EngineError;
use super::state_lookup::GameStateLookup;

/// Everything needed to take one turn.
///
/// An event with no action is a status query: nothing is checked or run.
pub struct GameEvent<'a> {
    /// The chosen action, or `None` for a status query.
    pub action: Option<&'a Action>,
    /// The location the action is taken at.
    pub location: &'a Location,
    pub story: &'a Story,
    /// Snapshot before the turn. Never modified.
    pub state: &'a GameState,
    /// Extra lookups exposed to conditions as `name.key`.
    pub scopes: Scopes,
}

impl<'a> GameEvent<'a> {
    /// Create a status query.
    pub fn new(location: &'a Location, story: &'a Story, state: &'a GameState) -> Self {
        Self {
            action: None,
            location,
            story,
            state,
            scopes: Scopes::new(),
        }
    }

    /// Set the chosen action (builder pattern).
    #[must_use]
    pub fn with_action(mut self, action: &'a Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Expose a scope to conditions (builder pattern).
    #[must_use]
    pub fn with_scope(mut self, name: impl Into<String>, scope: ScopeRef) -> Self {
        self.scopes.set(name, scope);
        self
    }
}

/// Which list a trigger belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerSource {
    Action(ActionId),
    Story(StoryId),
}

impl std::fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerSource::Action(id) => write!(f, "action {id}"),
            TriggerSource::Story(id) => write!(f, "{id}"),
        }
    }
}

/// A trigger that fired.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiredTrigger {
    pub source: TriggerSource,
    /// Position in its list.
    pub index: usize,
    pub is_final: bool,
}

/// A trigger whose condition could not be evaluated.
///
/// Serializes the error as its message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TriggerFailure {
    pub source: TriggerSource,
    pub index: usize,
    #[serde(serialize_with = "render_error")]
    pub error: EvalError,
}

fn render_error<S: Serializer>(error: &EvalError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Outcome of a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The new snapshot.
    pub state: GameState,
    /// Fired triggers, in firing order.
    pub fired: Vec<FiredTrigger>,
    /// Recovered condition failures, in evaluation order.
    pub failures: Vec<TriggerFailure>,
}

impl Resolution {
    fn new(state: GameState) -> Self {
        Self {
            state,
            fired: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Check if every trigger condition could be evaluated.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Decides which actions are legal and applies their consequences.
///
/// Holds no mutable state; one engine can serve any number of
/// playthroughs concurrently.
#[derive(Clone, Debug, Default)]
pub struct TriggerEngine {
    config: EngineConfig,
}

impl TriggerEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the first snapshot of a playthrough.
    pub fn start(&self, story: &Story) -> Result<GameState, EngineError> {
        match &story.start_location_id {
            Some(location) if !location.is_empty() => {
                Ok(GameState::new(location.clone()).with_run_state(RunState::Active))
            }
            _ => Err(EngineError::NoStartLocation { story: story.id }),
        }
    }

    /// Take a turn, returning only the new snapshot.
    pub fn handle_event(&self, event: &GameEvent<'_>) -> Result<GameState, EngineError> {
        self.resolve(event).map(|resolution| resolution.state)
    }

    /// Take a turn.
    #[instrument(skip_all, fields(story = %event.story.id, location = %event.location.id))]
    pub fn resolve(&self, event: &GameEvent<'_>) -> Result<Resolution, EngineError> {
        if event.state.location_id != event.location.id {
            return Err(EngineError::LocationMismatch {
                location: event.location.id.clone(),
                current: event.state.location_id.clone(),
                action: event.action.map(|action| action.id.clone()),
                story: event.story.id,
            });
        }

        let mut resolution = Resolution::new(event.state.clone());

        let Some(action) = event.action else {
            debug!("Status query, no action to resolve");
            return Ok(resolution);
        };

        if !self.config.allow_completed_runs && event.state.is_complete() {
            return Err(EngineError::RunComplete {
                action: action.id.clone(),
            });
        }

        self.check_allowed(action, event)?;

        let source = TriggerSource::Action(action.id.clone());
        let stopped = self.run_triggers(source, &action.triggers, event, &mut resolution);
        if stopped && !self.config.story_triggers_after_final {
            debug!(action = %action.id, "Final action trigger ends the turn");
            return Ok(resolution);
        }

        let source = TriggerSource::Story(event.story.id);
        self.run_triggers(source, &event.story.triggers, event, &mut resolution);

        debug!(
            fired = resolution.fired.len(),
            failed = resolution.failures.len(),
            "Turn resolved"
        );
        Ok(resolution)
    }

    /// Actions offered at the event's location, in offer order.
    ///
    /// An offer whose condition cannot be evaluated is logged and left out.
    pub fn possible_actions(&self, event: &GameEvent<'_>) -> Vec<ActionId> {
        let lookup = self.lookup(event.state, &event.scopes);

        event
            .location
            .possible_actions
            .iter()
            .enumerate()
            .filter_map(|(index, offer)| match offer.condition.eval(&lookup) {
                Ok(true) => Some(offer.action_id.clone()),
                Ok(false) => None,
                Err(err) => {
                    warn!(
                        story = %event.story.id,
                        location = %event.location.id,
                        action = %offer.action_id,
                        index,
                        condition = %offer.condition,
                        error = %err,
                        "Could not evaluate offer condition"
                    );
                    None
                }
            })
            .collect()
    }

    fn lookup<'s>(&self, state: &'s GameState, scopes: &'s Scopes) -> GameStateLookup<'s> {
        GameStateLookup::new(state, self.config.missing_values).with_scopes(scopes)
    }

    /// Check that the action is offered and its condition holds.
    fn check_allowed(&self, action: &Action, event: &GameEvent<'_>) -> Result<(), EngineError> {
        let location = &event.location.id;
        let Some(offer) = event.location.offer_for(&action.id) else {
            return Err(EngineError::ActionNotOffered {
                action: action.id.clone(),
                location: location.clone(),
                story: event.story.id,
            });
        };

        let lookup = self.lookup(event.state, &event.scopes);
        match offer.condition.eval(&lookup) {
            Ok(true) => Ok(()),
            Ok(false) => Err(EngineError::ConditionFailed {
                action: action.id.clone(),
                location: location.clone(),
                story: event.story.id,
            }),
            Err(source) => Err(EngineError::ConditionUnevaluable {
                action: action.id.clone(),
                location: location.clone(),
                story: event.story.id,
                source,
            }),
        }
    }

    /// Run one trigger list against the resolution's snapshot.
    ///
    /// Returns true if a final trigger fired.
    fn run_triggers(
        &self,
        source: TriggerSource,
        triggers: &[TriggerAction],
        event: &GameEvent<'_>,
        resolution: &mut Resolution,
    ) -> bool {
        for (index, trigger) in triggers.iter().enumerate() {
            let outcome = {
                let lookup = self.lookup(&resolution.state, &event.scopes);
                trigger.condition.eval(&lookup)
            };

            match outcome {
                Ok(true) => {}
                Ok(false) => continue,
                Err(error) => {
                    warn!(
                        source = %source,
                        index,
                        condition = %trigger.condition,
                        error = %error,
                        "Could not evaluate trigger condition, not firing"
                    );
                    resolution.failures.push(TriggerFailure {
                        source: source.clone(),
                        index,
                        error,
                    });
                    continue;
                }
            }

            EffectResolver::apply_all(&mut resolution.state, &trigger.effects);
            debug!(source = %source, index, is_final = trigger.is_final, "Trigger fired");
            resolution.fired.push(FiredTrigger {
                source: source.clone(),
                index,
                is_final: trigger.is_final,
            });

            if trigger.is_final {
                return true;
            }
        }
        false
    }
}

/// Take a turn with the default configuration.
pub fn handle_event(event: &GameEvent<'_>) -> Result<GameState, EngineError> {
    TriggerEngine::new().handle_event(event)
}

/// Offered actions under the default configuration.
pub fn possible_actions(event: &GameEvent<'_>) -> Vec<ActionId> {
    TriggerEngine::new().possible_actions(event)
}
