//! Core engine types: identifiers, run-state snapshots, configuration.
//!
//! Nothing here evaluates rules; `logic` and `story` build on these types.

pub mod ids;
pub mod config;
pub mod state;

pub use ids::{ActionId, LocationId, StoryId};
pub use config::{EngineConfig, MissingValuePolicy};
pub use state::{GameState, RunState};
