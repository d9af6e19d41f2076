//! Engine configuration.
//!
//! Callers configure the trigger engine once, typically when the service
//! embedding it starts. The defaults reproduce the behaviour authored
//! stories were written against; every knob is serde-serializable so it
//! can live in the embedding application's config file.

use serde::{Deserialize, Serialize};

/// How the run-state lookup answers an integer key with no value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Absent values read as zero.
    #[default]
    Zero,
    /// Absent values are an unknown-key resolution error.
    Error,
}

/// Trigger engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Treatment of values never set on the snapshot.
    pub missing_values: MissingValuePolicy,

    /// Run the story's trigger list even after a final action trigger fired.
    pub story_triggers_after_final: bool,

    /// Accept actions on a playthrough whose run state is complete.
    pub allow_completed_runs: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            missing_values: MissingValuePolicy::Zero,
            story_triggers_after_final: true,
            allow_completed_runs: true,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the missing-value policy.
    #[must_use]
    pub fn with_missing_values(mut self, policy: MissingValuePolicy) -> Self {
        self.missing_values = policy;
        self
    }

    /// Treat unknown values as errors instead of zero.
    #[must_use]
    pub fn strict(self) -> Self {
        self.with_missing_values(MissingValuePolicy::Error)
    }

    /// Make a fired final action trigger end the whole turn.
    #[must_use]
    pub fn final_ends_turn(mut self) -> Self {
        self.story_triggers_after_final = false;
        self
    }

    /// Reject actions once the playthrough is complete.
    #[must_use]
    pub fn reject_completed_runs(mut self) -> Self {
        self.allow_completed_runs = false;
        self
    }
}
