//! Simulation settings.

use serde::{Deserialize, Serialize};

use crate::evaluator::AceRule;

pub const DEFAULT_TRIALS: u64 = 10_000;

/// Knobs for [`crate::Simulator`].
///
/// Missing fields fall back to [`Default`] when deserializing, so a config
/// file only needs the values it changes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of random completions to draw.
    pub trials: u64,
    /// Fixed seed for reproducible runs; a fresh random seed when `None`.
    pub seed: Option<u64>,
    pub ace_rule: AceRule,
    /// Spread trials over the rayon pool. Ignored without the `parallel` feature.
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            ace_rule: AceRule::default(),
            parallel: false,
        }
    }
}

impl SimulationConfig {
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_ace_rule(mut self, rule: AceRule) -> Self {
        self.ace_rule = rule;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
