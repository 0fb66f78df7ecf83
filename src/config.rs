//! Search configuration parameters.

use crate::games::gomoku::CandidateRule;

/// Rounds of selection, expansion, simulation and backpropagation per decision.
pub const ROUNDS_PER_DECISION: u32 = 200;

/// Default exploration constant for the UCB formula.
pub const DEFAULT_EXPLORATION: f64 = 2.0 * std::f64::consts::SQRT_2;

/// Configuration for one move decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Exploration constant `C` in `q/n + C * sqrt(2 ln(N) / n)`.
    pub exploration_constant: f64,

    /// How candidate moves are generated at every node and rollout step.
    pub candidate_rule: CandidateRule,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_constant: DEFAULT_EXPLORATION,
            candidate_rule: CandidateRule::OwnStones,
        }
    }
}

impl SearchConfig {
    /// Builder pattern: set the exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the candidate rule.
    pub fn with_candidate_rule(mut self, rule: CandidateRule) -> Self {
        self.candidate_rule = rule;
        self
    }
}
