use crate::types::Days;
use serde::{Deserialize, Serialize};

/// Scoring constants used to classify days and derive rates
///
/// Injected into the player computations rather than read from globals, so a
/// club with different game rules only needs a different value here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Exact day scores that can only be reached without a teammate
    pub solo_scores: Days<Vec<u32>>,

    /// Points a single won game is worth
    pub points_per_win: u32,

    /// Games bundled into one day's score
    pub games_per_day: Days<u32>,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            solo_scores: Days::new(vec![10, 14, 18], vec![10, 14, 18], vec![15, 19, 23, 27]),
            points_per_win: 9,
            games_per_day: Days::new(2, 2, 3),
        }
    }
}

impl ScoringRules {
    /// Check the rules can drive the rate computations
    pub fn validate(&self) -> Result<(), String> {
        if self.points_per_win == 0 {
            return Err("points_per_win must be greater than zero".to_string());
        }
        if self.games_per_day.iter().any(|games| *games == 0) {
            return Err("games_per_day must be greater than zero for every day".to_string());
        }
        Ok(())
    }
}
