//! # Club Stats
//!
//! Statistics engine for weekly club game days.
//!
//! Weekly score records are folded, in ascending week order, into one history
//! per player. From those histories the engine derives win rates, teaming
//! rates and no-show counts, and alongside them it totals every team's score
//! per week.

pub mod aggregation;
pub mod club;
pub mod error;
pub mod player;
pub mod registry;
pub mod report;
pub mod rules;
pub mod stats;
pub mod types;


pub use aggregation::{TeamAggregator, TeamTable, TeamWeekTotal};
pub use club::ClubStats;
pub use error::{Result, StatsError};
pub use player::{Activity, Coordination, Player, PlayerRates};
pub use registry::PlayerRegistry;
pub use report::{PlayerReport, ReportAssembler, ReportOrder, ReportRow};
pub use rules::ScoringRules;
pub use types::{
    CurrentTeam, DayScores, Days, RawWeekRecord, TeamId, Week, WeekId, WeekIndex, WeeklyRecord,
    MAX_DAY_SCORE,
};
