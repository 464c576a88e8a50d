//! # Player Report
//!
//! Joins per-week totals, summary statistics and rates of the finalized
//! players into the report table handed to the writers.

use crate::player::Player;
use crate::registry::PlayerRegistry;
use crate::stats::{mean_present, sum_present};
use crate::types::{CurrentTeam, WeekId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Row ordering of the player report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportOrder {
    /// By current team ascending; ties keep first-seen order
    #[default]
    Team,

    /// By average descending, then current team descending
    Average,
}

/// One player's line in the report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub player: String,
    pub current_team: CurrentTeam,
    /// Summed day scores per report week; `None` when the player was absent
    pub weeks: Vec<Option<u32>>,
    pub sum: u32,
    pub average: Option<f64>,
    pub win_rate: f64,
    pub teaming_rate: f64,
    pub no_shows: u32,
}

/// Finalized player report of one club
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerReport {
    pub weeks: Vec<WeekId>,
    pub rows: Vec<ReportRow>,
}

impl PlayerReport {
    pub fn row(&self, player: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.player == player)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the player report from a finalized registry
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAssembler {
    order: ReportOrder,
}

impl ReportAssembler {
    pub fn new(order: ReportOrder) -> Self {
        Self { order }
    }

    /// Assemble the report, leaving out inactive players
    pub fn assemble(&self, registry: &PlayerRegistry) -> PlayerReport {
        let weeks = registry.weeks().to_vec();
        let mut rows: Vec<ReportRow> =
            registry.players().map(|player| Self::build_row(player, &weeks)).collect();

        let total = rows.len();
        rows.retain(|row| !row.current_team.is_inactive());
        debug!("Report keeps {} of {} players", rows.len(), total);

        self.sort_rows(&mut rows);
        PlayerReport { weeks, rows }
    }

    fn build_row(player: &Player, weeks: &[WeekId]) -> ReportRow {
        let cells: Vec<Option<u32>> =
            weeks.iter().map(|week| player.week_total(week.index())).collect();

        ReportRow {
            player: player.name().to_string(),
            current_team: player.current_team().clone(),
            sum: sum_present(&cells),
            average: mean_present(&cells),
            weeks: cells,
            win_rate: player.win_rate(),
            teaming_rate: player.teaming_rate(),
            no_shows: player.no_shows(),
        }
    }

    fn sort_rows(&self, rows: &mut [ReportRow]) {
        match self.order {
            ReportOrder::Team => rows.sort_by(|a, b| a.current_team.cmp(&b.current_team)),
            ReportOrder::Average => rows.sort_by(|a, b| {
                compare_average_desc(a.average, b.average)
                    .then_with(|| b.current_team.cmp(&a.current_team))
            }),
        }
    }
}

/// Highest average first; rows without an average go last
fn compare_average_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
