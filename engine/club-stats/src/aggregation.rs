//! # Team Aggregation
//!
//! Additive reduction of weekly records into per-team totals.

use crate::types::{TeamId, Week, WeekId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Total score of one team in one week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamWeekTotal {
    pub team: TeamId,
    pub week: WeekId,
    pub total_score: u32,
}

/// Team aggregator
///
/// Every record counts, duplicates included, so the totals of a week always
/// add up to the sum of its records.
#[derive(Debug, Default)]
pub struct TeamAggregator {
    weeks: Vec<WeekId>,
    totals: BTreeMap<TeamId, BTreeMap<WeekId, u32>>,
}

impl TeamAggregator {
    /// Create new team aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-team totals of a single week, ordered by team
    pub fn week_totals(week: &Week) -> Vec<TeamWeekTotal> {
        let mut by_team: BTreeMap<&TeamId, u32> = BTreeMap::new();
        for record in &week.records {
            *by_team.entry(&record.team).or_insert(0) += record.total();
        }

        by_team
            .into_iter()
            .map(|(team, total_score)| TeamWeekTotal {
                team: team.clone(),
                week: week.id.clone(),
                total_score,
            })
            .collect()
    }

    /// Add one week's totals to the table
    pub fn add_week(&mut self, week: &Week) {
        for total in Self::week_totals(week) {
            self.totals.entry(total.team).or_default().insert(total.week, total.total_score);
        }
        self.weeks.push(week.id.clone());
    }

    /// Build the team-by-week table
    pub fn finish(mut self) -> TeamTable {
        self.weeks.sort();
        self.weeks.dedup();

        let rows = self
            .totals
            .into_iter()
            .map(|(team, by_week)| {
                let cells = self.weeks.iter().map(|week| by_week.get(week).copied()).collect();
                (team, cells)
            })
            .collect();

        TeamTable { weeks: self.weeks, rows }
    }

    /// Aggregate every week at once
    pub fn aggregate(weeks: &[Week]) -> TeamTable {
        let mut aggregator = Self::new();
        for week in weeks {
            aggregator.add_week(week);
        }
        aggregator.finish()
    }
}

/// Team totals indexed by team, one column per week
///
/// A team with no records in a week holds an absent cell for it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamTable {
    weeks: Vec<WeekId>,
    rows: BTreeMap<TeamId, Vec<Option<u32>>>,
}

impl TeamTable {
    pub fn weeks(&self) -> &[WeekId] {
        &self.weeks
    }

    /// Rows ordered by team
    pub fn rows(&self) -> impl Iterator<Item = (&TeamId, &[Option<u32>])> {
        self.rows.iter().map(|(team, cells)| (team, cells.as_slice()))
    }

    /// Total for `team` in `week`, if the team played that week
    pub fn total(&self, team: &TeamId, week: &WeekId) -> Option<u32> {
        let column = self.weeks.iter().position(|w| w == week)?;
        self.rows.get(team).and_then(|cells| cells[column])
    }

    /// Sum over every team for `week`
    pub fn week_total(&self, week: &WeekId) -> u32 {
        self.rows.keys().filter_map(|team| self.total(team, week)).sum()
    }

    pub fn team_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
