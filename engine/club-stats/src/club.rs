use crate::aggregation::{TeamAggregator, TeamTable};
use crate::error::Result;
use crate::registry::PlayerRegistry;
use crate::report::{PlayerReport, ReportAssembler, ReportOrder};
use crate::rules::ScoringRules;
use crate::types::Week;
use tracing::info;

/// Everything computed for one club in one run
#[derive(Debug, Clone)]
pub struct ClubStats {
    pub club: String,
    pub registry: PlayerRegistry,
    pub teams: TeamTable,
    pub report: PlayerReport,
}

impl ClubStats {
    /// Run the full statistics pipeline over a club's weeks
    ///
    /// `weeks` must be in ascending index order.
    pub fn compute(
        club: &str,
        weeks: &[Week],
        rules: &ScoringRules,
        order: ReportOrder,
    ) -> Result<Self> {
        let teams = TeamAggregator::aggregate(weeks);
        let registry = PlayerRegistry::from_weeks(weeks, rules.clone())?;
        let report = ReportAssembler::new(order).assemble(&registry);

        info!(
            "Computed {} stats: {} weeks, {} teams, {} players ({} active)",
            club,
            weeks.len(),
            teams.team_count(),
            registry.len(),
            report.len()
        );

        Ok(Self { club: club.to_string(), registry, teams, report })
    }
}
