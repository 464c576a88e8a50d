//! # Club Pipeline
//!
//! Load, compute and write for one club, and the per-club task fan-out used
//! by `run`.

use crate::config::{ClubConfig, TrackerConfig};
use anyhow::{bail, Context, Result};
use club_data::{write_reports, ClubLayout, CsvWeekSource};
use club_stats::{ClubStats, ReportOrder, ScoringRules, Week};
use tracing::{error, info};

/// Everything needed to process one club, owned so it can move into a task
#[derive(Debug, Clone)]
pub struct ClubPipeline {
    name: String,
    layout: ClubLayout,
    source: CsvWeekSource,
    rules: ScoringRules,
    order: ReportOrder,
}

/// Outcome of a successful club run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubSummary {
    pub club: String,
    pub weeks: usize,
    pub teams: usize,
    pub players: usize,
    pub reported_players: usize,
}

impl ClubSummary {
    fn from_stats(stats: &ClubStats) -> Self {
        Self {
            club: stats.club.clone(),
            weeks: stats.registry.weeks().len(),
            teams: stats.teams.team_count(),
            players: stats.registry.len(),
            reported_players: stats.report.len(),
        }
    }
}

impl ClubPipeline {
    pub fn new(config: &TrackerConfig, club: &ClubConfig) -> Self {
        let layout = ClubLayout::new(&config.data.data_dir, &club.folder);
        let source =
            CsvWeekSource::new(layout.weekly_dir()).with_ignore(config.data.ignore.clone());

        Self {
            name: club.name.clone(),
            layout,
            source,
            rules: config.scoring.clone(),
            order: config.report.order,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &ClubLayout {
        &self.layout
    }

    /// Load the club's weeks, ascending
    pub async fn load_weeks(&self) -> Result<Vec<Week>> {
        self.source
            .load_weeks()
            .await
            .with_context(|| format!("Failed to load weeks for club {}", self.name))
    }

    /// Load the club's weeks and compute its statistics
    pub async fn compute(&self) -> Result<ClubStats> {
        let weeks = self.load_weeks().await?;

        ClubStats::compute(&self.name, &weeks, &self.rules, self.order)
            .with_context(|| format!("Failed to compute statistics for club {}", self.name))
    }

    /// Compute the club's statistics and write both reports
    pub async fn run(&self) -> Result<ClubStats> {
        let stats = self.compute().await?;

        write_reports(&self.layout, &stats.report, &stats.teams)
            .await
            .with_context(|| format!("Failed to write reports for club {}", self.name))?;

        Ok(stats)
    }
}

/// Run every configured club, or only `only`, each in its own task
///
/// A failing club does not stop the others; the call errors once all tasks
/// finished if any of them failed.
pub async fn run_clubs(config: &TrackerConfig, only: Option<&str>) -> Result<Vec<ClubSummary>> {
    let clubs: Vec<&ClubConfig> = match only {
        Some(name) => vec![config.require_club(name)?],
        None => config.clubs.iter().collect(),
    };

    info!("Running {} club pipeline(s)", clubs.len());

    let handles: Vec<_> = clubs
        .into_iter()
        .map(|club| {
            let pipeline = ClubPipeline::new(config, club);
            let name = club.name.clone();
            let handle = tokio::spawn(async move { pipeline.run().await });
            (name, handle)
        })
        .collect();

    let mut summaries = Vec::new();
    let mut failed = Vec::new();

    for (name, handle) in handles {
        match handle.await {
            Ok(Ok(stats)) => {
                let summary = ClubSummary::from_stats(&stats);
                info!(
                    "Club {} done: {} weeks, {} teams, {} of {} players reported",
                    summary.club,
                    summary.weeks,
                    summary.teams,
                    summary.reported_players,
                    summary.players
                );
                summaries.push(summary);
            }
            Ok(Err(e)) => {
                error!("Club {} failed: {:#}", name, e);
                failed.push(name);
            }
            Err(e) => {
                error!("Club {} task aborted: {}", name, e);
                failed.push(name);
            }
        }
    }

    if !failed.is_empty() {
        bail!(
            "{} of {} club(s) failed: {}",
            failed.len(),
            failed.len() + summaries.len(),
            failed.join(", ")
        );
    }

    Ok(summaries)
}
