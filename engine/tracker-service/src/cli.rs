//! # Command Line Interface
//!
//! Runs club pipelines and prints reports to the terminal.

use crate::config::TrackerConfig;
use crate::pipeline::{run_clubs, ClubPipeline};
use crate::render::{format_player_report, format_team_table, format_week_records};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Weekly club performance tracker
#[derive(Parser, Debug)]
#[command(name = "club-tracker")]
#[command(about = "Builds player and team performance reports from weekly club score sheets")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./club-tracker.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory containing one folder per club
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Compute and write reports for every club, or one club
    Run {
        /// Only run this club
        #[arg(long)]
        club: Option<String>,
    },
    /// Compute one club and print its report
    Show {
        /// Club to show
        #[arg(long)]
        club: String,

        /// Print the team table instead of the player report
        #[arg(long)]
        teams: bool,

        /// Print the latest week's records instead of the player report
        #[arg(long, conflicts_with = "teams")]
        week: bool,
    },
    /// Print the effective configuration
    Config,
}

/// CLI handler
pub struct CliHandler {
    config: TrackerConfig,
}

impl CliHandler {
    pub fn new(config: TrackerConfig) -> Self {
        Self { config }
    }

    /// Handle CLI commands
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Run { club } => self.run(club.as_deref()).await,
            Commands::Show { club, teams, week } => {
                if week {
                    self.show_latest_week(&club).await
                } else {
                    self.show(&club, teams).await
                }
            }
            Commands::Config => self.show_config(),
        }
    }

    async fn run(&self, club: Option<&str>) -> Result<()> {
        let summaries = run_clubs(&self.config, club).await?;
        for summary in summaries {
            println!(
                "{}: {} weeks, {} teams, {} players reported",
                summary.club, summary.weeks, summary.teams, summary.reported_players
            );
        }
        Ok(())
    }

    async fn show(&self, club: &str, teams: bool) -> Result<()> {
        let club = self.config.require_club(club)?;
        let stats = ClubPipeline::new(&self.config, club).compute().await?;

        if teams {
            print!("{}", format_team_table(&stats.teams));
        } else if stats.report.is_empty() {
            println!("No active players");
        } else {
            print!("{}", format_player_report(&stats.report));
        }
        Ok(())
    }

    async fn show_latest_week(&self, club: &str) -> Result<()> {
        let club = self.config.require_club(club)?;
        let weeks = ClubPipeline::new(&self.config, club).load_weeks().await?;
        let latest =
            weeks.last().ok_or_else(|| anyhow!("No weekly data for club {}", club.name))?;

        println!("{}", latest.id);
        print!("{}", format_week_records(latest));
        Ok(())
    }

    fn show_config(&self) -> Result<()> {
        let text =
            toml::to_string_pretty(&self.config).context("Failed to serialize configuration")?;
        print!("{}", text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["club-tracker", "run"]).unwrap();
        assert_eq!(cli.command, Commands::Run { club: None });
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["club-tracker", "run", "--club", "new_eden"]).unwrap();
        assert_eq!(cli.command, Commands::Run { club: Some("new_eden".to_string()) });
    }

    #[test]
    fn test_parse_show_with_global_flags() {
        let cli = Cli::try_parse_from([
            "club-tracker",
            "show",
            "--club",
            "edens_gate",
            "--teams",
            "--data-dir",
            "/srv/clubs",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Commands::Show { club: "edens_gate".to_string(), teams: true, week: false }
        );
        assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/clubs")));
    }

    #[test]
    fn test_show_requires_club() {
        assert!(Cli::try_parse_from(["club-tracker", "show"]).is_err());
    }

    #[test]
    fn test_parse_config_command() {
        let cli =
            Cli::try_parse_from(["club-tracker", "--config", "tracker.toml", "config"]).unwrap();
        assert_eq!(cli.command, Commands::Config);
        assert_eq!(cli.config, Some(PathBuf::from("tracker.toml")));
    }

    #[tokio::test]
    async fn test_show_unknown_club_fails() {
        let config =
            TrackerConfig { clubs: TrackerConfig::default_clubs(), ..TrackerConfig::default() };
        let handler = CliHandler::new(config);

        let result = handler
            .handle_command(Commands::Show {
                club: "harbor".to_string(),
                teams: false,
                week: false,
            })
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_show_week() {
        let cli =
            Cli::try_parse_from(["club-tracker", "show", "--club", "new_eden", "--week"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Show { club: "new_eden".to_string(), teams: false, week: true }
        );

        assert!(Cli::try_parse_from([
            "club-tracker",
            "show",
            "--club",
            "new_eden",
            "--week",
            "--teams"
        ])
        .is_err());
    }

    #[tokio::test]
    async fn test_show_week_without_data_fails() {
        let dir = tempfile::tempdir().unwrap();
        let weekly = dir.path().join("01_new_eden").join("03_weekly_data");
        std::fs::create_dir_all(&weekly).unwrap();

        let mut config =
            TrackerConfig { clubs: TrackerConfig::default_clubs(), ..TrackerConfig::default() };
        config.data.data_dir = dir.path().to_path_buf();
        let handler = CliHandler::new(config);

        let result = handler
            .handle_command(Commands::Show {
                club: "new_eden".to_string(),
                teams: false,
                week: true,
            })
            .await;
        assert!(result.unwrap_err().to_string().contains("No weekly data"));
    }
}
