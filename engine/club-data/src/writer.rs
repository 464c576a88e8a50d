//! # Report Writers
//!
//! CSV encodings of the player report and the team table. Absent cells are
//! written empty.

use crate::error::{DataError, Result};
use crate::layout::ClubLayout;
use club_stats::{PlayerReport, TeamTable};
use std::path::Path;
use tracing::info;

/// Columns following the week columns of the player report
pub const PLAYER_SUMMARY_COLUMNS: &[&str] =
    &["sum", "average", "win_rate", "teaming_rate", "no_shows"];

fn cell(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Encode the player report as CSV
pub fn player_report_csv(report: &PlayerReport) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["player".to_string(), "current_team".to_string()];
    header.extend(report.weeks.iter().map(|week| week.label().to_string()));
    header.extend(PLAYER_SUMMARY_COLUMNS.iter().map(|c| c.to_string()));
    writer.write_record(&header)?;

    for row in &report.rows {
        let mut record = vec![row.player.clone(), row.current_team.to_string()];
        record.extend(row.weeks.iter().copied().map(cell));
        record.push(row.sum.to_string());
        record.push(row.average.map(|v| v.to_string()).unwrap_or_default());
        record.push(row.win_rate.to_string());
        record.push(row.teaming_rate.to_string());
        record.push(row.no_shows.to_string());
        writer.write_record(&record)?;
    }

    writer.into_inner().map_err(|err| csv::Error::from(err.into_error()))
}

/// Encode the team table as CSV
pub fn team_table_csv(table: &TeamTable) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["team".to_string()];
    header.extend(table.weeks().iter().map(|week| week.label().to_string()));
    writer.write_record(&header)?;

    for (team, cells) in table.rows() {
        let mut record = vec![team.to_string()];
        record.extend(cells.iter().copied().map(cell));
        writer.write_record(&record)?;
    }

    writer.into_inner().map_err(|err| csv::Error::from(err.into_error()))
}

/// Write both reports into the club layout, creating directories as needed
pub async fn write_reports(
    layout: &ClubLayout,
    report: &PlayerReport,
    teams: &TeamTable,
) -> Result<()> {
    let player_path = layout.player_report_path();
    let bytes = player_report_csv(report).map_err(|source| DataError::csv(&player_path, source))?;
    write_file(&player_path, &bytes).await?;

    let team_path = layout.team_report_path();
    let bytes = team_table_csv(teams).map_err(|source| DataError::csv(&team_path, source))?;
    write_file(&team_path, &bytes).await?;

    info!(
        "Wrote {:?} ({} players) and {:?} ({} teams)",
        player_path,
        report.len(),
        team_path,
        teams.team_count()
    );
    Ok(())
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| DataError::write(parent, source))?;
    }
    tokio::fs::write(path, bytes).await.map_err(|source| DataError::write(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_stats::{ClubStats, Days, ReportOrder, ScoringRules, Week, WeekId, WeeklyRecord};

    fn create_test_stats() -> ClubStats {
        let weeks = vec![
            Week::new(
                WeekId::from_index(1),
                vec![
                    WeeklyRecord::new("1", "Ada", Days::new(Some(18), Some(9), Some(18))),
                    WeeklyRecord::new("2", "Bo", Days::new(Some(10), None, Some(15))),
                ],
            ),
            Week::new(
                WeekId::from_index(2),
                vec![
                    WeeklyRecord::new("1", "Ada", Days::new(Some(0), Some(9), Some(27))),
                    WeeklyRecord::new("2", "Cy", Days::new(Some(16), Some(16), Some(16))),
                ],
            ),
        ];
        ClubStats::compute("test", &weeks, &ScoringRules::default(), ReportOrder::Team).unwrap()
    }

    #[test]
    fn test_player_report_csv() {
        let stats = create_test_stats();
        let csv = String::from_utf8(player_report_csv(&stats.report).unwrap()).unwrap();

        let expected = "player,current_team,week1,week2,sum,average,win_rate,teaming_rate,no_shows\n\
                        Ada,1,45,36,81,40.5,1.8,2,1\n\
                        Cy,2,,48,48,48,0.75,3,0\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_team_table_csv() {
        let stats = create_test_stats();
        let csv = String::from_utf8(team_table_csv(&stats.teams).unwrap()).unwrap();

        assert_eq!(csv, "team,week1,week2\n1,45,36\n2,25,48\n");
    }

    #[tokio::test]
    async fn test_write_reports_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ClubLayout::new(dir.path(), "01_new_eden");
        let stats = create_test_stats();

        write_reports(&layout, &stats.report, &stats.teams).await.unwrap();

        let players = std::fs::read_to_string(layout.player_report_path()).unwrap();
        let teams = std::fs::read_to_string(layout.team_report_path()).unwrap();
        assert!(players.starts_with("player,current_team,week1,week2"));
        assert!(teams.starts_with("team,week1,week2"));
    }

    #[tokio::test]
    async fn test_rewriting_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ClubLayout::new(dir.path(), "02_edens_gate");
        let stats = create_test_stats();

        write_reports(&layout, &stats.report, &stats.teams).await.unwrap();
        let first = std::fs::read(layout.player_report_path()).unwrap();

        let again = create_test_stats();
        write_reports(&layout, &again.report, &again.teams).await.unwrap();
        let second = std::fs::read(layout.player_report_path()).unwrap();

        assert_eq!(first, second);
    }
}
