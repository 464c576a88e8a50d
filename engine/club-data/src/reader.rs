//! # Week Source
//!
//! Loads a club's weekly CSV files from its weekly data directory.

use crate::error::{DataError, Result};
use club_stats::{RawWeekRecord, StatsError, Week, WeekId};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Columns every week file must carry
pub const REQUIRED_COLUMNS: &[&str] = &["team", "player", "day1", "day2", "day3"];

/// File name fragments skipped when listing week files
pub const DEFAULT_IGNORE: &[&str] = &[".DS_Store", ".gitkeep"];

/// Reads `<weekid>-<anything>.csv` files from one directory
#[derive(Debug, Clone)]
pub struct CsvWeekSource {
    dir: PathBuf,
    ignore: Vec<String>,
}

impl CsvWeekSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect() }
    }

    /// Replace the ignore list
    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a file name contains any ignore-list entry
    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.ignore.iter().any(|entry| !entry.is_empty() && file_name.contains(entry.as_str()))
    }

    /// Load every week, sorted by ascending week index
    pub async fn load_weeks(&self) -> Result<Vec<Week>> {
        info!("Loading weeks from: {:?}", self.dir);

        let mut files = self.list_week_files().await?;
        files.sort_by(|a, b| a.0.cmp(&b.0));

        for pair in files.windows(2) {
            if pair[0].0.index() == pair[1].0.index() {
                return Err(DataError::DuplicateWeek {
                    week: pair[1].0.to_string(),
                    first: pair[0].1.clone(),
                    second: pair[1].1.clone(),
                });
            }
        }

        let mut weeks = Vec::with_capacity(files.len());
        for (week_id, path) in files {
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| DataError::source_unavailable(&path, source))?;
            let week = parse_week_csv(week_id, &content, &path)?;
            debug!("Loaded {} with {} records from {:?}", week.id, week.records.len(), path);
            weeks.push(week);
        }

        info!("Loaded {} weeks from {:?}", weeks.len(), self.dir);
        Ok(weeks)
    }

    async fn list_week_files(&self) -> Result<Vec<(WeekId, PathBuf)>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|source| DataError::source_unavailable(&self.dir, source))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| DataError::source_unavailable(&self.dir, source))?
        {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if self.is_ignored(&file_name) {
                debug!("Skipping ignored file: {}", file_name);
                continue;
            }

            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|source| DataError::source_unavailable(&path, source))?;
            if !file_type.is_file() {
                warn!("Skipping non-file entry: {:?}", path);
                continue;
            }

            files.push((week_id_from_file_name(&file_name)?, path));
        }

        Ok(files)
    }
}

/// Week identifier of a file: the stem up to its first `-`
pub fn week_id_from_file_name(file_name: &str) -> std::result::Result<WeekId, StatsError> {
    let stem = Path::new(file_name).file_stem().and_then(|s| s.to_str()).unwrap_or(file_name);
    let prefix = stem.split('-').next().unwrap_or(stem);
    WeekId::parse(prefix).map_err(|_| StatsError::InvalidWeekId(file_name.to_string()))
}

/// Parse one week file's content
pub fn parse_week_csv(week: WeekId, content: &str, path: &Path) -> Result<Week> {
    let mut reader =
        csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(content.as_bytes());

    let headers = reader.headers().map_err(|source| DataError::csv(path, source))?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == *column) {
            return Err(StatsError::data_format(week.label(), *column, "missing column").into());
        }
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<RawWeekRecord>() {
        let raw = row.map_err(|source| DataError::csv(path, source))?;
        records.push(raw.into_record(&week)?);
    }

    Ok(Week::new(week, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_stats::{Days, TeamId};

    const WEEK_CSV: &str = "team,player,day1,day2,day3\n\
                            1,Ada,18,9,18\n\
                            1,Bo,10.0,,15\n\
                            2,Cy,0,NaN,27\n";

    fn write_file(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_week_id_from_file_name() {
        assert_eq!(week_id_from_file_name("week3-2022-02-13.csv").unwrap().label(), "week3");
        assert_eq!(week_id_from_file_name("week12.csv").unwrap().index(), 12);
        assert!(matches!(
            week_id_from_file_name("notes.csv"),
            Err(StatsError::InvalidWeekId(name)) if name == "notes.csv"
        ));
    }

    #[test]
    fn test_parse_week_csv() {
        let week = parse_week_csv(
            WeekId::from_index(1),
            WEEK_CSV,
            Path::new("week1-a.csv"),
        )
        .unwrap();

        assert_eq!(week.records.len(), 3);
        assert_eq!(week.records[1].team, TeamId::new("1"));
        assert_eq!(week.records[1].scores, Days::new(Some(10), None, Some(15)));
        assert_eq!(week.records[2].scores, Days::new(Some(0), None, Some(27)));
        assert_eq!(week.total(), 45 + 25 + 27);
    }

    #[test]
    fn test_parse_week_csv_ignores_extra_columns() {
        let content = "team,player,day1,day2,day3,notes\n3,Ada,9,9,9,late\n";
        let week =
            parse_week_csv(WeekId::from_index(2), content, Path::new("week2.csv")).unwrap();
        assert_eq!(week.records[0].total(), 27);
    }

    #[test]
    fn test_missing_column_names_week_and_field() {
        let content = "team,player,day1,day2\n1,Ada,9,9\n";
        let err = parse_week_csv(WeekId::parse("week4").unwrap(), content, Path::new("week4.csv"))
            .unwrap_err();

        match err {
            DataError::Stats(StatsError::DataFormat { week, field, .. }) => {
                assert_eq!(week, "week4");
                assert_eq!(field, "day3");
            }
            other => panic!("expected data format error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_player_value_is_rejected() {
        let content = "team,player,day1,day2,day3\n1,,9,9,9\n";
        let err = parse_week_csv(WeekId::from_index(1), content, Path::new("week1.csv"))
            .unwrap_err();
        assert!(matches!(
            err,
            DataError::Stats(StatsError::DataFormat { ref field, .. }) if field == "player"
        ));
    }

    #[test]
    fn test_oversized_score_is_rejected() {
        let content = "team,player,day1,day2,day3\n1,Ada,3000000000,3000000000,0\n";
        let err = parse_week_csv(WeekId::from_index(1), content, Path::new("week1.csv"))
            .unwrap_err();

        assert!(matches!(
            err,
            DataError::Stats(StatsError::DataFormat { ref field, .. }) if field == "day1"
        ));
    }

    #[test]
    fn test_maximum_scores_compute_without_overflow() {
        let max = club_stats::MAX_DAY_SCORE;
        let mut content = String::from("team,player,day1,day2,day3\n");
        for i in 0..50 {
            content.push_str(&format!("1,Player{i},{max},{max},{max}\n"));
        }
        let week =
            parse_week_csv(WeekId::from_index(1), &content, Path::new("week1.csv")).unwrap();

        let stats = club_stats::ClubStats::compute(
            "test",
            &[week],
            &club_stats::ScoringRules::default(),
            club_stats::ReportOrder::Team,
        )
        .unwrap();

        let week = WeekId::from_index(1);
        assert_eq!(stats.teams.week_total(&week), 50 * 3 * max);
        assert_eq!(stats.report.row("Player0").unwrap().sum, 3 * max);
    }

    #[tokio::test]
    async fn test_load_weeks_sorted_numerically_and_ignores_files() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "week10-2022-04-10.csv", WEEK_CSV);
        write_file(dir.path(), "week2-2022-02-06.csv", WEEK_CSV);
        write_file(dir.path(), "week1-2022-01-30.csv", WEEK_CSV);
        write_file(dir.path(), ".DS_Store", "binary junk");
        write_file(dir.path(), ".gitkeep", "");
        std::fs::create_dir(dir.path().join("archive")).unwrap();

        let weeks = CsvWeekSource::new(dir.path()).load_weeks().await.unwrap();
        let labels: Vec<&str> = weeks.iter().map(|w| w.id.label()).collect();
        assert_eq!(labels, vec!["week1", "week2", "week10"]);
    }

    #[tokio::test]
    async fn test_missing_directory_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvWeekSource::new(dir.path().join("missing"));

        let err = source.load_weeks().await.unwrap_err();
        assert!(matches!(err, DataError::SourceUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_week_index_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "week3-a.csv", WEEK_CSV);
        write_file(dir.path(), "week03-b.csv", WEEK_CSV);

        let err = CsvWeekSource::new(dir.path()).load_weeks().await.unwrap_err();
        assert!(matches!(err, DataError::DuplicateWeek { .. }));
    }

    #[tokio::test]
    async fn test_custom_ignore_list() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "week1-a.csv", WEEK_CSV);
        write_file(dir.path(), "README.md", "# weekly data");

        let source = CsvWeekSource::new(dir.path()).with_ignore(vec!["README".to_string()]);
        assert!(source.is_ignored("README.md"));

        let weeks = source.load_weeks().await.unwrap();
        assert_eq!(weeks.len(), 1);
    }
}
