use std::path::{Path, PathBuf};

/// Directory holding one CSV per week
pub const WEEKLY_DATA_DIR: &str = "03_weekly_data";

/// Directory receiving the player report
pub const PLAYER_REPORT_DIR: &str = "01_player_performance";

/// Directory receiving the team table
pub const TEAM_REPORT_DIR: &str = "02_team_performance";

pub const PLAYER_REPORT_FILE: &str = "players.csv";
pub const TEAM_REPORT_FILE: &str = "teams.csv";

/// On-disk layout of one club's data folder
///
/// ```text
/// <data_dir>/<club folder>/
///     01_player_performance/players.csv
///     02_team_performance/teams.csv
///     03_weekly_data/week1-....csv
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubLayout {
    root: PathBuf,
}

impl ClubLayout {
    pub fn new(data_dir: impl AsRef<Path>, club_folder: &str) -> Self {
        Self { root: data_dir.as_ref().join(club_folder) }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn weekly_dir(&self) -> PathBuf {
        self.root.join(WEEKLY_DATA_DIR)
    }

    pub fn player_report_path(&self) -> PathBuf {
        self.root.join(PLAYER_REPORT_DIR).join(PLAYER_REPORT_FILE)
    }

    pub fn team_report_path(&self) -> PathBuf {
        self.root.join(TEAM_REPORT_DIR).join(TEAM_REPORT_FILE)
    }
}
