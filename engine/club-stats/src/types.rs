use crate::error::{Result, StatsError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Numeric position of a week in the season (`week3` -> 3)
pub type WeekIndex = u32;

/// Cell values treated as "no score recorded"
const ABSENT_TOKENS: &[&str] = &["", "nan", "na", "n/a", "none", "null"];

/// Highest score accepted for a single game day
///
/// Keeps week, team and season totals far inside `u32`.
pub const MAX_DAY_SCORE: u32 = 1_000;

/// A scoring period label, ordered by the numeric index embedded in it
///
/// `week3` sorts before `week10` because ordering uses the index, not the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekId {
    /// Label as it appeared in the source (e.g., "week3")
    label: String,

    /// Embedded numeric index (e.g., 3)
    index: WeekIndex,
}

impl WeekId {
    /// Parse a week label, taking the first run of digits as its index
    pub fn parse(raw: &str) -> Result<Self> {
        let label = raw.trim();
        let digits: String = label
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        let index =
            digits.parse::<WeekIndex>().map_err(|_| StatsError::InvalidWeekId(raw.to_string()))?;

        Ok(Self { label: label.to_string(), index })
    }

    /// Canonical label for a week known only by its index
    pub fn from_index(index: WeekIndex) -> Self {
        Self { label: format!("week{index}"), index }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn index(&self) -> WeekIndex {
        self.index
    }
}

impl Ord for WeekId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index).then_with(|| self.label.cmp(&other.label))
    }
}

impl PartialOrd for WeekId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for WeekId {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Team identifier
///
/// Integer identifiers order numerically (`2` < `10`) and sort ahead of
/// non-numeric ones, which order lexically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for TeamId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0.parse::<i64>(), other.0.parse::<i64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for TeamId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A player's standing after the latest folded week
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CurrentTeam {
    /// Rostered on this team (or last seen on it, mid-history)
    Team(TeamId),

    /// Absent from the most recent week
    Inactive,
}

impl CurrentTeam {
    pub const INACTIVE_LABEL: &'static str = "inactive";

    pub fn is_inactive(&self) -> bool {
        matches!(self, CurrentTeam::Inactive)
    }

    pub fn team(&self) -> Option<&TeamId> {
        match self {
            CurrentTeam::Team(team) => Some(team),
            CurrentTeam::Inactive => None,
        }
    }
}

impl fmt::Display for CurrentTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrentTeam::Team(team) => write!(f, "{team}"),
            CurrentTeam::Inactive => f.write_str(Self::INACTIVE_LABEL),
        }
    }
}

/// One value per game day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Days<T> {
    pub day1: T,
    pub day2: T,
    pub day3: T,
}

impl<T> Days<T> {
    pub fn new(day1: T, day2: T, day3: T) -> Self {
        Self { day1, day2, day3 }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.day1, &self.day2, &self.day3].into_iter()
    }

    pub fn as_ref(&self) -> Days<&T> {
        Days { day1: &self.day1, day2: &self.day2, day3: &self.day3 }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Days<U> {
        Days { day1: f(self.day1), day2: f(self.day2), day3: f(self.day3) }
    }

    pub fn zip<U>(self, other: Days<U>) -> Days<(T, U)> {
        Days {
            day1: (self.day1, other.day1),
            day2: (self.day2, other.day2),
            day3: (self.day3, other.day3),
        }
    }
}

/// Scores for the three game days of a week; `None` marks an absent day
pub type DayScores = Days<Option<u32>>;

impl Days<Option<u32>> {
    /// A week with no recorded score on any day
    pub fn absent() -> Self {
        Self::new(None, None, None)
    }

    pub fn is_absent(&self) -> bool {
        self.iter().all(Option::is_none)
    }

    /// Sum of the recorded days; absent days contribute nothing
    pub fn total(&self) -> u32 {
        self.iter().flatten().sum()
    }
}

/// One player's scores for one week, as supplied by the week source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRecord {
    pub team: TeamId,
    pub player: String,
    pub scores: DayScores,
}

impl WeeklyRecord {
    pub fn new(team: impl Into<String>, player: impl Into<String>, scores: DayScores) -> Self {
        Self { team: TeamId::new(team), player: player.into(), scores }
    }

    pub fn total(&self) -> u32 {
        self.scores.total()
    }
}

/// A record row before validation, with every cell still textual
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWeekRecord {
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub player: Option<String>,
    #[serde(default)]
    pub day1: Option<String>,
    #[serde(default)]
    pub day2: Option<String>,
    #[serde(default)]
    pub day3: Option<String>,
}

impl RawWeekRecord {
    /// Validate the row into a record for `week`
    pub fn into_record(self, week: &WeekId) -> Result<WeeklyRecord> {
        let team = required_field(week, "team", self.team)?;
        let player = required_field(week, "player", self.player)?;
        let scores = Days::new(
            parse_score(week, "day1", self.day1.as_deref())?,
            parse_score(week, "day2", self.day2.as_deref())?,
            parse_score(week, "day3", self.day3.as_deref())?,
        );

        Ok(WeeklyRecord::new(team, player, scores))
    }
}

fn required_field(week: &WeekId, field: &str, value: Option<String>) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(StatsError::data_format(week.label(), field, "missing value")),
    }
}

/// Parse one day cell; absent tokens yield `None`
///
/// Sources exported through spreadsheets write whole scores as `18.0`, so
/// integral floats are accepted.
pub fn parse_score(week: &WeekId, field: &str, raw: Option<&str>) -> Result<Option<u32>> {
    let Some(raw) = raw.map(str::trim) else { return Ok(None) };
    if ABSENT_TOKENS.iter().any(|token| raw.eq_ignore_ascii_case(token)) {
        return Ok(None);
    }

    let value: f64 = raw
        .parse()
        .map_err(|_| StatsError::data_format(week.label(), field, format!("{raw:?} is not a number")))?;

    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(StatsError::data_format(
            week.label(),
            field,
            format!("{raw:?} is not a non-negative whole score"),
        ));
    }

    if value > f64::from(MAX_DAY_SCORE) {
        return Err(StatsError::data_format(
            week.label(),
            field,
            format!("{raw:?} exceeds the maximum day score of {MAX_DAY_SCORE}"),
        ));
    }

    Ok(Some(value as u32))
}

/// All records of one week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    pub id: WeekId,
    pub records: Vec<WeeklyRecord>,
}

impl Week {
    pub fn new(id: WeekId, records: Vec<WeeklyRecord>) -> Self {
        Self { id, records }
    }

    /// Sum of every record's day totals
    pub fn total(&self) -> u32 {
        self.records.iter().map(WeeklyRecord::total).sum()
    }
}
