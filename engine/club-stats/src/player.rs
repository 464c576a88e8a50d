use crate::rules::ScoringRules;
use crate::stats::{guarded_ratio, round_to};
use crate::types::{CurrentTeam, DayScores, Days, TeamId, WeekId, WeekIndex};
use std::collections::BTreeMap;

/// Decimal places kept on derived rates
const RATE_PRECISION: u32 = 3;

/// How a player scored on a single game day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// Score only reachable without a teammate
    Solo,

    /// Any other recorded score, zero included
    Coordinated,
}

impl Activity {
    /// 1 for coordinated play, 0 for solo play
    pub fn flag(self) -> u32 {
        match self {
            Activity::Solo => 0,
            Activity::Coordinated => 1,
        }
    }
}

/// Activity per game day for one week; `None` marks an absent day
pub type Coordination = Days<Option<Activity>>;

/// Classify one day's score against that day's solo scores
pub fn classify_day(score: Option<u32>, solo_scores: &[u32]) -> Option<Activity> {
    score.map(|score| {
        if solo_scores.contains(&score) {
            Activity::Solo
        } else {
            Activity::Coordinated
        }
    })
}

/// Classify every day of a week
pub fn classify_week(scores: &DayScores, rules: &ScoringRules) -> Coordination {
    scores.zip(rules.solo_scores.as_ref()).map(|(score, solo)| classify_day(score, solo))
}

/// Rates derived from a player's full history
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerRates {
    pub win_rate: f64,
    pub teaming_rate: f64,
    pub no_shows: u32,
}

impl PlayerRates {
    /// Recompute every rate from scratch
    pub fn from_history<'a, S, C>(scores: S, coordination: C, rules: &ScoringRules) -> Self
    where
        S: IntoIterator<Item = &'a DayScores> + Clone,
        C: IntoIterator<Item = &'a Coordination>,
    {
        Self {
            win_rate: win_rate(scores.clone(), rules),
            teaming_rate: teaming_rate(coordination),
            no_shows: count_no_shows(scores),
        }
    }
}

/// Wins over losses across every recorded day
///
/// A day's score counts one win per `points_per_win` points, and each recorded
/// day stands for `games_per_day` games. Losses are floored at 1.
pub fn win_rate<'a>(scores: impl IntoIterator<Item = &'a DayScores>, rules: &ScoringRules) -> f64 {
    let mut wins: i64 = 0;
    let mut games: i64 = 0;

    for week in scores {
        for (score, games_per_day) in week.iter().zip(rules.games_per_day.iter()) {
            if let Some(score) = score {
                wins += i64::from(score.checked_div(rules.points_per_win).unwrap_or(0));
                games += i64::from(*games_per_day);
            }
        }
    }

    round_to(guarded_ratio(wins, games - wins), RATE_PRECISION)
}

/// Coordinated days over solo days, with the solo count floored at 1
pub fn teaming_rate<'a>(coordination: impl IntoIterator<Item = &'a Coordination>) -> f64 {
    let mut successes: i64 = 0;
    let mut games: i64 = 0;

    for activity in coordination.into_iter().flat_map(|week| week.iter().flatten()) {
        successes += i64::from(activity.flag());
        games += 1;
    }

    round_to(guarded_ratio(successes, games - successes), RATE_PRECISION)
}

/// Days rostered with a score of exactly zero
pub fn count_no_shows<'a>(scores: impl IntoIterator<Item = &'a DayScores>) -> u32 {
    let count = scores
        .into_iter()
        .flat_map(|week| week.iter().flatten())
        .filter(|score| **score == 0)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// One club member and their full history
///
/// Histories are keyed by week index and start at the entry week; any earlier
/// week reads back as absent.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    entry_week: WeekId,
    current_team: CurrentTeam,
    last_team: TeamId,
    team_history: BTreeMap<WeekIndex, Option<TeamId>>,
    score_history: BTreeMap<WeekIndex, DayScores>,
    coordination_history: BTreeMap<WeekIndex, Coordination>,
    rates: PlayerRates,
}

impl Player {
    /// Create a player first seen in `entry_week` on `team`
    pub fn new(name: impl Into<String>, entry_week: &WeekId, team: TeamId) -> Self {
        let mut team_history = BTreeMap::new();
        team_history.insert(entry_week.index(), Some(team.clone()));

        Self {
            name: name.into(),
            entry_week: entry_week.clone(),
            current_team: CurrentTeam::Team(team.clone()),
            last_team: team,
            team_history,
            score_history: BTreeMap::new(),
            coordination_history: BTreeMap::new(),
            rates: PlayerRates::default(),
        }
    }

    /// Record the team for `week`, marking any skipped weeks as absent
    pub fn add_team(&mut self, week: &WeekId, team: TeamId) {
        if week.index() > 0 {
            self.fill_team_absence_through(week.index() - 1);
        }
        self.team_history.insert(week.index(), Some(team.clone()));
        self.current_team = CurrentTeam::Team(team.clone());
        self.last_team = team;
    }

    /// Record the scores for `week` and recompute every derived value
    pub fn add_week_scores(&mut self, week: &WeekId, scores: DayScores, rules: &ScoringRules) {
        if week.index() > 0 {
            self.fill_score_absence_through(week.index() - 1);
        }
        self.score_history.insert(week.index(), scores);
        self.recompute(rules);
    }

    /// Extend both histories with absence markers up to `week`
    pub fn fill_absence_through(&mut self, week: WeekIndex, rules: &ScoringRules) {
        self.fill_team_absence_through(week);
        if self.fill_score_absence_through(week) {
            self.recompute(rules);
        }
    }

    /// Mark the player as absent from the most recent week
    pub fn mark_inactive(&mut self) {
        self.current_team = CurrentTeam::Inactive;
    }

    fn fill_team_absence_through(&mut self, week: WeekIndex) {
        let next = self.next_week(self.team_history.keys().next_back().copied());
        for index in next..=week {
            self.team_history.entry(index).or_insert(None);
        }
    }

    fn fill_score_absence_through(&mut self, week: WeekIndex) -> bool {
        let next = self.next_week(self.score_history.keys().next_back().copied());
        let mut filled = false;
        for index in next..=week {
            self.score_history.entry(index).or_insert_with(|| {
                filled = true;
                DayScores::absent()
            });
        }
        filled
    }

    fn next_week(&self, last: Option<WeekIndex>) -> WeekIndex {
        last.map_or(self.entry_week.index(), |last| last + 1)
    }

    fn recompute(&mut self, rules: &ScoringRules) {
        self.coordination_history = self
            .score_history
            .iter()
            .map(|(week, scores)| (*week, classify_week(scores, rules)))
            .collect();
        self.rates = PlayerRates::from_history(
            self.score_history.values(),
            self.coordination_history.values(),
            rules,
        );
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry_week(&self) -> &WeekId {
        &self.entry_week
    }

    pub fn current_team(&self) -> &CurrentTeam {
        &self.current_team
    }

    /// Team of the most recent week the player appeared in
    pub fn last_team(&self) -> &TeamId {
        &self.last_team
    }

    pub fn is_active(&self) -> bool {
        !self.current_team.is_inactive()
    }

    pub fn team_history(&self) -> &BTreeMap<WeekIndex, Option<TeamId>> {
        &self.team_history
    }

    /// Team for `week`, or `None` when the player was absent
    pub fn team_at(&self, week: WeekIndex) -> Option<&TeamId> {
        self.team_history.get(&week).and_then(Option::as_ref)
    }

    pub fn score_history(&self) -> &BTreeMap<WeekIndex, DayScores> {
        &self.score_history
    }

    /// Scores for `week`; absent for weeks outside the history
    pub fn scores_at(&self, week: WeekIndex) -> DayScores {
        self.score_history.get(&week).copied().unwrap_or_else(DayScores::absent)
    }

    /// Day total for `week`, present only when the player was rostered
    pub fn week_total(&self, week: WeekIndex) -> Option<u32> {
        self.team_at(week).map(|_| self.scores_at(week).total())
    }

    pub fn coordination_history(&self) -> &BTreeMap<WeekIndex, Coordination> {
        &self.coordination_history
    }

    pub fn rates(&self) -> PlayerRates {
        self.rates
    }

    pub fn win_rate(&self) -> f64 {
        self.rates.win_rate
    }

    pub fn teaming_rate(&self) -> f64 {
        self.rates.teaming_rate
    }

    pub fn no_shows(&self) -> u32 {
        self.rates.no_shows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(index: WeekIndex) -> WeekId {
        WeekId::from_index(index)
    }

    fn scores(day1: Option<u32>, day2: Option<u32>, day3: Option<u32>) -> DayScores {
        Days::new(day1, day2, day3)
    }

    #[test]
    fn test_classify_day() {
        let rules = ScoringRules::default();

        assert_eq!(classify_day(Some(14), &rules.solo_scores.day1), Some(Activity::Solo));
        assert_eq!(classify_day(Some(16), &rules.solo_scores.day1), Some(Activity::Coordinated));
        assert_eq!(classify_day(Some(0), &rules.solo_scores.day1), Some(Activity::Coordinated));
        assert_eq!(classify_day(None, &rules.solo_scores.day1), None);

        // day3 has its own solo set
        assert_eq!(classify_day(Some(18), &rules.solo_scores.day3), Some(Activity::Coordinated));
        assert_eq!(classify_day(Some(27), &rules.solo_scores.day3), Some(Activity::Solo));
    }

    #[test]
    fn test_win_rate_two_weeks() {
        let rules = ScoringRules::default();
        let history = [scores(Some(18), Some(9), Some(18)), scores(Some(0), Some(9), Some(27))];

        // wins = 2+1+2 + 0+1+3 = 9, games = 4*2 + 2*3 = 14, losses = 5
        assert_eq!(win_rate(&history, &rules), 1.8);
    }

    #[test]
    fn test_win_rate_ignores_absent_days() {
        let rules = ScoringRules::default();
        let history = [scores(Some(18), None, None), DayScores::absent()];

        // wins = 2, games = 2, losses floored to 1
        assert_eq!(win_rate(&history, &rules), 2.0);
    }

    #[test]
    fn test_teaming_rate() {
        let rules = ScoringRules::default();
        let history = [scores(Some(14), Some(16), None), scores(Some(0), Some(10), Some(20))];
        let coordination: Vec<Coordination> =
            history.iter().map(|week| classify_week(week, &rules)).collect();

        // coordinated: 16, 0, 20 -> 3; games 5; fails 2
        assert_eq!(teaming_rate(&coordination), 1.5);
    }

    #[test]
    fn test_zero_games_yield_zero_rates() {
        let rules = ScoringRules::default();
        let history = [DayScores::absent(), DayScores::absent()];
        let rates = PlayerRates::from_history(&history, &[], &rules);

        assert_eq!(rates.win_rate, 0.0);
        assert_eq!(rates.teaming_rate, 0.0);
        assert_eq!(rates.no_shows, 0);
    }

    #[test]
    fn test_no_shows_count_zero_scores_only() {
        let history = [scores(Some(0), None, Some(0)), scores(Some(9), Some(0), None)];
        assert_eq!(count_no_shows(&history), 3);
    }

    #[test]
    fn test_player_rates_follow_updates() {
        let rules = ScoringRules::default();
        let mut player = Player::new("Ada", &week(1), TeamId::new("1"));

        player.add_week_scores(&week(1), scores(Some(18), Some(9), Some(18)), &rules);
        // wins = 5, games = 7, losses = 2
        assert_eq!(player.win_rate(), 2.5);

        player.add_week_scores(&week(2), scores(Some(0), Some(9), Some(27)), &rules);
        assert_eq!(player.win_rate(), 1.8);
        assert_eq!(player.no_shows(), 1);
        assert_eq!(player.coordination_history().len(), 2);
        assert_eq!(player.coordination_history()[&2].day3, Some(Activity::Solo));
    }

    #[test]
    fn test_overwriting_a_week_recomputes_rates() {
        let rules = ScoringRules::default();
        let mut player = Player::new("Ada", &week(1), TeamId::new("1"));

        player.add_week_scores(&week(1), scores(Some(0), Some(0), Some(0)), &rules);
        assert_eq!(player.no_shows(), 3);

        player.add_week_scores(&week(1), scores(Some(16), Some(16), Some(18)), &rules);
        assert_eq!(player.no_shows(), 0);
        assert_eq!(player.teaming_rate(), 3.0);
    }

    #[test]
    fn test_add_team_fills_gap_weeks() {
        let mut player = Player::new("Ada", &week(2), TeamId::new("3"));
        player.add_team(&week(5), TeamId::new("7"));

        let history: Vec<(WeekIndex, Option<&str>)> = player
            .team_history()
            .iter()
            .map(|(week, team)| (*week, team.as_ref().map(TeamId::as_str)))
            .collect();
        assert_eq!(history, vec![(2, Some("3")), (3, None), (4, None), (5, Some("7"))]);
        assert_eq!(player.current_team(), &CurrentTeam::Team(TeamId::new("7")));
        assert_eq!(player.team_at(1), None);
    }

    #[test]
    fn test_score_gaps_hold_absent_triples() {
        let rules = ScoringRules::default();
        let mut player = Player::new("Ada", &week(1), TeamId::new("1"));
        player.add_week_scores(&week(1), scores(Some(10), Some(10), Some(15)), &rules);
        player.add_week_scores(&week(4), scores(Some(16), None, None), &rules);

        assert_eq!(player.score_history().len(), 4);
        assert!(player.scores_at(2).is_absent());
        assert!(player.scores_at(3).is_absent());
        assert!(player.coordination_history()[&3].iter().all(Option::is_none));
    }

    #[test]
    fn test_week_total_requires_roster_entry() {
        let rules = ScoringRules::default();
        let mut player = Player::new("Ada", &week(1), TeamId::new("1"));
        player.add_week_scores(&week(1), DayScores::absent(), &rules);
        player.fill_absence_through(2, &rules);

        // rostered with every day absent still counts as a zero week
        assert_eq!(player.week_total(1), Some(0));
        assert_eq!(player.week_total(2), None);
        assert_eq!(player.week_total(9), None);
    }

    #[test]
    fn test_mark_inactive_keeps_last_team() {
        let mut player = Player::new("Ada", &week(1), TeamId::new("4"));
        player.mark_inactive();

        assert!(!player.is_active());
        assert_eq!(player.current_team(), &CurrentTeam::Inactive);
        assert_eq!(player.last_team(), &TeamId::new("4"));
    }
}
