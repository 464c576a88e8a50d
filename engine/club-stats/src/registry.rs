use crate::error::{Result, StatsError};
use crate::player::Player;
use crate::rules::ScoringRules;
use crate::types::{DayScores, Week, WeekId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Player Registry - one Player per distinct name seen across a club's weeks
///
/// Weeks must be folded in ascending index order: gap filling compares each
/// sighting with the player's last recorded week.
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    /// Players in first-seen order
    players: Vec<Player>,

    /// Map from player name to position in `players`
    index_by_name: HashMap<String, usize>,

    /// Weeks folded so far, ascending
    weeks: Vec<WeekId>,

    rules: ScoringRules,
}

impl PlayerRegistry {
    /// Create a new empty registry
    pub fn new(rules: ScoringRules) -> Self {
        Self { players: Vec::new(), index_by_name: HashMap::new(), weeks: Vec::new(), rules }
    }

    /// Fold every week in order and finalize
    pub fn from_weeks(weeks: &[Week], rules: ScoringRules) -> Result<Self> {
        let mut registry = Self::new(rules);
        for week in weeks {
            registry.fold_week(week)?;
        }
        registry.finalize();
        Ok(registry)
    }

    /// Fold one week's records into the registry
    ///
    /// The first row for a player wins; later rows for the same player in the
    /// same week are ignored.
    pub fn fold_week(&mut self, week: &Week) -> Result<()> {
        if let Some(previous) = self.weeks.last() {
            if week.id.index() <= previous.index() {
                return Err(StatsError::WeekOrder {
                    previous: previous.to_string(),
                    next: week.id.to_string(),
                });
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut created = 0usize;

        for record in &week.records {
            if !seen.insert(record.player.as_str()) {
                warn!(
                    "Ignoring duplicate row for {} in {} (team {})",
                    record.player, week.id, record.team
                );
                continue;
            }

            let index = match self.index_by_name.get(&record.player) {
                Some(&index) => {
                    self.players[index].add_team(&week.id, record.team.clone());
                    index
                }
                None => {
                    let index = self.players.len();
                    self.players.push(Player::new(
                        record.player.clone(),
                        &week.id,
                        record.team.clone(),
                    ));
                    self.index_by_name.insert(record.player.clone(), index);
                    created += 1;
                    index
                }
            };
            self.players[index].add_week_scores(&week.id, record.scores, &self.rules);
        }

        for player in &mut self.players {
            if !seen.contains(player.name()) {
                player.add_week_scores(&week.id, DayScores::absent(), &self.rules);
            }
        }

        debug!(
            "Folded {}: {} records, {} new players, {} registered",
            week.id,
            week.records.len(),
            created,
            self.players.len()
        );

        self.weeks.push(week.id.clone());
        Ok(())
    }

    /// Close every history at the latest week and mark absentees inactive
    ///
    /// A player missing from the most recent week is inactive regardless of
    /// their last known team. Safe to call again after folding more weeks.
    pub fn finalize(&mut self) {
        let Some(latest) = self.weeks.last() else { return };
        let latest = latest.index();

        for player in &mut self.players {
            player.fill_absence_through(latest, &self.rules);
            if player.team_at(latest).is_none() {
                player.mark_inactive();
            }
        }
    }

    /// Get a player by name
    pub fn get(&self, name: &str) -> Option<&Player> {
        self.index_by_name.get(name).map(|&index| &self.players[index])
    }

    /// All players in first-seen order
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Players on a team in the most recent week
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|player| player.is_active())
    }

    /// Weeks folded so far, ascending
    pub fn weeks(&self) -> &[WeekId] {
        &self.weeks
    }

    pub fn latest_week(&self) -> Option<&WeekId> {
        self.weeks.last()
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
