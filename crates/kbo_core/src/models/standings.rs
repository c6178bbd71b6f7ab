//! Standings snapshot model
//!
//! 시즌 스탠딩 스냅샷 (팀별 승/패/무 + 잔여 경기)
//!
//! Every numeric field defaults to zero on deserialization so a
//! malformed row degrades to an all-zero record instead of failing
//! the whole snapshot.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// KBO regular season: 144 games per team
pub const DEFAULT_SEASON: u32 = 144;

/// One team's current season record, as supplied by the data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub team: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub draws: u32,
    /// Authoritative remaining-game count when the schedule source
    /// provides one; otherwise derived from the season length.
    #[serde(default)]
    pub remaining_games: Option<u32>,
}

impl TeamStanding {
    pub fn new(team: impl Into<String>, wins: u32, losses: u32) -> Self {
        Self {
            team: team.into(),
            wins,
            losses,
            draws: 0,
            remaining_games: None,
        }
    }

    /// Games already decided (wins + losses + draws).
    pub fn played(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Current win percentage, KBO convention: W / (W + L), draws excluded.
    pub fn win_pct(&self) -> f64 {
        let denom = self.wins + self.losses;
        if denom > 0 {
            self.wins as f64 / denom as f64
        } else {
            0.0
        }
    }

    /// Banked half-wins: W + 0.5 * T (draws count as half a win in
    /// the final-percentage projections).
    pub fn half_wins(&self) -> f64 {
        self.wins as f64 + 0.5 * self.draws as f64
    }

    /// Best final win percentage reachable with `remaining` games left
    /// (win them all). Zero denominator yields 0, not NaN.
    pub fn p_max(&self, remaining: u32) -> f64 {
        let denom = (self.played() + remaining) as f64;
        if denom > 0.0 {
            (self.half_wins() + remaining as f64) / denom
        } else {
            0.0
        }
    }

    /// Worst final win percentage (lose every remaining game).
    pub fn p_min(&self, remaining: u32) -> f64 {
        let denom = (self.played() + remaining) as f64;
        if denom > 0.0 {
            self.half_wins() / denom
        } else {
            0.0
        }
    }
}

/// Full standings snapshot: the input to one matrix computation.
///
/// The two override maps are authoritative when they contain a team:
/// `remaining_override` beats both the supplied `remaining_games`
/// field and the season-derived value, and `rank_override` replaces
/// the win-percentage-derived current rank (official rank can depend
/// on tiebreaker rules outside this engine).
#[derive(Debug, Clone, Default)]
pub struct StandingsSnapshot {
    pub teams: Vec<TeamStanding>,
    pub season: u32,
    pub remaining_override: HashMap<String, u32>,
    pub rank_override: HashMap<String, u32>,
}

impl StandingsSnapshot {
    pub fn new(teams: Vec<TeamStanding>) -> Self {
        Self {
            teams,
            season: DEFAULT_SEASON,
            remaining_override: HashMap::new(),
            rank_override: HashMap::new(),
        }
    }

    pub fn with_season(mut self, season: u32) -> Self {
        self.season = season;
        self
    }

    /// Resolve a team's remaining games: override map > supplied
    /// field > `season - played` (saturating; mid-season schedule
    /// changes can leave the supplied numbers inconsistent and the
    /// override silently wins).
    pub fn remaining_for(&self, standing: &TeamStanding) -> u32 {
        if let Some(&r) = self.remaining_override.get(&standing.team) {
            return r;
        }
        standing
            .remaining_games
            .unwrap_or_else(|| self.season.saturating_sub(standing.played()))
    }

    /// Current rank per team, 1-based. Teams tied on win percentage
    /// (3-decimal comparison, matching the displayed value) share a
    /// rank, competition ranking style: 1, 2, 2, 4.
    ///
    /// Entries in `rank_override` replace the derived rank per team.
    pub fn current_ranks(&self) -> HashMap<String, u32> {
        let mut sorted: Vec<&TeamStanding> = self.teams.iter().collect();
        sorted.sort_by(|a, b| {
            b.win_pct()
                .partial_cmp(&a.win_pct())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut ranks = HashMap::new();
        let mut current_rank = 1u32;
        let mut previous_pct: Option<f64> = None;
        for (idx, standing) in sorted.iter().enumerate() {
            let pct = round3(standing.win_pct());
            if previous_pct.is_some() && previous_pct != Some(pct) {
                current_rank = idx as u32 + 1;
            }
            ranks.insert(standing.team.clone(), current_rank);
            previous_pct = Some(pct);
        }

        for (team, &rank) in &self.rank_override {
            ranks.insert(team.clone(), rank);
        }
        ranks
    }
}

/// Round to 3 decimals, the display precision for win percentages.
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_pct_zero_games() {
        let t = TeamStanding::new("NC", 0, 0);
        assert_eq!(t.win_pct(), 0.0);
        assert_eq!(t.p_max(0), 0.0);
        assert_eq!(t.p_min(0), 0.0);
    }

    #[test]
    fn test_p_max_p_min_with_draws() {
        // 70W 60L 4T, 10 remaining: denominator 144
        let mut t = TeamStanding::new("LG", 70, 60);
        t.draws = 4;
        let p_max = t.p_max(10);
        let p_min = t.p_min(10);
        assert!((p_max - (70.0 + 2.0 + 10.0) / 144.0).abs() < 1e-12);
        assert!((p_min - 72.0 / 144.0).abs() < 1e-12);
        assert!(p_max >= p_min);
    }

    #[test]
    fn test_remaining_resolution_precedence() {
        let mut t = TeamStanding::new("SSG", 50, 50);
        t.remaining_games = Some(40);
        let mut snap = StandingsSnapshot::new(vec![t.clone()]);

        // supplied field beats derived
        assert_eq!(snap.remaining_for(&t), 40);

        // override beats supplied field
        snap.remaining_override.insert("SSG".to_string(), 44);
        assert_eq!(snap.remaining_for(&t), 44);

        // derived fallback saturates instead of underflowing
        let over = TeamStanding::new("KT", 100, 50);
        let short = StandingsSnapshot::new(vec![over.clone()]).with_season(100);
        assert_eq!(short.remaining_for(&over), 0);
    }

    #[test]
    fn test_current_ranks_ties_share_rank() {
        let teams = vec![
            TeamStanding::new("A", 60, 40),
            TeamStanding::new("B", 60, 40),
            TeamStanding::new("C", 50, 50),
        ];
        let snap = StandingsSnapshot::new(teams);
        let ranks = snap.current_ranks();
        assert_eq!(ranks["A"], 1);
        assert_eq!(ranks["B"], 1);
        assert_eq!(ranks["C"], 3);
    }

    #[test]
    fn test_rank_override_wins() {
        let teams = vec![
            TeamStanding::new("A", 60, 40),
            TeamStanding::new("B", 50, 50),
        ];
        let mut snap = StandingsSnapshot::new(teams);
        snap.rank_override.insert("B".to_string(), 1);
        let ranks = snap.current_ranks();
        assert_eq!(ranks["B"], 1);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let row: TeamStanding = serde_json::from_str(r#"{"team":"두산"}"#).unwrap();
        assert_eq!(row.wins, 0);
        assert_eq!(row.losses, 0);
        assert_eq!(row.draws, 0);
        assert_eq!(row.remaining_games, None);
    }
}
