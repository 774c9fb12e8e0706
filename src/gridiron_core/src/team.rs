use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFENSE_INTERCEPT, DEFENSE_PRODUCTION_WEIGHT, DEFENSE_SLOPE, OFFENSE_INTERCEPT, OFFENSE_SLOPE,
    SEASON_GAMES, WINS_INTERCEPT, WINS_SLOPE,
};
use crate::error::{Result, SimError};

/// Season-aggregate offensive statistics, keyed in source data by
/// `GP`, `PTS`, `All`, `Run` and `Pass`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OffenseStats {
    pub games_played: u32,
    pub points_per_game: f64,
    pub total_offense: f64,
    pub rush_attempts: f64,
    pub pass_attempts: f64,
}

impl OffenseStats {
    /// Build from a column-keyed record. Absent columns count as zero.
    pub fn from_record(record: &HashMap<String, f64>) -> Self {
        let get = |key: &str| record.get(key).copied().unwrap_or(0.0);
        OffenseStats {
            games_played: get("GP").max(0.0) as u32,
            points_per_game: get("PTS"),
            total_offense: get("All"),
            rush_attempts: get("Run"),
            pass_attempts: get("Pass"),
        }
    }
}

/// Season-aggregate defensive statistics, keyed in source data by
/// `PA`, `DEF`, `QB`, `RB`, `WR` and `TE`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DefenseStats {
    pub points_allowed_per_game: f64,
    pub total_defense: f64,
    pub qb_allowed: f64,
    pub rb_allowed: f64,
    pub wr_allowed: f64,
    pub te_allowed: f64,
}

impl DefenseStats {
    /// Build from a column-keyed record. Absent columns count as zero.
    pub fn from_record(record: &HashMap<String, f64>) -> Self {
        let get = |key: &str| record.get(key).copied().unwrap_or(0.0);
        DefenseStats {
            points_allowed_per_game: get("PA"),
            total_defense: get("DEF"),
            qb_allowed: get("QB"),
            rb_allowed: get("RB"),
            wr_allowed: get("WR"),
            te_allowed: get("TE"),
        }
    }
}

/// How a team's single-number net production is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetProductionFormula {
    /// `round(total_offense + total_defense * 7.06)`
    #[default]
    Composite,
    /// Earlier rating: point differential plus production differential per
    /// unit of efficiency, rounded to four decimals.
    PointDifferential,
}

/// Outcome of one game from a single team's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Win,
    Loss,
    Tie,
}

/// Win/loss/tie record plus the current run of consecutive wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_streak: u32,
}

impl Record {
    pub fn apply(&mut self, decision: Decision) {
        match decision {
            Decision::Win => {
                self.wins += 1;
                self.win_streak += 1;
            }
            Decision::Loss => {
                self.losses += 1;
                self.win_streak = 0;
            }
            Decision::Tie => {
                self.ties += 1;
                self.win_streak = 0;
            }
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// One team's raw statistics, the ratings derived from them, and its
/// record in the season currently being simulated.
///
/// Ratings are computed once at construction. Only `record` changes
/// afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub name: String,

    pub games_played: u32,
    pub points_per_game: f64,
    pub total_offense: f64,
    /// Rushing plus passing attempts per game
    pub plays_per_game: f64,
    /// Offensive production per play
    pub team_efficiency: f64,

    pub points_allowed_per_game: f64,
    pub total_defense: f64,
    /// Production allowed to opposing QB, RB, WR and TE combined
    pub offensive_production_allowed: f64,

    /// Regression estimate of points scored per game
    pub expected_offense: f64,
    /// Regression estimate of points allowed per game
    pub expected_defense: f64,
    pub net_rating: f64,
    pub expected_wins: f64,
    pub expected_losses: f64,

    pub record: Record,
}

impl TeamProfile {
    /// Create a team from its raw statistics.
    ///
    /// Fails with [`SimError::ZeroPlays`] when the team has no rushing or
    /// passing attempts, since efficiency would be undefined.
    pub fn new(
        name: impl Into<String>,
        offense: &OffenseStats,
        defense: &DefenseStats,
    ) -> Result<Self> {
        let name = name.into();
        let plays_per_game = offense.rush_attempts + offense.pass_attempts;
        if plays_per_game == 0.0 {
            return Err(SimError::ZeroPlays { team: name });
        }

        let expected_offense = OFFENSE_SLOPE * offense.total_offense + OFFENSE_INTERCEPT;
        let expected_defense = DEFENSE_SLOPE * defense.total_defense + DEFENSE_INTERCEPT;
        let net_rating = expected_offense - expected_defense;
        let expected_wins = WINS_SLOPE * net_rating + WINS_INTERCEPT;

        Ok(TeamProfile {
            name,
            games_played: offense.games_played,
            points_per_game: offense.points_per_game,
            total_offense: offense.total_offense,
            plays_per_game,
            team_efficiency: offense.total_offense / plays_per_game,
            points_allowed_per_game: defense.points_allowed_per_game,
            total_defense: defense.total_defense,
            offensive_production_allowed: defense.qb_allowed
                + defense.rb_allowed
                + defense.wr_allowed
                + defense.te_allowed,
            expected_offense,
            expected_defense,
            net_rating,
            expected_wins,
            expected_losses: SEASON_GAMES - expected_wins,
            record: Record::default(),
        })
    }

    /// Create a team from column-keyed offense and defense records.
    pub fn from_stat_maps(
        name: impl Into<String>,
        offense: &HashMap<String, f64>,
        defense: &HashMap<String, f64>,
    ) -> Result<Self> {
        Self::new(name, &OffenseStats::from_record(offense), &DefenseStats::from_record(defense))
    }

    /// Composite net production used by the match resolver.
    pub fn net_production(&self) -> f64 {
        (self.total_offense + self.total_defense * DEFENSE_PRODUCTION_WEIGHT).round_ties_even()
    }

    /// Net production under `formula`.
    ///
    /// The point-differential formula divides by efficiency and fails with
    /// [`SimError::ZeroEfficiency`] for a team with no offensive production.
    pub fn net_production_with(&self, formula: NetProductionFormula) -> Result<f64> {
        match formula {
            NetProductionFormula::Composite => Ok(self.net_production()),
            NetProductionFormula::PointDifferential => {
                if self.team_efficiency == 0.0 {
                    return Err(SimError::ZeroEfficiency { team: self.name.clone() });
                }
                let raw = (self.points_per_game - self.points_allowed_per_game)
                    + (self.total_offense - self.total_defense) / self.team_efficiency;
                Ok((raw * 10_000.0).round_ties_even() / 10_000.0)
            }
        }
    }

    /// Points per game scaled by efficiency. Reporting only.
    pub fn expected_points_for(&self) -> f64 {
        self.points_per_game * self.team_efficiency
    }

    pub fn update_record(&mut self, decision: Decision) {
        self.record.apply(decision);
    }

    pub fn reset_record(&mut self) {
        self.record = Record::default();
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round_ties_even() / scale
}

impl fmt::Display for TeamProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Team: {}, Games Played: {}", self.name, self.games_played)?;
        writeln!(
            f,
            "Offense - Points Per Game: {}, Total Offensive Production: {}, \
             Plays Per Game: {}, Team Efficiency: {}",
            self.points_per_game,
            self.total_offense,
            self.plays_per_game,
            round_to(self.team_efficiency, 3)
        )?;
        writeln!(
            f,
            "Defense - Points Allowed Per Game: {}, Total Defensive Production: {}, \
             Offensive Production Allowed to Opponents: {}",
            self.points_allowed_per_game,
            self.total_defense,
            round_to(self.offensive_production_allowed, 2)
        )?;
        writeln!(f, "Offense - Expected Points Per Game: {}", round_to(self.expected_offense, 2))?;
        writeln!(
            f,
            "Defense - Expected Points Allowed Per Game: {}",
            round_to(self.expected_defense, 2)
        )?;
        write!(
            f,
            "Net Production: {}, Expected Net Rating: {}",
            self.net_production(),
            round_to(self.net_rating, 2)
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stats(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    pub(crate) fn miami() -> TeamProfile {
        let offense =
            stats(&[("GP", 17.0), ("PTS", 29.2), ("All", 81.1), ("Run", 26.8), ("Pass", 35.1)]);
        let defense = stats(&[
            ("PA", 23.0),
            ("DEF", 9.2),
            ("QB", 18.1),
            ("RB", 17.3),
            ("WR", 29.0),
            ("TE", 10.6),
        ]);
        TeamProfile::from_stat_maps("Miami Dolphins", &offense, &defense).unwrap()
    }

    pub(crate) fn new_england() -> TeamProfile {
        let offense =
            stats(&[("GP", 17.0), ("PTS", 13.9), ("All", 24.3), ("Run", 24.4), ("Pass", 35.6)]);
        let defense = stats(&[
            ("PA", 21.5),
            ("DEF", 6.4),
            ("QB", 15.2),
            ("RB", 18.4),
            ("WR", 26.4),
            ("TE", 7.1),
        ]);
        TeamProfile::from_stat_maps("New England Patriots", &offense, &defense).unwrap()
    }

    #[test]
    fn test_init_reads_raw_stats() {
        let team = miami();
        assert_eq!(team.name, "Miami Dolphins");
        assert_eq!(team.games_played, 17);
        assert_eq!(team.team_efficiency, 81.1 / (26.8 + 35.1));
        assert_eq!(team.points_allowed_per_game, 23.0);
        assert_eq!(team.offensive_production_allowed, 18.1 + 17.3 + 29.0 + 10.6);
        assert_eq!(team.record, Record::default());
    }

    #[test]
    fn test_expected_wins() {
        let team = miami();
        let x_off = 0.19 * 81.1 + 12.0;
        let x_def = -1.24 * 9.2 + 30.8;
        let x_wins = 0.418 * (x_off - x_def) + 8.5;

        assert_eq!(team.expected_offense, x_off);
        assert_eq!(team.expected_defense, x_def);
        assert_eq!(team.expected_wins, x_wins);
        assert_eq!(team.expected_losses, 17.0 - x_wins);
    }

    #[test]
    fn test_expected_points_for() {
        let team = miami();
        assert!((team.expected_points_for() - 29.2 * team.team_efficiency).abs() < 1e-12);
    }

    #[test]
    fn test_net_production() {
        // 81.1 + 9.2 * 7.06 = 146.052
        assert_eq!(miami().net_production(), 146.0);
        // 24.3 + 6.4 * 7.06 = 69.484
        assert_eq!(new_england().net_production(), 69.0);
    }

    #[test]
    fn test_net_production_rounds_half_to_even() {
        let offense = OffenseStats {
            total_offense: 72.5,
            rush_attempts: 25.0,
            pass_attempts: 35.0,
            ..Default::default()
        };
        let team = TeamProfile::new("Half", &offense, &DefenseStats::default()).unwrap();
        assert_eq!(team.net_production(), 72.0);

        let offense = OffenseStats { total_offense: 73.5, ..offense };
        let team = TeamProfile::new("Half", &offense, &DefenseStats::default()).unwrap();
        assert_eq!(team.net_production(), 74.0);
    }

    #[test]
    fn test_point_differential_formula() {
        let team = miami();
        let raw = (29.2 - 23.0) + (81.1 - 9.2) / team.team_efficiency;
        let expected = (raw * 10_000.0).round_ties_even() / 10_000.0;
        let legacy = team.net_production_with(NetProductionFormula::PointDifferential);
        assert_eq!(legacy.unwrap(), expected);
        let composite = team.net_production_with(NetProductionFormula::Composite);
        assert_eq!(composite.unwrap(), team.net_production());
    }

    #[test]
    fn test_point_differential_needs_offense() {
        let offense =
            OffenseStats { rush_attempts: 30.0, pass_attempts: 30.0, ..Default::default() };
        let team = TeamProfile::new("Scoreless", &offense, &DefenseStats::default()).unwrap();
        assert_eq!(team.team_efficiency, 0.0);

        let err = team.net_production_with(NetProductionFormula::PointDifferential).unwrap_err();
        assert!(matches!(err, SimError::ZeroEfficiency { ref team } if team == "Scoreless"));
        assert_eq!(team.net_production_with(NetProductionFormula::Composite).unwrap(), 0.0);
    }

    #[test]
    fn test_display_rounds_half_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.5, 0), 2.0);
    }

    #[test]
    fn test_missing_columns_default_to_zero() {
        let offense = stats(&[("All", 50.0), ("Run", 20.0), ("Pass", 30.0)]);
        let team = TeamProfile::from_stat_maps("Sparse", &offense, &HashMap::new()).unwrap();

        assert_eq!(team.games_played, 0);
        assert_eq!(team.points_per_game, 0.0);
        assert_eq!(team.total_defense, 0.0);
        assert_eq!(team.offensive_production_allowed, 0.0);
        assert_eq!(team.team_efficiency, 1.0);
    }

    #[test]
    fn test_zero_plays_rejected() {
        let offense = stats(&[("All", 50.0)]);
        let err = TeamProfile::from_stat_maps("Idle", &offense, &HashMap::new()).unwrap_err();
        assert!(matches!(err, SimError::ZeroPlays { ref team } if team == "Idle"));
    }

    #[test]
    fn test_update_record() {
        let mut team = miami();

        team.update_record(Decision::Win);
        assert_eq!(team.record.wins, 1);
        assert_eq!(team.record.win_streak, 1);

        team.update_record(Decision::Loss);
        assert_eq!(team.record.losses, 1);
        assert_eq!(team.record.win_streak, 0);

        team.update_record(Decision::Win);
        team.update_record(Decision::Win);
        assert_eq!(team.record.win_streak, 2);

        team.update_record(Decision::Tie);
        assert_eq!(team.record.ties, 1);
        assert_eq!(team.record.win_streak, 0);
    }

    #[test]
    fn test_reset_record() {
        let mut team = miami();
        for i in 0..17 {
            team.update_record(if i % 2 == 0 { Decision::Win } else { Decision::Loss });
        }
        assert_eq!(team.record.wins, 9);
        assert_eq!(team.record.losses, 8);

        team.reset_record();
        assert_eq!(team.record, Record::default());
    }

    #[test]
    fn test_display() {
        let text = miami().to_string();
        assert!(text.starts_with("Team: Miami Dolphins, Games Played: 17\n"));
        assert!(text.contains("Team Efficiency: 1.31"));
        assert!(text.ends_with("Net Production: 146, Expected Net Rating: 8.02"));
    }

    fn decision() -> impl Strategy<Value = Decision> {
        prop_oneof![Just(Decision::Win), Just(Decision::Loss), Just(Decision::Tie)]
    }

    proptest! {
        #[test]
        fn prop_efficiency_is_offense_per_play(
            all in 0.0f64..500.0,
            run in 0.1f64..60.0,
            pass in 0.0f64..60.0,
        ) {
            let offense = OffenseStats {
                total_offense: all,
                rush_attempts: run,
                pass_attempts: pass,
                ..Default::default()
            };
            let team = TeamProfile::new("T", &offense, &DefenseStats::default()).unwrap();
            prop_assert_eq!(team.team_efficiency, all / (run + pass));
        }

        #[test]
        fn prop_identical_stats_identical_net_production(
            all in 0.0f64..500.0,
            def in -20.0f64..40.0,
        ) {
            let offense = OffenseStats {
                total_offense: all,
                rush_attempts: 30.0,
                pass_attempts: 30.0,
                ..Default::default()
            };
            let defense = DefenseStats { total_defense: def, ..Default::default() };
            let a = TeamProfile::new("A", &offense, &defense).unwrap();
            let b = TeamProfile::new("B", &offense, &defense).unwrap();
            prop_assert_eq!(a.net_production(), b.net_production());
            prop_assert_eq!(a.net_production().fract(), 0.0);
        }

        #[test]
        fn prop_streak_follows_decisions(
            decisions in proptest::collection::vec(decision(), 0..40),
        ) {
            let mut record = Record::default();
            for d in &decisions {
                let before = record.win_streak;
                record.apply(*d);
                if *d == Decision::Win {
                    prop_assert_eq!(record.win_streak, before + 1);
                } else {
                    prop_assert_eq!(record.win_streak, 0);
                }
            }
            prop_assert_eq!(record.games() as usize, decisions.len());
        }

        #[test]
        fn prop_reset_clears_everything(decisions in proptest::collection::vec(decision(), 0..40)) {
            let mut team = miami();
            for d in decisions {
                team.update_record(d);
            }
            team.reset_record();
            prop_assert_eq!(team.record, Record::default());
        }
    }
}
