use std::fmt;

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::league::League;
use crate::matchup::{GameOutcome, MatchResolver, Outcome};
use crate::team::{NetProductionFormula, Record, TeamProfile};

/// One scheduled game. `Team1` is the visiting side and `Team2` hosts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledGame {
    #[serde(rename = "Week")]
    pub week: u32,
    #[serde(rename = "Team1")]
    pub away: String,
    #[serde(rename = "Team2")]
    pub home: String,
}

impl ScheduledGame {
    pub fn new(week: u32, away: impl Into<String>, home: impl Into<String>) -> Self {
        ScheduledGame { week, away: away.into(), home: home.into() }
    }
}

/// A resolved game and the week it was played in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub week: u32,
    pub outcome: GameOutcome,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.outcome.winner(), self.outcome.loser()) {
            (Some(winner), Some(loser)) => {
                write!(f, "Week {}: {} defeat {}.", self.week, winner, loser)
            }
            _ => {
                let (away, home) = (&self.outcome.away, &self.outcome.home);
                write!(f, "Week {}: {} ties with {}.", self.week, away, home)
            }
        }
    }
}

fn lookup<'a>(league: &'a League, week: u32, name: &str) -> Result<&'a TeamProfile> {
    league.get(name).ok_or_else(|| SimError::UnknownTeam { week, team: name.to_string() })
}

/// Check every game names two distinct teams of the league.
pub fn validate_schedule(schedule: &[ScheduledGame], league: &League) -> Result<()> {
    for game in schedule {
        lookup(league, game.week, &game.away)?;
        lookup(league, game.week, &game.home)?;
        if game.away == game.home {
            return Err(SimError::SelfMatchup { week: game.week, team: game.home.clone() });
        }
    }
    Ok(())
}

/// Check every scheduled team can be rated under `formula`.
fn validate_ratings(
    schedule: &[ScheduledGame],
    league: &League,
    formula: NetProductionFormula,
) -> Result<()> {
    for game in schedule {
        for name in [&game.away, &game.home] {
            lookup(league, game.week, name)?.net_production_with(formula)?;
        }
    }
    Ok(())
}

/// Play `schedule` in order, updating records as games are decided.
///
/// Records are not reset first. The schedule and the scheduled teams'
/// ratings are validated up front, so a bad entry leaves the league
/// untouched.
pub fn simulate_season<R: Rng + ?Sized>(
    schedule: &[ScheduledGame],
    league: &mut League,
    resolver: &MatchResolver,
    rng: &mut R,
) -> Result<Vec<GameResult>> {
    validate_schedule(schedule, league)?;
    validate_ratings(schedule, league, resolver.config.net_production)?;

    let mut results = Vec::with_capacity(schedule.len());
    for game in schedule {
        let home = lookup(league, game.week, &game.home)?;
        let away = lookup(league, game.week, &game.away)?;
        let outcome = resolver.resolve(home, away, rng)?;

        let (home_decision, away_decision) = outcome.decisions();
        if let Some(team) = league.get_mut(&game.home) {
            team.update_record(home_decision);
        }
        if let Some(team) = league.get_mut(&game.away) {
            team.update_record(away_decision);
        }

        results.push(GameResult { week: game.week, outcome });
    }

    let ties = results.iter().filter(|r| r.outcome.outcome == Outcome::Tie).count();
    info!("simulated {} games ({} ties)", results.len(), ties);

    Ok(results)
}

/// Zero every team's record so the schedule can be replayed.
pub fn reset_all_teams(league: &mut League) {
    league.reset_all();
}

/// Final records of one replayed season, in league order.
pub type SeasonRecords = Vec<(String, Record)>;

fn rng_from_seed(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// A league, its schedule and the scoring rules used to play it.
#[derive(Clone, Debug)]
pub struct SeasonState {
    pub schedule: Vec<ScheduledGame>,
    pub league: League,
    pub resolver: MatchResolver,
}

impl SeasonState {
    pub fn new(schedule: Vec<ScheduledGame>, league: League, resolver: MatchResolver) -> Self {
        SeasonState { schedule, league, resolver }
    }

    /// Reset all records, then play the schedule once.
    ///
    /// The same seed always produces the same season.
    pub fn simulate(&mut self, seed: Option<u64>) -> Result<Vec<GameResult>> {
        let mut rng = rng_from_seed(seed);
        self.simulate_with_rng(&mut rng)
    }

    pub fn simulate_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<GameResult>> {
        validate_schedule(&self.schedule, &self.league)?;
        self.league.reset_all();
        simulate_season(&self.schedule, &mut self.league, &self.resolver, rng)
    }

    pub fn reset(&mut self) {
        self.league.reset_all();
    }

    /// Replay the season `n_simulations` times from a clean slate.
    ///
    /// Each replay runs on its own copy of the league with a seed drawn from
    /// `seed`, so the batch is reproducible and `self.league` is unchanged.
    pub fn run_simulations(
        &self,
        n_simulations: usize,
        seed: Option<u64>,
    ) -> Result<Vec<SeasonRecords>> {
        if n_simulations == 0 {
            return Err(SimError::NoSimulations);
        }
        validate_schedule(&self.schedule, &self.league)?;

        let mut rng = rng_from_seed(seed);
        let seeds: Vec<u64> = (0..n_simulations).map(|_| rng.gen::<u64>()).collect();

        let replays = seeds
            .into_par_iter()
            .map(|sim_seed| -> Result<SeasonRecords> {
                let mut league = self.league.clone();
                league.reset_all();
                let mut sim_rng = ChaCha8Rng::seed_from_u64(sim_seed);
                simulate_season(&self.schedule, &mut league, &self.resolver, &mut sim_rng)?;
                Ok(league.iter().map(|t| (t.name.clone(), t.record)).collect())
            })
            .collect::<Result<Vec<SeasonRecords>>>()?;

        info!("replayed season {} times", replays.len());
        Ok(replays)
    }
}
