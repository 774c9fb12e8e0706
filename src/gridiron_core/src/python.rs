//! Python bindings, built with the `python` feature.

use std::collections::HashMap;

use pyo3::exceptions::{PyIOError, PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::error::SimError;
use crate::league::League;
use crate::loader;
use crate::matchup::{MatchResolver, ScoringConfig};
use crate::season::{ScheduledGame, SeasonState};
use crate::standings::{conference_standings, expected_standings, summarize_replays, StandingRow};
use crate::team::{NetProductionFormula, TeamProfile};
use crate::weather::WeatherTable;

impl From<SimError> for PyErr {
    fn from(err: SimError) -> PyErr {
        match err {
            SimError::UnknownTeam { .. } | SimError::MissingDefense { .. } => {
                PyKeyError::new_err(err.to_string())
            }
            SimError::Io(_) => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

type StatMap = HashMap<String, f64>;
type Row = (String, u32, u32, u32);

fn rows(table: &[StandingRow]) -> Vec<Row> {
    table.iter().map(|r| (r.name.clone(), r.wins, r.losses, r.ties)).collect()
}

fn scoring(
    weather: bool,
    home_field: bool,
    momentum: bool,
    legacy_net_production: bool,
) -> ScoringConfig {
    ScoringConfig {
        weather,
        home_field,
        momentum,
        net_production: if legacy_net_production {
            NetProductionFormula::PointDifferential
        } else {
            NetProductionFormula::Composite
        },
    }
}

/// A league and schedule ready to simulate.
#[pyclass(name = "Season")]
pub struct PySeason {
    state: SeasonState,
}

#[pymethods]
impl PySeason {
    /// `teams` maps each team name to its stats keyed by column (`GP`,
    /// `PTS`, `All`, `Run`, `Pass`, `PA`, `DEF`, `QB`, `RB`, `WR`, `TE`);
    /// `schedule` is a list of `(week, away, home)`. League order follows
    /// the dict's order.
    #[new]
    #[pyo3(signature = (
        teams,
        schedule,
        weather = true,
        home_field = true,
        momentum = true,
        legacy_net_production = false
    ))]
    fn new(
        teams: &Bound<'_, PyDict>,
        schedule: Vec<(u32, String, String)>,
        weather: bool,
        home_field: bool,
        momentum: bool,
        legacy_net_production: bool,
    ) -> PyResult<Self> {
        let mut league = League::new();
        for (name, stats) in teams.iter() {
            let name: String = name.extract()?;
            let stats: StatMap = stats.extract()?;
            league.insert(TeamProfile::from_stat_maps(name, &stats, &stats)?)?;
        }
        let schedule = schedule
            .into_iter()
            .map(|(week, away, home)| ScheduledGame::new(week, away, home))
            .collect();
        let config = scoring(weather, home_field, momentum, legacy_net_production);

        let resolver = MatchResolver::new(config, WeatherTable::nfl());
        Ok(PySeason { state: SeasonState::new(schedule, league, resolver) })
    }

    #[staticmethod]
    #[pyo3(signature = (
        offense_file,
        defense_file,
        schedule_file,
        weather = true,
        home_field = true,
        momentum = true,
        legacy_net_production = false
    ))]
    fn from_csv(
        offense_file: &str,
        defense_file: &str,
        schedule_file: &str,
        weather: bool,
        home_field: bool,
        momentum: bool,
        legacy_net_production: bool,
    ) -> PyResult<Self> {
        let league = loader::load_teams(offense_file, defense_file)?;
        let schedule = loader::load_schedule(schedule_file)?;
        let config = scoring(weather, home_field, momentum, legacy_net_production);

        let resolver = MatchResolver::new(config, WeatherTable::nfl());
        Ok(PySeason { state: SeasonState::new(schedule, league, resolver) })
    }

    /// Reset records and play the schedule. Returns one line per game.
    #[pyo3(signature = (seed = None))]
    fn simulate(&mut self, seed: Option<u64>) -> PyResult<Vec<String>> {
        let results = self.state.simulate(seed)?;
        Ok(results.iter().map(|r| r.to_string()).collect())
    }

    fn reset(&mut self) {
        self.state.reset();
    }

    /// `(name, wins, losses, ties, win_streak)` in league order.
    fn records(&self) -> Vec<(String, u32, u32, u32, u32)> {
        self.state
            .league
            .iter()
            .map(|t| {
                let r = t.record;
                (t.name.clone(), r.wins, r.losses, r.ties, r.win_streak)
            })
            .collect()
    }

    /// `(afc_rows, nfc_rows, unassigned_names)`
    fn conference_standings(&self) -> (Vec<Row>, Vec<Row>, Vec<String>) {
        let standings = conference_standings(&self.state.league);
        (rows(&standings.afc), rows(&standings.nfc), standings.unassigned)
    }

    fn expected_standings(&self) -> Vec<(String, f64, f64)> {
        expected_standings(&self.state.league)
            .into_iter()
            .map(|r| (r.name, r.expected_wins, r.expected_losses))
            .collect()
    }

    /// `(name, mean_wins, std_dev_wins, mean_losses, mean_ties, expected_wins)`
    #[pyo3(signature = (n_simulations, seed = None))]
    fn run_simulations(
        &self,
        n_simulations: usize,
        seed: Option<u64>,
    ) -> PyResult<Vec<(String, f64, f64, f64, f64, f64)>> {
        let replays = self.state.run_simulations(n_simulations, seed)?;
        Ok(summarize_replays(&self.state.league, &replays)
            .into_iter()
            .map(|s| {
                (s.name, s.mean_wins, s.std_dev_wins, s.mean_losses, s.mean_ties, s.expected_wins)
            })
            .collect())
    }

    fn team_stats(&self, name: &str) -> PyResult<String> {
        self.state
            .league
            .get(name)
            .map(|t| t.to_string())
            .ok_or_else(|| PyKeyError::new_err(name.to_string()))
    }

    fn __repr__(&self) -> String {
        let (teams, games) = (self.state.league.len(), self.state.schedule.len());
        format!("Season({} teams, {} games)", teams, games)
    }
}

/// Composite net production for one team's stats.
#[pyfunction]
fn net_production(offense: StatMap, defense: StatMap) -> PyResult<f64> {
    Ok(TeamProfile::from_stat_maps("", &offense, &defense)?.net_production())
}

#[pymodule]
fn gridiron_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySeason>()?;
    m.add_function(wrap_pyfunction!(net_production, m)?)?;

    m.add("HOME_FIELD_MULTIPLIER", crate::constants::HOME_FIELD_MULTIPLIER)?;
    m.add("MOMENTUM_PER_WIN", crate::constants::MOMENTUM_PER_WIN)?;

    Ok(())
}
