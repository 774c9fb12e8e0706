use std::fmt;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{HOME_FIELD_MULTIPLIER, MOMENTUM_PER_WIN};
use crate::error::Result;
use crate::team::{Decision, NetProductionFormula, TeamProfile};
use crate::weather::{apply_weather_with, Weather, WeatherTable};

/// Which scoring adjustments are active.
///
/// Every earlier variant of the scoring model is one combination of these
/// switches; the default enables all of them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weather: bool,
    pub home_field: bool,
    pub momentum: bool,
    pub net_production: NetProductionFormula,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            weather: true,
            home_field: true,
            momentum: true,
            net_production: NetProductionFormula::Composite,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Tie,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::HomeWin => "home_win",
            Outcome::AwayWin => "away_win",
            Outcome::Tie => "tie",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one resolved game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub home: String,
    pub away: String,
    pub outcome: Outcome,
    pub home_score: f64,
    pub away_score: f64,
    /// `None` when weather was not part of scoring
    pub weather: Option<Weather>,
}

impl GameOutcome {
    pub fn winner(&self) -> Option<&str> {
        match self.outcome {
            Outcome::HomeWin => Some(&self.home),
            Outcome::AwayWin => Some(&self.away),
            Outcome::Tie => None,
        }
    }

    pub fn loser(&self) -> Option<&str> {
        match self.outcome {
            Outcome::HomeWin => Some(&self.away),
            Outcome::AwayWin => Some(&self.home),
            Outcome::Tie => None,
        }
    }

    /// `(home, away)` record updates implied by this outcome.
    pub fn decisions(&self) -> (Decision, Decision) {
        match self.outcome {
            Outcome::HomeWin => (Decision::Win, Decision::Loss),
            Outcome::AwayWin => (Decision::Loss, Decision::Win),
            Outcome::Tie => (Decision::Tie, Decision::Tie),
        }
    }
}

/// Score one side of a matchup.
///
/// `efficiency + (net_production - opponent's production allowed)`, with
/// weather applied to the team's own efficiency and net production, then
/// scaled by home field and by the team's win streak going into the game.
pub fn calculate_score(
    team: &TeamProfile,
    opponent: &TeamProfile,
    is_home: bool,
    weather: Option<Weather>,
    config: &ScoringConfig,
) -> Result<f64> {
    let (efficiency, net) = match weather {
        Some(w) => apply_weather_with(w, team, config.net_production)?,
        None => (team.team_efficiency, team.net_production_with(config.net_production)?),
    };

    let mut score = efficiency + (net - opponent.offensive_production_allowed);
    if is_home && config.home_field {
        score *= HOME_FIELD_MULTIPLIER;
    }
    if config.momentum {
        score *= 1.0 + MOMENTUM_PER_WIN * team.record.win_streak as f64;
    }
    Ok(score)
}

/// Returns `(home_score, away_score)`.
pub fn calculate_scores(
    home: &TeamProfile,
    away: &TeamProfile,
    weather: Option<Weather>,
    config: &ScoringConfig,
) -> Result<(f64, f64)> {
    Ok((
        calculate_score(home, away, true, weather, config)?,
        calculate_score(away, home, false, weather, config)?,
    ))
}

/// Resolve a game under a known weather condition. Deterministic.
///
/// Scores are compared exactly; equal scores are a tie.
pub fn resolve_with_weather(
    home: &TeamProfile,
    away: &TeamProfile,
    weather: Option<Weather>,
    config: &ScoringConfig,
) -> Result<GameOutcome> {
    let (home_score, away_score) = calculate_scores(home, away, weather, config)?;

    let outcome = if home_score > away_score {
        Outcome::HomeWin
    } else if away_score > home_score {
        Outcome::AwayWin
    } else {
        Outcome::Tie
    };

    Ok(GameOutcome {
        home: home.name.clone(),
        away: away.name.clone(),
        outcome,
        home_score,
        away_score,
        weather,
    })
}

/// Scoring rules plus the venue weather they draw from.
#[derive(Clone, Debug)]
pub struct MatchResolver {
    pub config: ScoringConfig,
    pub weather: WeatherTable,
}

impl Default for MatchResolver {
    fn default() -> Self {
        MatchResolver::new(ScoringConfig::default(), WeatherTable::nfl())
    }
}

impl MatchResolver {
    pub fn new(config: ScoringConfig, weather: WeatherTable) -> Self {
        MatchResolver { config, weather }
    }

    /// Resolve a game, drawing weather from the home venue when enabled.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        home: &TeamProfile,
        away: &TeamProfile,
        rng: &mut R,
    ) -> Result<GameOutcome> {
        let weather = self.config.weather.then(|| self.weather.draw(&home.name, rng));
        let result = resolve_with_weather(home, away, weather, &self.config)?;

        debug!(
            "{} {:.3} @ {} {:.3} ({}) -> {}",
            result.away,
            result.away_score,
            result.home,
            result.home_score,
            weather.map_or("no weather", Weather::as_str),
            result.outcome
        );

        Ok(result)
    }
}
