use std::collections::HashMap;
use std::fmt;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::team::{NetProductionFormula, TeamProfile};

/// Game-day weather at the home venue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Clear,
    Rain,
    Snow,
    Wind,
}

impl Weather {
    /// All conditions, in the order distribution weights are given.
    pub const ALL: [Weather; 4] = [Weather::Clear, Weather::Rain, Weather::Snow, Weather::Wind];

    /// `(efficiency, net_production)` multipliers for this condition.
    pub fn multipliers(self) -> (f64, f64) {
        match self {
            Weather::Clear => (1.0, 1.0),
            // passing suffers, the run game benefits
            Weather::Rain => (0.9, 1.1),
            Weather::Snow => (0.8, 1.2),
            Weather::Wind => (0.85, 1.15),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Rain => "Rain",
            Weather::Snow => "Snow",
            Weather::Wind => "Wind",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weather-adjusted `(efficiency, net_production)` for a team.
pub fn apply_weather(weather: Weather, team: &TeamProfile) -> (f64, f64) {
    let (efficiency, net) = weather.multipliers();
    (team.team_efficiency * efficiency, team.net_production() * net)
}

/// As [`apply_weather`], with net production from `formula`.
pub fn apply_weather_with(
    weather: Weather,
    team: &TeamProfile,
    formula: NetProductionFormula,
) -> Result<(f64, f64)> {
    let (efficiency, net) = weather.multipliers();
    Ok((team.team_efficiency * efficiency, team.net_production_with(formula)? * net))
}

/// Categorical distribution over [`Weather::ALL`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeatherDistribution {
    weights: [f64; 4],
}

impl WeatherDistribution {
    pub const CLEAR: WeatherDistribution = WeatherDistribution { weights: [1.0, 0.0, 0.0, 0.0] };

    /// Validate `[clear, rain, snow, wind]` probabilities.
    pub fn new(venue: &str, weights: [f64; 4]) -> Result<Self> {
        let invalid =
            |reason: String| SimError::InvalidDistribution { venue: venue.to_string(), reason };

        if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(invalid(format!("probability {} is not a finite non-negative number", w)));
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(invalid(format!("probabilities sum to {}, expected 1", total)));
        }
        Ok(WeatherDistribution { weights })
    }

    pub fn probability(&self, weather: Weather) -> f64 {
        self.weights[weather as usize]
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Weather {
        match WeightedIndex::new(&self.weights) {
            Ok(index) => Weather::ALL[index.sample(rng)],
            Err(_) => Weather::Clear,
        }
    }
}

/// Per-venue weather probabilities for the built-in league, as
/// `[clear, rain, snow, wind]`. Enclosed stadiums are always clear.
const NFL_VENUES: [(&str, [f64; 4]); 32] = [
    ("Arizona Cardinals", [1.0, 0.0, 0.0, 0.0]),
    ("Atlanta Falcons", [1.0, 0.0, 0.0, 0.0]),
    ("Baltimore Ravens", [0.7, 0.2, 0.05, 0.05]),
    ("Buffalo Bills", [0.5, 0.2, 0.2, 0.1]),
    ("Carolina Panthers", [0.75, 0.2, 0.05, 0.0]),
    ("Chicago Bears", [0.6, 0.2, 0.15, 0.05]),
    ("Cincinnati Bengals", [0.65, 0.25, 0.05, 0.05]),
    ("Cleveland Browns", [0.55, 0.25, 0.15, 0.05]),
    ("Dallas Cowboys", [1.0, 0.0, 0.0, 0.0]),
    ("Denver Broncos", [0.8, 0.1, 0.05, 0.05]),
    ("Detroit Lions", [1.0, 0.0, 0.0, 0.0]),
    ("Green Bay Packers", [0.5, 0.1, 0.35, 0.05]),
    ("Houston Texans", [1.0, 0.0, 0.0, 0.0]),
    ("Indianapolis Colts", [1.0, 0.0, 0.0, 0.0]),
    ("Jacksonville Jaguars", [0.8, 0.2, 0.0, 0.0]),
    ("Kansas City Chiefs", [0.7, 0.2, 0.05, 0.05]),
    ("Las Vegas Raiders", [1.0, 0.0, 0.0, 0.0]),
    ("Los Angeles Chargers", [1.0, 0.0, 0.0, 0.0]),
    ("Los Angeles Rams", [1.0, 0.0, 0.0, 0.0]),
    ("Miami Dolphins", [0.75, 0.25, 0.0, 0.0]),
    ("Minnesota Vikings", [1.0, 0.0, 0.0, 0.0]),
    ("New England Patriots", [0.65, 0.2, 0.1, 0.05]),
    ("New Orleans Saints", [1.0, 0.0, 0.0, 0.0]),
    ("New York Giants", [0.65, 0.2, 0.1, 0.05]),
    ("New York Jets", [0.65, 0.2, 0.1, 0.05]),
    ("Philadelphia Eagles", [0.7, 0.2, 0.05, 0.05]),
    ("Pittsburgh Steelers", [0.6, 0.2, 0.15, 0.05]),
    ("San Francisco 49ers", [0.85, 0.15, 0.0, 0.0]),
    ("Seattle Seahawks", [0.6, 0.3, 0.05, 0.05]),
    ("Tampa Bay Buccaneers", [0.8, 0.2, 0.0, 0.0]),
    ("Tennessee Titans", [0.75, 0.2, 0.05, 0.0]),
    ("Washington Commanders", [0.7, 0.2, 0.05, 0.05]),
];

/// Weather distributions keyed by home team. Venues without an entry are
/// always clear.
#[derive(Clone, Debug, Default)]
pub struct WeatherTable {
    venues: HashMap<String, WeatherDistribution>,
}

impl WeatherTable {
    /// An empty table: every venue is clear.
    pub fn new() -> Self {
        WeatherTable { venues: HashMap::new() }
    }

    /// The built-in 32-venue table.
    pub fn nfl() -> Self {
        let venues = NFL_VENUES
            .iter()
            .map(|(venue, weights)| (venue.to_string(), WeatherDistribution { weights: *weights }))
            .collect();
        WeatherTable { venues }
    }

    /// Add or replace a venue's distribution.
    pub fn set_venue(&mut self, venue: &str, weights: [f64; 4]) -> Result<()> {
        let distribution = WeatherDistribution::new(venue, weights)?;
        self.venues.insert(venue.to_string(), distribution);
        Ok(())
    }

    pub fn with_venue(mut self, venue: &str, weights: [f64; 4]) -> Result<Self> {
        self.set_venue(venue, weights)?;
        Ok(self)
    }

    pub fn distribution(&self, venue: &str) -> WeatherDistribution {
        self.venues.get(venue).copied().unwrap_or(WeatherDistribution::CLEAR)
    }

    /// Draw game-day weather for a game hosted by `home_team`.
    pub fn draw<R: Rng + ?Sized>(&self, home_team: &str, rng: &mut R) -> Weather {
        self.distribution(home_team).sample(rng)
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}
