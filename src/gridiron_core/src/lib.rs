//! Gridiron Core - season simulation for a football league.
//!
//! Teams are rated from season-aggregate offense and defense statistics.
//! Those ratings resolve each scheduled game, with home field, win-streak
//! momentum and venue weather as adjustments, and the resulting records feed
//! conference standings. Python bindings are available with the `python`
//! feature.

pub mod constants;
pub mod error;
pub mod league;
pub mod loader;
pub mod matchup;
pub mod season;
pub mod standings;
pub mod team;
pub mod weather;

#[cfg(feature = "python")]
mod python;

pub use error::{Result, SimError};
pub use league::League;
pub use matchup::{
    calculate_scores, resolve_with_weather, GameOutcome, MatchResolver, Outcome, ScoringConfig,
};
pub use season::{
    reset_all_teams, simulate_season, GameResult, ScheduledGame, SeasonRecords, SeasonState,
};
pub use standings::{
    conference_standings, expected_standings, summarize_replays, Conference, ConferenceStandings,
    ExpectedRow, ReplaySummary, StandingRow,
};
pub use team::{Decision, DefenseStats, NetProductionFormula, OffenseStats, Record, TeamProfile};
pub use weather::{apply_weather, Weather, WeatherDistribution, WeatherTable};
