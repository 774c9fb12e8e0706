use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::constants::{AFC_TEAMS, NFC_TEAMS};
use crate::league::League;
use crate::season::SeasonRecords;
use crate::team::TeamProfile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conference {
    Afc,
    Nfc,
}

impl Conference {
    pub fn name(self) -> &'static str {
        match self {
            Conference::Afc => "AFC",
            Conference::Nfc => "NFC",
        }
    }

    pub fn members(self) -> &'static [&'static str] {
        match self {
            Conference::Afc => &AFC_TEAMS,
            Conference::Nfc => &NFC_TEAMS,
        }
    }

    pub fn of(team: &str) -> Option<Conference> {
        [Conference::Afc, Conference::Nfc]
            .into_iter()
            .find(|c| c.members().contains(&team))
    }
}

/// A team's actual record in the simulated season.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl From<&TeamProfile> for StandingRow {
    fn from(team: &TeamProfile) -> Self {
        StandingRow {
            name: team.name.clone(),
            wins: team.record.wins,
            losses: team.record.losses,
            ties: team.record.ties,
        }
    }
}

impl fmt::Display for StandingRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Wins: {}, Losses: {}, Ties: {}",
            self.name, self.wins, self.losses, self.ties
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceStandings {
    pub afc: Vec<StandingRow>,
    pub nfc: Vec<StandingRow>,
    /// Teams in the league that belong to neither conference
    pub unassigned: Vec<String>,
}

impl ConferenceStandings {
    pub fn conference(&self, conference: Conference) -> &[StandingRow] {
        match conference {
            Conference::Afc => &self.afc,
            Conference::Nfc => &self.nfc,
        }
    }
}

/// Split the league by conference, most wins first.
///
/// Teams level on wins keep their league order. Teams outside both
/// conferences are left out of the tables, reported in `unassigned` and
/// logged.
pub fn conference_standings(league: &League) -> ConferenceStandings {
    let mut standings = ConferenceStandings::default();

    for team in league {
        match Conference::of(&team.name) {
            Some(Conference::Afc) => standings.afc.push(team.into()),
            Some(Conference::Nfc) => standings.nfc.push(team.into()),
            None => {
                warn!("{} is not in either conference; left out of standings", team.name);
                standings.unassigned.push(team.name.clone());
            }
        }
    }

    standings.afc.sort_by(|a, b| b.wins.cmp(&a.wins));
    standings.nfc.sort_by(|a, b| b.wins.cmp(&a.wins));
    standings
}

/// A team's regression-based projection for the season.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpectedRow {
    pub name: String,
    pub expected_wins: f64,
    pub expected_losses: f64,
}

impl fmt::Display for ExpectedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Expected Wins: {:.2}, Expected Losses: {:.2}",
            self.name, self.expected_wins, self.expected_losses
        )
    }
}

/// Every team by expected wins, highest first. Ignores simulated results.
pub fn expected_standings(league: &League) -> Vec<ExpectedRow> {
    let mut rows: Vec<ExpectedRow> = league
        .iter()
        .map(|t| ExpectedRow {
            name: t.name.clone(),
            expected_wins: t.expected_wins,
            expected_losses: t.expected_losses,
        })
        .collect();
    rows.sort_by(|a, b| b.expected_wins.total_cmp(&a.expected_wins));
    rows
}

/// Win distribution of a team across replayed seasons.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub name: String,
    pub mean_wins: f64,
    pub std_dev_wins: f64,
    pub mean_losses: f64,
    pub mean_ties: f64,
    pub expected_wins: f64,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Mean Wins: {:.2} (sd {:.2}), Mean Losses: {:.2}, Mean Ties: {:.2}, \
             Expected Wins: {:.2}",
            self.name,
            self.mean_wins,
            self.std_dev_wins,
            self.mean_losses,
            self.mean_ties,
            self.expected_wins
        )
    }
}

/// Summarise replays from [`crate::season::SeasonState::run_simulations`],
/// highest mean wins first.
pub fn summarize_replays(league: &League, replays: &[SeasonRecords]) -> Vec<ReplaySummary> {
    let mut summaries: Vec<ReplaySummary> = league
        .iter()
        .map(|team| {
            let records: Vec<_> = replays
                .iter()
                .filter_map(|season| season.iter().find(|(name, _)| *name == team.name))
                .map(|(_, record)| *record)
                .collect();
            let wins: Vec<f64> = records.iter().map(|r| r.wins as f64).collect();
            let losses: Vec<f64> = records.iter().map(|r| r.losses as f64).collect();
            let ties: Vec<f64> = records.iter().map(|r| r.ties as f64).collect();

            let std_dev_wins = if wins.len() > 1 { wins.iter().std_dev() } else { 0.0 };

            ReplaySummary {
                name: team.name.clone(),
                mean_wins: wins.iter().mean(),
                std_dev_wins,
                mean_losses: losses.iter().mean(),
                mean_ties: ties.iter().mean(),
                expected_wins: team.expected_wins,
            }
        })
        .collect();

    summaries.sort_by(|a, b| b.mean_wins.total_cmp(&a.mean_wins));
    summaries
}
