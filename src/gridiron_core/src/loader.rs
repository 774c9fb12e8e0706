//! CSV input: per-team offense and defense statistics, and the schedule.
//!
//! Offense and defense files are joined on `Name`. Statistic columns that
//! are absent or blank count as zero.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;

use log::debug;

use crate::error::{Result, SimError};
use crate::league::League;
use crate::season::ScheduledGame;
use crate::team::TeamProfile;

pub const OFFENSE_COLUMNS: [&str; 5] = ["GP", "PTS", "All", "Run", "Pass"];
pub const DEFENSE_COLUMNS: [&str; 6] = ["PA", "DEF", "QB", "RB", "WR", "TE"];

type Row = HashMap<String, String>;

fn reader<R: io::Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input)
}

fn read_rows<R: io::Read>(input: R) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for row in reader(input).deserialize::<Row>() {
        rows.push(row?);
    }
    Ok(rows)
}

fn team_name(row: &Row) -> Result<String> {
    row.get("Name")
        .filter(|name| !name.is_empty())
        .cloned()
        .ok_or_else(|| SimError::MissingColumn { column: "Name".to_string() })
}

fn numeric_columns(row: &Row, columns: &[&str]) -> Result<HashMap<String, f64>> {
    let mut stats = HashMap::new();
    for &column in columns {
        let Some(value) = row.get(column).filter(|v| !v.is_empty()) else {
            continue;
        };
        let parsed = value.parse::<f64>().map_err(|_| SimError::InvalidNumber {
            column: column.to_string(),
            value: value.clone(),
        })?;
        stats.insert(column.to_string(), parsed);
    }
    Ok(stats)
}

/// Build a league from offense and defense CSV data, in offense-file order.
pub fn read_teams<O: io::Read, D: io::Read>(offense: O, defense: D) -> Result<League> {
    let mut defense_by_team: HashMap<String, HashMap<String, f64>> = HashMap::new();
    for row in read_rows(defense)? {
        let name = team_name(&row)?;
        let stats = numeric_columns(&row, &DEFENSE_COLUMNS)?;
        defense_by_team.entry(name).or_insert(stats);
    }

    let mut league = League::new();
    for row in read_rows(offense)? {
        let name = team_name(&row)?;
        let offense_stats = numeric_columns(&row, &OFFENSE_COLUMNS)?;
        let defense_stats = defense_by_team
            .get(&name)
            .ok_or_else(|| SimError::MissingDefense { team: name.clone() })?;
        league.insert(TeamProfile::from_stat_maps(name, &offense_stats, defense_stats)?)?;
    }

    debug!("loaded {} teams", league.len());
    Ok(league)
}

/// Read a schedule with `Week`, `Team1` (away) and `Team2` (home) columns.
pub fn read_schedule<R: io::Read>(input: R) -> Result<Vec<ScheduledGame>> {
    let mut games = Vec::new();
    for game in reader(input).deserialize::<ScheduledGame>() {
        games.push(game?);
    }
    debug!("loaded {} scheduled games", games.len());
    Ok(games)
}

pub fn load_teams(
    offense_path: impl AsRef<Path>,
    defense_path: impl AsRef<Path>,
) -> Result<League> {
    read_teams(File::open(offense_path)?, File::open(defense_path)?)
}

pub fn load_schedule(path: impl AsRef<Path>) -> Result<Vec<ScheduledGame>> {
    read_schedule(File::open(path)?)
}
