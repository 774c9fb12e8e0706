use thiserror::Error;

/// Errors raised while building a league or simulating a season.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("team {team:?} has zero plays per game; efficiency is undefined")]
    ZeroPlays { team: String },

    #[error("team {team:?} has zero efficiency; point-differential net production is undefined")]
    ZeroEfficiency { team: String },

    #[error("week {week}: schedule references unknown team {team:?}")]
    UnknownTeam { week: u32, team: String },

    #[error("team {team:?} is already in the league")]
    DuplicateTeam { team: String },

    #[error("week {week}: {team:?} is scheduled against itself")]
    SelfMatchup { week: u32, team: String },

    #[error("invalid weather distribution for {venue:?}: {reason}")]
    InvalidDistribution { venue: String, reason: String },

    #[error("no defense row for team {team:?}")]
    MissingDefense { team: String },

    #[error("missing required column {column:?}")]
    MissingColumn { column: String },

    #[error("column {column:?} has non-numeric value {value:?}")]
    InvalidNumber { column: String, value: String },

    #[error("at least one simulation is required")]
    NoSimulations,

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
