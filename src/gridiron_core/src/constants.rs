/// Regular season length the expected-wins regression was fit against
pub const SEASON_GAMES: f64 = 17.0;

/// Expected points scored per game: `OFFENSE_SLOPE * total_offense + OFFENSE_INTERCEPT`
pub const OFFENSE_SLOPE: f64 = 0.19;
pub const OFFENSE_INTERCEPT: f64 = 12.0;

/// Expected points allowed per game: `DEFENSE_SLOPE * total_defense + DEFENSE_INTERCEPT`
pub const DEFENSE_SLOPE: f64 = -1.24;
pub const DEFENSE_INTERCEPT: f64 = 30.8;

/// Expected wins: `WINS_SLOPE * net_rating + WINS_INTERCEPT`
pub const WINS_SLOPE: f64 = 0.418;
pub const WINS_INTERCEPT: f64 = 8.5;

/// Weight of total defensive production in the composite net production
pub const DEFENSE_PRODUCTION_WEIGHT: f64 = 7.06;

/// Multiplier on the home team's final score
pub const HOME_FIELD_MULTIPLIER: f64 = 1.05;

/// Score bonus per game of the current win streak (2% per win)
pub const MOMENTUM_PER_WIN: f64 = 0.02;

/// AFC membership, used to partition standings
pub const AFC_TEAMS: [&str; 16] = [
    "Baltimore Ravens",
    "Buffalo Bills",
    "Cincinnati Bengals",
    "Cleveland Browns",
    "Denver Broncos",
    "Houston Texans",
    "Indianapolis Colts",
    "Jacksonville Jaguars",
    "Kansas City Chiefs",
    "Las Vegas Raiders",
    "Los Angeles Chargers",
    "Miami Dolphins",
    "New England Patriots",
    "New York Jets",
    "Pittsburgh Steelers",
    "Tennessee Titans",
];

/// NFC membership, used to partition standings
pub const NFC_TEAMS: [&str; 16] = [
    "Arizona Cardinals",
    "Atlanta Falcons",
    "Carolina Panthers",
    "Chicago Bears",
    "Dallas Cowboys",
    "Detroit Lions",
    "Green Bay Packers",
    "Los Angeles Rams",
    "Minnesota Vikings",
    "New Orleans Saints",
    "New York Giants",
    "Philadelphia Eagles",
    "San Francisco 49ers",
    "Seattle Seahawks",
    "Tampa Bay Buccaneers",
    "Washington Commanders",
];
