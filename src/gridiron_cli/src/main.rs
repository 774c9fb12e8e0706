use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use gridiron_core::loader::{load_schedule, load_teams};
use gridiron_core::{
    conference_standings, expected_standings, summarize_replays, Conference, MatchResolver,
    NetProductionFormula, ScoringConfig, SeasonState, WeatherTable,
};

#[derive(Parser, Debug)]
#[command(name = "gridiron")]
#[command(version)]
#[command(about = "Simulates a football season from season-aggregate team statistics")]
struct Args {
    /// Offense statistics CSV (Name, GP, PTS, All, Run, Pass)
    #[arg(long, default_value = "2023 Fantasy Offense Stats.csv")]
    offense: PathBuf,

    /// Defense statistics CSV (Name, PA, DEF, QB, RB, WR, TE)
    #[arg(long, default_value = "2023 Fantasy Defense Stats.csv")]
    defense: PathBuf,

    /// Schedule CSV (Week, Team1 = away, Team2 = home)
    #[arg(long, default_value = "2023 Schedule.csv")]
    schedule: PathBuf,

    /// Seed for reproducible weather draws
    #[arg(long)]
    seed: Option<u64>,

    /// Score games without venue weather
    #[arg(long)]
    no_weather: bool,

    /// Score games without the home-field multiplier
    #[arg(long)]
    no_home_field: bool,

    /// Score games without win-streak momentum
    #[arg(long)]
    no_momentum: bool,

    /// Use the point-differential net production formula
    #[arg(long)]
    legacy_net_production: bool,

    /// Replay the season this many times, print win distributions and exit
    #[arg(long)]
    replays: Option<usize>,
}

impl Args {
    fn scoring(&self) -> ScoringConfig {
        ScoringConfig {
            weather: !self.no_weather,
            home_field: !self.no_home_field,
            momentum: !self.no_momentum,
            net_production: if self.legacy_net_production {
                NetProductionFormula::PointDifferential
            } else {
                NetProductionFormula::Composite
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuChoice {
    Simulation,
    Expect,
    Stats,
    Quit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "simulation" => Some(MenuChoice::Simulation),
            "expect" => Some(MenuChoice::Expect),
            "stats" => Some(MenuChoice::Stats),
            "quit" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

const INTRO: &str = "Would you like to do the season simulation,
or would you like to find the expected records of each team,
or would you like to view individual team stats?

For the simulation, type \"simulation\",
and to find the expected records, type \"expect\",
and to view team stats, type \"stats\".

If you want to quit type \"quit\".";

const INVALID: &str = "
Invalid choice. Please type 'simulation' for the season simulation,
'expect' for the expected wins, 'stats' for the team stats, or 'quit'.
";

const PROMPT: &str = "\nWhat would you like to do next? (simulation / expect / stats / quit): ";

fn print_simulation(state: &mut SeasonState, seed: Option<u64>) -> Result<()> {
    let results = state.simulate(seed).context("season simulation failed")?;

    println!("\nGame Results:");
    for result in &results {
        println!("{}", result);
    }

    println!("----------------------------------------------------------");
    println!("\nFinal Regular Season Team Records:\n");
    let standings = conference_standings(&state.league);
    for conference in [Conference::Afc, Conference::Nfc] {
        println!("{} Teams:", conference.name());
        for row in standings.conference(conference) {
            println!("{}", row);
        }
        println!();
    }
    Ok(())
}

fn print_expected(state: &SeasonState) {
    println!("\nFinal Team Records:");
    for row in expected_standings(&state.league) {
        println!("{}", row);
    }
}

fn print_stats(state: &SeasonState) {
    for team in &state.league {
        println!("{}\n", team);
    }
}

fn print_replays(state: &SeasonState, n: usize, seed: Option<u64>) -> Result<()> {
    let replays = state.run_simulations(n, seed).context("replays failed")?;
    println!("Win distribution over {} seasons:", n);
    for summary in summarize_replays(&state.league, &replays) {
        println!("{}", summary);
    }
    Ok(())
}

fn run_menu(state: &mut SeasonState, seed: Option<u64>) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut runs = 0u64;

    println!("{}", INTRO);
    let mut input = lines.next().transpose()?;

    while let Some(line) = input {
        match MenuChoice::parse(&line) {
            Some(MenuChoice::Quit) => break,
            Some(MenuChoice::Simulation) => {
                // successive runs stay reproducible but differ from each other
                print_simulation(state, seed.map(|s| s.wrapping_add(runs)))?;
                runs += 1;
            }
            Some(MenuChoice::Expect) => print_expected(state),
            Some(MenuChoice::Stats) => print_stats(state),
            None => {
                warn!("unrecognised menu choice {:?}", line.trim());
                println!("{}", INVALID);
            }
        }

        print!("{}", PROMPT);
        io::stdout().flush()?;
        input = lines.next().transpose()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let league = load_teams(&args.offense, &args.defense).with_context(|| {
        format!("loading teams from {} and {}", args.offense.display(), args.defense.display())
    })?;
    let schedule = load_schedule(&args.schedule)
        .with_context(|| format!("loading schedule from {}", args.schedule.display()))?;
    info!("{} teams, {} scheduled games", league.len(), schedule.len());

    let resolver = MatchResolver::new(args.scoring(), WeatherTable::nfl());
    let mut state = SeasonState::new(schedule, league, resolver);

    match args.replays {
        Some(n) => print_replays(&state, n, args.seed),
        None => run_menu(&mut state, args.seed),
    }
}
