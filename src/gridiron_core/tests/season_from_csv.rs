use gridiron_core::loader::{read_schedule, read_teams};
use gridiron_core::{
    conference_standings, expected_standings, MatchResolver, Record, ScoringConfig, SeasonState,
    SimError, WeatherTable,
};

const OFFENSE: &str = "\
Name,GP,PTS,All,Run,Pass
Miami Dolphins,17,29.2,81.1,26.8,35.1
New England Patriots,17,13.9,24.3,24.4,35.6
Buffalo Bills,17,26.5,77.0,28.9,34.8
Dallas Cowboys,17,29.9,80.2,27.5,38.1
Green Bay Packers,17,22.5,61.7,25.9,33.4
Detroit Lions,17,27.1,75.3,28.6,36.0
";

const DEFENSE: &str = "\
Name,PA,DEF,QB,RB,WR,TE
Miami Dolphins,23.0,9.2,18.1,17.3,29.0,10.6
New England Patriots,21.5,6.4,15.2,18.4,26.4,7.1
Buffalo Bills,18.3,8.9,16.0,19.9,24.3,8.2
Dallas Cowboys,18.5,10.7,15.1,19.2,26.8,7.4
Green Bay Packers,20.6,6.1,17.2,20.5,25.1,8.9
Detroit Lions,23.2,6.6,19.4,15.3,31.0,9.3
";

const SCHEDULE: &str = "\
Week,Team1,Team2
1,Detroit Lions,Green Bay Packers
1,Buffalo Bills,Miami Dolphins
1,New England Patriots,Dallas Cowboys
2,Green Bay Packers,Buffalo Bills
2,Miami Dolphins,New England Patriots
2,Dallas Cowboys,Detroit Lions
3,Miami Dolphins,Green Bay Packers
3,Dallas Cowboys,Buffalo Bills
3,New England Patriots,Detroit Lions
";

fn season(config: ScoringConfig) -> SeasonState {
    let league = read_teams(OFFENSE.as_bytes(), DEFENSE.as_bytes()).unwrap();
    let schedule = read_schedule(SCHEDULE.as_bytes()).unwrap();
    SeasonState::new(schedule, league, MatchResolver::new(config, WeatherTable::nfl()))
}

#[test]
fn full_season_updates_every_team() {
    let mut state = season(ScoringConfig::default());
    let results = state.simulate(Some(2023)).unwrap();

    assert_eq!(results.len(), 9);
    for team in &state.league {
        assert_eq!(team.record.games(), 3, "{} should play three games", team.name);
        assert!(team.record.win_streak <= team.record.wins);
    }
    for (result, game) in results.iter().zip(&state.schedule) {
        let line = result.to_string();
        assert!(line.starts_with(&format!("Week {}: ", game.week)));
        assert!(line.contains(&game.home) && line.contains(&game.away));
    }
}

#[test]
fn standings_cover_both_conferences() {
    let mut state = season(ScoringConfig::default());
    state.simulate(Some(7)).unwrap();

    let standings = conference_standings(&state.league);
    assert_eq!(standings.afc.len(), 3);
    assert_eq!(standings.nfc.len(), 3);
    assert!(standings.unassigned.is_empty());
    assert!(standings.afc.windows(2).all(|w| w[0].wins >= w[1].wins));
    assert!(standings.nfc.windows(2).all(|w| w[0].wins >= w[1].wins));

    let expected = expected_standings(&state.league);
    assert_eq!(expected.len(), 6);
    assert!(expected.windows(2).all(|w| w[0].expected_wins >= w[1].expected_wins));
}

#[test]
fn weatherless_season_is_deterministic_without_seed() {
    let config = ScoringConfig { weather: false, ..Default::default() };
    let mut first = season(config);
    let mut second = season(config);
    assert_eq!(first.simulate(None).unwrap(), second.simulate(None).unwrap());
}

#[test]
fn reset_then_replay() {
    let mut state = season(ScoringConfig::default());
    state.simulate(Some(1)).unwrap();
    state.reset();
    assert!(state.league.iter().all(|t| t.record == Record::default()));

    let replays = state.run_simulations(50, Some(11)).unwrap();
    assert_eq!(replays.len(), 50);
    assert!(state.league.iter().all(|t| t.record == Record::default()));
}

#[test]
fn unknown_schedule_team_fails_the_run() {
    let mut state = season(ScoringConfig::default());
    state.schedule.push(gridiron_core::ScheduledGame::new(4, "Miami Dolphins", "Houston Oilers"));

    let err = state.simulate(Some(1)).unwrap_err();
    assert!(matches!(err, SimError::UnknownTeam { week: 4, .. }));
}
