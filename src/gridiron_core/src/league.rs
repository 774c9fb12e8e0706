use std::collections::HashMap;

use crate::error::{Result, SimError};
use crate::team::TeamProfile;

/// Teams keyed by name. Iteration follows insertion order.
#[derive(Clone, Debug, Default)]
pub struct League {
    teams: Vec<TeamProfile>,
    index: HashMap<String, usize>,
}

impl League {
    pub fn new() -> Self {
        League::default()
    }

    pub fn from_teams(teams: impl IntoIterator<Item = TeamProfile>) -> Result<Self> {
        let mut league = League::new();
        for team in teams {
            league.insert(team)?;
        }
        Ok(league)
    }

    /// Add a team. Names must be unique.
    pub fn insert(&mut self, team: TeamProfile) -> Result<()> {
        if self.index.contains_key(&team.name) {
            return Err(SimError::DuplicateTeam { team: team.name });
        }
        self.index.insert(team.name.clone(), self.teams.len());
        self.teams.push(team);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TeamProfile> {
        self.index.get(name).map(|&i| &self.teams[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TeamProfile> {
        self.index.get(name).map(|&i| &mut self.teams[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamProfile> {
        self.teams.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Zero every team's record and win streak.
    pub fn reset_all(&mut self) {
        for team in &mut self.teams {
            team.reset_record();
        }
    }
}

impl<'a> IntoIterator for &'a League {
    type Item = &'a TeamProfile;
    type IntoIter = std::slice::Iter<'a, TeamProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.teams.iter()
    }
}
