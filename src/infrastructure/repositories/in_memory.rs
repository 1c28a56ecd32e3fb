use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::matches::Match;
use crate::domain::repositories::{
    MatchRepository, SeasonRepository, Store, TeamRepository, UnitOfWork,
};
use crate::domain::season::Season;
use crate::domain::team::Team;

/// Rows of every table plus the id sequences
#[derive(Debug, Clone, Default)]
struct Tables {
    seasons: BTreeMap<i64, Season>,
    matches: BTreeMap<i64, Match>,
    teams: BTreeMap<i64, Team>,
    next_season_id: i64,
    next_match_id: i64,
    next_team_id: i64,
}

impl Tables {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

/// In-process store used by tests and by `DATABASE_URL=memory:`
///
/// Units of work are serialized: each one holds the table lock, mutates a
/// private copy and writes it back on commit.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        let guard = self.tables.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryUnitOfWork { guard, working }))
    }
}

/// Unit of work over an [`InMemoryStore`]
pub struct InMemoryUnitOfWork {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

fn duplicate_team_name(tables: &Tables, name: &str, except: Option<i64>) -> bool {
    tables
        .teams
        .iter()
        .any(|(id, team)| Some(*id) != except && team.name() == name)
}

fn persisted_id(id: Option<i64>, entity: &str) -> DomainResult<i64> {
    id.ok_or_else(|| DomainError::store(format!("Cannot save unpersisted {}", entity)))
}

#[async_trait]
impl SeasonRepository for InMemoryUnitOfWork {
    async fn find_season(&mut self, id: i64) -> DomainResult<Option<Season>> {
        Ok(self.working.seasons.get(&id).cloned())
    }

    async fn list_seasons(&mut self, id: Option<i64>) -> DomainResult<Vec<Season>> {
        Ok(self
            .working
            .seasons
            .iter()
            .filter(|(season_id, _)| id.map_or(true, |id| **season_id == id))
            .map(|(_, season)| season.clone())
            .collect())
    }

    async fn insert_season(&mut self, season: &Season) -> DomainResult<Season> {
        let id = Tables::next_id(&mut self.working.next_season_id);
        let stored = Season::from_persistence(id, season.event().clone());
        self.working.seasons.insert(id, stored.clone());
        Ok(stored)
    }

    async fn save_season(&mut self, season: &Season) -> DomainResult<()> {
        let id = persisted_id(season.id(), "season")?;
        match self.working.seasons.get_mut(&id) {
            Some(row) => {
                *row = season.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(format!("Season not found: {}", id))),
        }
    }

    async fn delete_season(&mut self, id: i64) -> DomainResult<bool> {
        if self.working.seasons.remove(&id).is_none() {
            return Ok(false);
        }
        self.working
            .matches
            .retain(|_, game| game.season_id() != Some(id));
        self.working.teams.retain(|_, team| team.season_id() != id);
        Ok(true)
    }
}

#[async_trait]
impl MatchRepository for InMemoryUnitOfWork {
    async fn find_match(&mut self, id: i64) -> DomainResult<Option<Match>> {
        Ok(self.working.matches.get(&id).cloned())
    }

    async fn list_matches(&mut self, season_id: Option<i64>) -> DomainResult<Vec<Match>> {
        Ok(self
            .working
            .matches
            .values()
            .filter(|game| season_id.map_or(true, |id| game.season_id() == Some(id)))
            .cloned()
            .collect())
    }

    async fn insert_match(&mut self, game: &Match) -> DomainResult<Match> {
        let id = Tables::next_id(&mut self.working.next_match_id);
        let stored = Match::from_persistence(id, game.event().clone(), game.season_id());
        self.working.matches.insert(id, stored.clone());
        Ok(stored)
    }

    async fn save_match(&mut self, game: &Match) -> DomainResult<()> {
        let id = persisted_id(game.id(), "match")?;
        match self.working.matches.get_mut(&id) {
            Some(row) => {
                *row = game.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(format!("Match not found: {}", id))),
        }
    }

    async fn delete_match(&mut self, id: i64) -> DomainResult<bool> {
        Ok(self.working.matches.remove(&id).is_some())
    }
}

#[async_trait]
impl TeamRepository for InMemoryUnitOfWork {
    async fn find_team(&mut self, id: i64) -> DomainResult<Option<Team>> {
        Ok(self.working.teams.get(&id).cloned())
    }

    async fn list_teams(&mut self, season_id: Option<i64>) -> DomainResult<Vec<Team>> {
        Ok(self
            .working
            .teams
            .values()
            .filter(|team| season_id.map_or(true, |id| team.season_id() == id))
            .cloned()
            .collect())
    }

    async fn insert_team(&mut self, team: &Team) -> DomainResult<Team> {
        if duplicate_team_name(&self.working, team.name(), None) {
            return Err(DomainError::Conflict(format!(
                "Team name already taken: {}",
                team.name()
            )));
        }
        let id = Tables::next_id(&mut self.working.next_team_id);
        let stored = Team::from_persistence(
            id,
            team.name().to_string(),
            team.color().map(str::to_string),
            team.season_id(),
        );
        self.working.teams.insert(id, stored.clone());
        Ok(stored)
    }

    async fn save_team(&mut self, team: &Team) -> DomainResult<()> {
        let id = persisted_id(team.id(), "team")?;
        if duplicate_team_name(&self.working, team.name(), Some(id)) {
            return Err(DomainError::Conflict(format!(
                "Team name already taken: {}",
                team.name()
            )));
        }
        match self.working.teams.get_mut(&id) {
            Some(row) => {
                *row = team.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(format!("Team not found: {}", id))),
        }
    }

    async fn delete_team(&mut self, id: i64) -> DomainResult<bool> {
        Ok(self.working.teams.remove(&id).is_some())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let InMemoryUnitOfWork { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
