use thiserror::Error;

use crate::map::{DecayGrid, Map, ParseError};
use crate::store::{ContentStore, StoreError};
use crate::types::{Position, Team};

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("players/{player}/{field} is not a number: {value:?}")]
    BadCoordinate {
        player: String,
        field: &'static str,
        value: String,
    },
    #[error("players/{player}/team holds unknown team code {code:?}")]
    UnknownTeam { player: String, code: String },
}

/// World state fetched once per tick and shared by every player's decision.
#[derive(Debug, Clone)]
pub struct WorldSnapshot {
    pub map: Map,
    pub decay: DecayGrid,
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub name: String,
    pub pos: Position,
    pub team: Team,
}

/// Fetches and parses game state from the world repository.
pub struct StateReader<'s, S> {
    store: &'s S,
    owner: &'s str,
    repo: &'s str,
}

impl<'s, S: ContentStore> StateReader<'s, S> {
    pub fn new(store: &'s S, owner: &'s str, repo: &'s str) -> Self {
        Self { store, owner, repo }
    }

    pub async fn snapshot(&self) -> Result<WorldSnapshot, StateError> {
        let map = Map::parse(&self.store.read(self.owner, self.repo, "map").await?)?;
        let decay = DecayGrid::parse(&self.store.read(self.owner, self.repo, "decay").await?)?;
        Ok(WorldSnapshot { map, decay })
    }

    pub async fn player(&self, name: &str) -> Result<PlayerState, StateError> {
        let x = self.coordinate(name, "x").await?;
        let y = self.coordinate(name, "y").await?;

        let code = self
            .store
            .read(self.owner, self.repo, &format!("players/{name}/team"))
            .await?;
        let code = code.trim();
        let team = Team::from_code(code).ok_or_else(|| StateError::UnknownTeam {
            player: name.to_string(),
            code: code.to_string(),
        })?;

        Ok(PlayerState {
            name: name.to_string(),
            pos: Position::new(x, y),
            team,
        })
    }

    async fn coordinate(&self, name: &str, field: &'static str) -> Result<i32, StateError> {
        let raw = self
            .store
            .read(self.owner, self.repo, &format!("players/{name}/{field}"))
            .await?;
        raw.trim()
            .parse()
            .map_err(|_| StateError::BadCoordinate {
                player: name.to_string(),
                field,
                value: raw.trim().to_string(),
            })
    }
}
