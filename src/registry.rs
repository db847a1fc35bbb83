use std::{path::PathBuf, sync::Arc};

use dashmap::{DashMap, Entry};
use nanoid::nanoid;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::{
    data::{GameState, Level},
    error::{GameError, Result},
    logic::{Board, Game},
};

pub type Games = Arc<DashMap<String, Arc<Mutex<Game>>>>;

/// Where a new game's board comes from.
#[derive(Debug, Clone)]
pub enum GameSource {
    Level(Level),
    Layout(String),
    LayoutFile(PathBuf),
}

impl GameSource {
    pub fn level(name: Option<&str>) -> Self {
        Self::Level(Level::from_name(name))
    }

    fn build_board(&self) -> Result<Board> {
        match self {
            Self::Level(level) => {
                let (bombs, size) = level.params();
                Board::random(bombs, size)
            }
            Self::Layout(layout) => Board::from_layout(layout),
            Self::LayoutFile(path) => Board::from_layout_file(path),
        }
    }
}

impl From<Level> for GameSource {
    fn from(level: Level) -> Self {
        Self::Level(level)
    }
}

/// Concurrent map of live games keyed by session id.
#[derive(Clone, Default)]
pub struct Registry {
    games: Games,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn create(&self, source: GameSource) -> Result<String> {
        let board = source.build_board()?;
        let id = self.add_game(Game::new(board));
        info!("Created game {} from {:?}", id, source);
        Ok(id)
    }

    /// Stores the game under a fresh 21 character nanoid, so an id evicted by
    /// a sweep is not handed out again in practice.
    fn add_game(&self, game: Game) -> String {
        let game = Arc::new(Mutex::new(game));

        loop {
            let id = nanoid!();
            match self.games.entry(id.clone()) {
                Entry::Occupied(_) => debug!("Session id {} already taken, retrying", id),
                Entry::Vacant(entry) => {
                    entry.insert(game);
                    return id;
                }
            }
        }
    }

    pub fn get(&self, id: &str) -> Result<Arc<Mutex<Game>>> {
        self.games
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GameError::NotFound(id.to_string()))
    }

    /// Expires every game older than `threshold_secs`, then evicts all lost
    /// games. Returns how many sessions were removed.
    #[instrument(level = "trace", skip(self))]
    pub async fn sweep(&self, threshold_secs: u64) -> usize {
        // Clone the handles out first so no map shard stays locked across an await.
        let games: Vec<(String, Arc<Mutex<Game>>)> = self
            .games
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        let mut games_to_remove = Vec::new();
        for (id, game) in games {
            let mut game = game.lock().await;
            game.check_expiry(threshold_secs);
            if game.state() == GameState::Lost {
                games_to_remove.push(id);
            }
        }

        // Lost is terminal, so nothing can revive these between the passes.
        let removed_count = games_to_remove.len();
        for id in games_to_remove {
            self.games.remove(&id);
            debug!("Removed session {}", id);
        }

        if removed_count > 0 {
            info!("Swept {} lost games, {} remaining", removed_count, self.games.len());
        }

        removed_count
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
