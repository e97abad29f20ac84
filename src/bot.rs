use std::time::{Duration, Instant};

use tokio::time::{MissedTickBehavior, interval};
use tracing::warn;

use crate::observer::BotObserver;
use crate::policy;
use crate::state::StateReader;
use crate::store::{ContentStore, StoreError};
use crate::types::{Move, Team};

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Owner and repository holding the shared world state.
    pub world_owner: String,
    pub world_repo: String,
    /// Repository name under each player's own account where moves are
    /// committed.
    pub client_repo: String,
    /// Controlled players, processed in this order every tick.
    pub players: Vec<String>,
    /// Only players on this team act; everyone else is forced idle.
    pub privileged_team: Team,
    pub tick: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            world_owner: "programical".to_string(),
            world_repo: "gitland".to_string(),
            client_repo: "gitland-client".to_string(),
            players: Vec::new(),
            privileged_team: Team::Red,
            tick: Duration::from_millis(60_000),
        }
    }
}

pub struct Bot<S, O> {
    store: S,
    config: BotConfig,
    observer: O,
}

impl<S: ContentStore, O: BotObserver> Bot<S, O> {
    pub fn new(store: S, config: BotConfig, observer: O) -> Self {
        Self {
            store,
            config,
            observer,
        }
    }

    /// Run forever: one pass over all players per tick period. The first
    /// pass starts immediately.
    pub async fn run(&mut self) {
        let mut ticker = interval(self.config.tick);
        // A slow pass delays the next firing instead of stacking a second
        // pass on top of it.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut tick: u64 = 0;
        loop {
            ticker.tick().await;
            tick += 1;
            self.run_tick(tick).await;
        }
    }

    /// One full fetch-decide-emit pass over all configured players.
    pub async fn run_tick(&mut self, tick: u64) {
        let tick_start = Instant::now();
        self.observer.on_tick_start(tick);

        let reader = StateReader::new(
            &self.store,
            &self.config.world_owner,
            &self.config.world_repo,
        );

        // Every player's decision needs the snapshot, so a failed fetch
        // abandons the whole tick.
        let world = match reader.snapshot().await {
            Ok(world) => world,
            Err(error) => {
                warn!("Tick {}: {}", tick, error);
                self.observer.on_tick_failed(&error);
                return;
            }
        };
        self.observer.on_world_update(&world);

        for name in &self.config.players {
            let player = match reader.player(name).await {
                Ok(player) => player,
                Err(error) => {
                    warn!("{}: skipping this tick: {}", name, error);
                    self.observer.on_player_failed(name, &error);
                    continue;
                }
            };
            self.observer.on_player_state(&player);

            let chosen = policy::decide(&world.map, &player, self.config.privileged_team);
            self.observer.on_move_selected(&player, chosen);

            match emit(&self.store, &self.config.client_repo, name, chosen).await {
                Ok(revision) => self.observer.on_move_emitted(name, chosen, &revision),
                // Swallowed; the next tick retries naturally.
                Err(error) => warn!("{}: move not committed: {}", name, error),
            }
        }

        let elapsed = tick_start.elapsed();
        if elapsed >= self.config.tick {
            warn!(
                "Tick {} took {:.1}s, longer than the {:.0}s period",
                tick,
                elapsed.as_secs_f64(),
                self.config.tick.as_secs_f64()
            );
        }
    }
}

/// Commit a move to the player's own action file. The write is an upsert:
/// absence of the file means create, otherwise the current revision tag is
/// attached so a concurrent writer loses cleanly.
async fn emit<S: ContentStore>(
    store: &S,
    client_repo: &str,
    player: &str,
    chosen: Move,
) -> Result<String, StoreError> {
    let revision = store.revision(player, client_repo, "act").await?;
    let message = format!("Move {}", chosen.as_str());
    store
        .write(
            player,
            client_repo,
            "act",
            &message,
            chosen.as_str(),
            revision.as_deref(),
        )
        .await
}
