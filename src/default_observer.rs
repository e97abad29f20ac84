use std::io::{self, Write};

use tracing::{info, warn};

use crate::observer::BotObserver;
use crate::state::{PlayerState, StateError, WorldSnapshot};
use crate::types::{Move, Team};

pub struct DefaultObserver;

impl BotObserver for DefaultObserver {
    fn on_tick_start(&mut self, tick: u64) {
        info!("Tick {}", tick);
    }

    fn on_world_update(&mut self, world: &WorldSnapshot) {
        let map = &world.map;
        info!("- map size: {}x{}", map.width(), map.height());
        info!(
            "- claimed tiles: red {}, green {}, blue {}",
            map.claimed_count(Team::Red),
            map.claimed_count(Team::Green),
            map.claimed_count(Team::Blue),
        );
        if let Some(oldest) = world.decay.max() {
            info!("- oldest claim decay: {}", oldest);
        }

        let _ = writeln!(io::stdout(), "{}", map.draw_ascii());
    }

    fn on_player_state(&mut self, player: &PlayerState) {
        info!(
            "{} is now at x: {}, y: {} ({:?} team)",
            player.name, player.pos.x, player.pos.y, player.team
        );
    }

    fn on_move_selected(&mut self, player: &PlayerState, chosen: Move) {
        info!("Moving {} {}", player.name, chosen.as_str());
    }

    fn on_move_emitted(&mut self, player: &str, chosen: Move, revision: &str) {
        info!("{}: {} committed ({})", player, chosen.as_str(), revision);
    }

    fn on_player_failed(&mut self, player: &str, error: &StateError) {
        warn!("{}: state unavailable: {}", player, error);
    }

    fn on_tick_failed(&mut self, error: &StateError) {
        warn!("World state unavailable: {}", error);
    }
}
