use crate::state::{PlayerState, StateError, WorldSnapshot};
use crate::types::Move;

/// Trait for observing bot events during a tick
pub trait BotObserver {
    /// Called at the start of every tick
    fn on_tick_start(&mut self, tick: u64);

    /// Called after the world snapshot for a tick has been fetched
    fn on_world_update(&mut self, world: &WorldSnapshot);

    /// Called after a player's position and team have been fetched
    fn on_player_state(&mut self, player: &PlayerState);

    /// Called when a move has been chosen for a player
    fn on_move_selected(&mut self, player: &PlayerState, chosen: Move);

    /// Called after a move has been committed to the player's action file
    fn on_move_emitted(&mut self, player: &str, chosen: Move, revision: &str);

    /// Called when a player's state could not be fetched; the tick continues
    /// with the remaining players
    fn on_player_failed(&mut self, player: &str, error: &StateError);

    /// Called when the world snapshot could not be fetched; the tick is
    /// abandoned
    fn on_tick_failed(&mut self, error: &StateError);
}
