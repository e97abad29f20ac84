use tracing::debug;

use crate::map::{Map, Tile};
use crate::search::PathSearch;
use crate::state::PlayerState;
use crate::types::{Move, Position, Team};

/// The `ur` tile is reserved by the game and never worth routing to.
const EXCLUDED_TARGET: Tile = Tile::Unclaimed(Team::Red);

/// Pick the destination tile: the nearest tile (Manhattan distance) that is
/// not claimed, not reserved, and not the tile the player stands on. Ties go
/// to the first candidate in row-major order. `None` when the map has no
/// candidate left.
pub fn select_target(map: &Map, player: Position) -> Option<Position> {
    let mut best: Option<(Position, i32)> = None;
    for (pos, tile) in map.tiles() {
        if tile.is_obstacle() || tile == EXCLUDED_TARGET || pos == player {
            continue;
        }
        let distance = player.distance(&pos);
        if best.is_none_or(|(_, closest)| distance < closest) {
            best = Some((pos, distance));
        }
    }
    best.map(|(pos, _)| pos)
}

/// One step of the route from `start` to `target`, or `Idle` when no route
/// exists.
pub fn next_step(map: &Map, start: Position, target: Position) -> Move {
    let Some(path) = PathSearch::find_path(map, start, target) else {
        debug!("No route from {:?} to {:?}", start, target);
        return Move::Idle;
    };
    path_to_move(start, &path)
}

fn path_to_move(current: Position, path: &[Position]) -> Move {
    if path.len() < 2 {
        return Move::Idle;
    }
    let next = path[1];

    // Fixed priority order; the emitted move is part of the output contract.
    if next.y < current.y {
        Move::Up
    } else if next.x < current.x {
        Move::Left
    } else if next.y > current.y {
        Move::Down
    } else if next.x > current.x {
        Move::Right
    } else {
        Move::Idle
    }
}

/// The full per-player decision: gate on team, pick a target, derive a step.
pub fn decide(map: &Map, player: &PlayerState, privileged: Team) -> Move {
    if player.team != privileged {
        debug!(
            "{} is on team {:?}, only {:?} may act",
            player.name, player.team, privileged
        );
        return Move::Idle;
    }

    let Some(target) = select_target(map, player.pos) else {
        debug!("{}: couldn't find an unclaimed space", player.name);
        return Move::Idle;
    };

    next_step(map, player.pos, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, pos: Position, team: Team) -> PlayerState {
        PlayerState {
            name: name.to_string(),
            pos,
            team,
        }
    }

    #[test]
    fn test_select_nearest_candidate() {
        let map = Map::parse("cr,cr,cr\ncr,cr,e\ne,cr,cr").unwrap();
        // Candidates are (2,1) at distance 3 and (0,2) at distance 2.
        let target = select_target(&map, Position::new(0, 0)).unwrap();
        assert_eq!(target, Position::new(0, 2));
    }

    #[test]
    fn test_tie_break_is_row_major() {
        // (1,0) and (0,1) are both at distance 1; the row-major scan sees
        // (1,0) first.
        let map = Map::parse("e,e\ne,e").unwrap();
        let target = select_target(&map, Position::new(0, 0)).unwrap();
        assert_eq!(target, Position::new(1, 0));
    }

    #[test]
    fn test_excludes_obstacles_reserved_and_self() {
        let map = Map::parse("e,cr\nur,e").unwrap();
        // Only (1,1) is left: (0,0) is the player, (1,0) is claimed and
        // (0,1) is reserved.
        let target = select_target(&map, Position::new(0, 0)).unwrap();
        assert_eq!(target, Position::new(1, 1));
    }

    #[test]
    fn test_no_candidates_yields_none() {
        let map = Map::parse("e,cr\nur,cb").unwrap();
        assert_eq!(select_target(&map, Position::new(0, 0)), None);
    }

    #[test]
    fn test_next_step_each_direction() {
        let map = Map::parse("e,e,e\ne,e,e\ne,e,e").unwrap();
        let center = Position::new(1, 1);
        assert_eq!(next_step(&map, center, Position::new(1, 0)), Move::Up);
        assert_eq!(next_step(&map, center, Position::new(1, 2)), Move::Down);
        assert_eq!(next_step(&map, center, Position::new(0, 1)), Move::Left);
        assert_eq!(next_step(&map, center, Position::new(2, 1)), Move::Right);
    }

    #[test]
    fn test_next_step_to_own_tile_is_idle() {
        let map = Map::parse("e,e\ne,e").unwrap();
        let pos = Position::new(0, 0);
        assert_eq!(next_step(&map, pos, pos), Move::Idle);
    }

    #[test]
    fn test_next_step_unreachable_is_idle() {
        // Player walled in at (0,0); free tiles exist on the far side.
        let map = Map::parse("e,cg,e\ncg,cg,e").unwrap();
        assert_eq!(
            next_step(&map, Position::new(0, 0), Position::new(2, 0)),
            Move::Idle
        );
    }

    #[test]
    fn test_vertical_beats_horizontal_in_priority_order() {
        // A degenerate one-step "path" exercises the delta mapping directly.
        assert_eq!(
            path_to_move(
                Position::new(1, 1),
                &[Position::new(1, 1), Position::new(1, 0)]
            ),
            Move::Up
        );
        assert_eq!(
            path_to_move(Position::new(1, 1), &[Position::new(1, 1)]),
            Move::Idle
        );
    }

    #[test]
    fn test_decide_gates_on_team() {
        let map = Map::parse("e,e\ne,e").unwrap();
        let gated = player("gated", Position::new(0, 0), Team::Green);
        assert_eq!(decide(&map, &gated, Team::Red), Move::Idle);

        let allowed = player("allowed", Position::new(0, 0), Team::Red);
        assert_ne!(decide(&map, &allowed, Team::Red), Move::Idle);
    }

    #[test]
    fn test_decide_idles_when_no_candidates() {
        let map = Map::parse("e,cr\nur,cb").unwrap();
        let p = player("stuck", Position::new(0, 0), Team::Red);
        assert_eq!(decide(&map, &p, Team::Red), Move::Idle);
    }

    #[test]
    fn test_decide_worked_example() {
        // 3x3 world: a red claim at (2,0), a reserved tile at (0,2). The
        // nearest candidates to (0,0) are (1,0) and (0,1) at distance 1;
        // row-major order picks (1,0), so the player steps right.
        let map = Map::parse("e,e,cr\ne,e,e\nur,e,e").unwrap();
        let p = player("bot", Position::new(0, 0), Team::Red);
        assert_eq!(decide(&map, &p, Team::Red), Move::Right);
    }
}
