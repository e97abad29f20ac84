use pathfinding::prelude::astar;

use crate::map::Map;
use crate::types::Position;

pub struct PathSearch;

impl PathSearch {
    /// Best-first search between two tiles, stepping only on non-obstacle
    /// tiles inside the map. The returned path contains both endpoints,
    /// start first.
    #[tracing::instrument(level = "trace", skip(map), fields(start_x = start.x, start_y = start.y, goal_x = goal.x, goal_y = goal.y))]
    pub fn find_path(map: &Map, start: Position, goal: Position) -> Option<Vec<Position>> {
        let (path, _cost) = astar(
            &start,
            |pos| {
                pos.neighbors()
                    .into_iter()
                    .filter(|next| map.in_bounds(*next) && !map.is_obstacle(*next))
                    .map(|next| (next, 1))
                    .collect::<Vec<_>>()
            },
            |pos| pos.distance(&goal),
            |pos| *pos == goal,
        )?;
        tracing::trace!(len = path.len(), "Path found");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_path() {
        let map = Map::parse("e,e,e\ne,e,e").unwrap();
        let path =
            PathSearch::find_path(&map, Position::new(0, 0), Position::new(2, 0)).unwrap();
        assert_eq!(path.first(), Some(&Position::new(0, 0)));
        assert_eq!(path.last(), Some(&Position::new(2, 0)));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_path_routes_around_obstacles() {
        // Claimed wall between start and goal, open row below.
        let map = Map::parse("e,cr,e\ne,e,e").unwrap();
        let path =
            PathSearch::find_path(&map, Position::new(0, 0), Position::new(2, 0)).unwrap();
        assert_eq!(path.len(), 5);
        assert!(!path.contains(&Position::new(1, 0)));
    }

    #[test]
    fn test_no_path_when_walled_in() {
        let map = Map::parse("e,cg,e\ncg,cg,e").unwrap();
        assert!(PathSearch::find_path(&map, Position::new(0, 0), Position::new(2, 0)).is_none());
    }

    #[test]
    fn test_trivial_path_when_start_is_goal() {
        let map = Map::parse("e,e\ne,e").unwrap();
        let path =
            PathSearch::find_path(&map, Position::new(1, 1), Position::new(1, 1)).unwrap();
        assert_eq!(path, vec![Position::new(1, 1)]);
    }
}
