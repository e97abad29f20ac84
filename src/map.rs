use thiserror::Error;

use crate::types::{Position, Team};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("grid is empty")]
    Empty,
    #[error("unknown tile label {label:?} at ({x}, {y})")]
    UnknownTile { label: String, x: usize, y: usize },
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("decay cell at ({x}, {y}) is not a number: {value:?}")]
    BadDecayCell { value: String, x: usize, y: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Claimed(Team),
    Unclaimed(Team),
}

impl Tile {
    fn from_label(label: &str) -> Option<Tile> {
        if label == "e" {
            return Some(Tile::Empty);
        }
        let team = Team::from_code(label)?;
        if label.starts_with('c') {
            Some(Tile::Claimed(team))
        } else {
            Some(Tile::Unclaimed(team))
        }
    }

    /// Claimed tiles are impassable for routing.
    pub fn is_obstacle(&self) -> bool {
        matches!(self, Tile::Claimed(_))
    }
}

#[derive(Debug, Clone)]
pub struct Map {
    width: i32,
    height: i32,
    tiles: Vec<Vec<Tile>>,
}

impl Map {
    /// Parse the wire encoding: newline-separated rows of comma-separated
    /// tile labels. All rows must have the same length.
    pub fn parse(text: &str) -> Result<Map, ParseError> {
        let mut tiles = Vec::new();
        for (y, line) in non_empty_lines(text).enumerate() {
            let mut row = Vec::new();
            for (x, label) in line.split(',').enumerate() {
                let label = label.trim();
                let tile =
                    Tile::from_label(label).ok_or_else(|| ParseError::UnknownTile {
                        label: label.to_string(),
                        x,
                        y,
                    })?;
                row.push(tile);
            }
            tiles.push(row);
        }

        let width = expect_rectangular(&tiles)?;
        Ok(Map {
            width: width as i32,
            height: tiles.len() as i32,
            tiles,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn get(&self, pos: Position) -> Option<Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.tiles[pos.y as usize][pos.x as usize])
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(tile) if tile.is_obstacle())
    }

    /// Row-major iteration: y ascending, then x ascending. Target selection
    /// depends on this order for its tie-break.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, tile)| (Position::new(x as i32, y as i32), *tile))
        })
    }

    pub fn claimed_count(&self, team: Team) -> usize {
        self.tiles()
            .filter(|(_, tile)| *tile == Tile::Claimed(team))
            .count()
    }

    pub fn draw_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in &self.tiles {
            for tile in row {
                out.push(match tile {
                    Tile::Empty => '.',
                    Tile::Claimed(Team::Red) => 'R',
                    Tile::Claimed(Team::Green) => 'G',
                    Tile::Claimed(Team::Blue) => 'B',
                    Tile::Unclaimed(Team::Red) => 'r',
                    Tile::Unclaimed(Team::Green) => 'g',
                    Tile::Unclaimed(Team::Blue) => 'b',
                });
            }
            out.push('\n');
        }
        out
    }
}

/// Per-tile "ticks since claimed" counters, same wire shape as the map.
#[derive(Debug, Clone)]
pub struct DecayGrid {
    values: Vec<Vec<i32>>,
}

impl DecayGrid {
    pub fn parse(text: &str) -> Result<DecayGrid, ParseError> {
        let mut values = Vec::new();
        for (y, line) in non_empty_lines(text).enumerate() {
            let mut row = Vec::new();
            for (x, cell) in line.split(',').enumerate() {
                let cell = cell.trim();
                let value = cell.parse::<i32>().map_err(|_| ParseError::BadDecayCell {
                    value: cell.to_string(),
                    x,
                    y,
                })?;
                row.push(value);
            }
            values.push(row);
        }

        expect_rectangular(&values)?;
        Ok(DecayGrid { values })
    }

    pub fn get(&self, pos: Position) -> Option<i32> {
        self.values
            .get(pos.y as usize)?
            .get(pos.x as usize)
            .copied()
    }

    pub fn max(&self) -> Option<i32> {
        self.values.iter().flatten().copied().max()
    }
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}

fn expect_rectangular<T>(rows: &[Vec<T>]) -> Result<usize, ParseError> {
    let Some(first) = rows.first() else {
        return Err(ParseError::Empty);
    };
    let width = first.len();
    for (y, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(ParseError::RaggedRows {
                row: y,
                found: row.len(),
                expected: width,
            });
        }
    }
    Ok(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_map() {
        let map = Map::parse("e,e,cr\ne,e,e\nur,e,e\n").unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 3);
        assert_eq!(map.get(Position::new(0, 0)), Some(Tile::Empty));
        assert_eq!(map.get(Position::new(2, 0)), Some(Tile::Claimed(Team::Red)));
        assert_eq!(map.get(Position::new(0, 2)), Some(Tile::Unclaimed(Team::Red)));
        assert_eq!(map.get(Position::new(3, 0)), None);
        assert_eq!(map.get(Position::new(0, -1)), None);
    }

    #[test]
    fn test_obstacles_are_claimed_tiles_only() {
        let map = Map::parse("e,cg,ub").unwrap();
        assert!(!map.is_obstacle(Position::new(0, 0)));
        assert!(map.is_obstacle(Position::new(1, 0)));
        assert!(!map.is_obstacle(Position::new(2, 0)));
        // Out of bounds is not an obstacle; the search checks bounds itself.
        assert!(!map.is_obstacle(Position::new(5, 5)));
    }

    #[test]
    fn test_row_major_iteration_order() {
        let map = Map::parse("e,e\ne,e").unwrap();
        let positions: Vec<Position> = map.tiles().map(|(pos, _)| pos).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_label() {
        let err = Map::parse("e,xx\ne,e").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownTile {
                label: "xx".to_string(),
                x: 1,
                y: 0
            }
        );
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = Map::parse("e,e,e\ne,e").unwrap_err();
        assert_eq!(
            err,
            ParseError::RaggedRows {
                row: 1,
                found: 2,
                expected: 3
            }
        );
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert_eq!(Map::parse("\n\n").unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn test_claimed_counts() {
        let map = Map::parse("cr,cr,cg\nub,e,cb").unwrap();
        assert_eq!(map.claimed_count(Team::Red), 2);
        assert_eq!(map.claimed_count(Team::Green), 1);
        assert_eq!(map.claimed_count(Team::Blue), 1);
    }

    #[test]
    fn test_draw_ascii() {
        let map = Map::parse("e,cr\nug,cb").unwrap();
        assert_eq!(map.draw_ascii(), ".R\ngB\n");
    }

    #[test]
    fn test_parse_decay() {
        let decay = DecayGrid::parse("0,3\n12,7\n").unwrap();
        assert_eq!(decay.get(Position::new(1, 1)), Some(7));
        assert_eq!(decay.max(), Some(12));
    }

    #[test]
    fn test_parse_decay_rejects_non_numeric() {
        let err = DecayGrid::parse("0,x").unwrap_err();
        assert_eq!(
            err,
            ParseError::BadDecayCell {
                value: "x".to_string(),
                x: 1,
                y: 0
            }
        );
    }
}
