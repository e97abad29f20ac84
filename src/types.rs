#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance.
    pub fn distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn neighbors(&self) -> [Position; 4] {
        [
            Position::new(self.x, self.y - 1), // North
            Position::new(self.x + 1, self.y), // East
            Position::new(self.x, self.y + 1), // South
            Position::new(self.x - 1, self.y), // West
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Red,
    Green,
    Blue,
}

impl Team {
    /// Wire codes combine a claim-state prefix (`c` claimed, `u` unclaimed)
    /// with a team color suffix.
    pub fn from_code(code: &str) -> Option<Team> {
        match code {
            "cr" | "ur" => Some(Team::Red),
            "cg" | "ug" => Some(Team::Green),
            "cb" | "ub" => Some(Team::Blue),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Team> {
        match name.to_ascii_lowercase().as_str() {
            "red" => Some(Team::Red),
            "green" => Some(Team::Green),
            "blue" => Some(Team::Blue),
            _ => None,
        }
    }
}

/// One action per tick, written verbatim to the player's `act` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    Idle,
}

impl Move {
    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
            Move::Idle => "idle",
        }
    }
}
