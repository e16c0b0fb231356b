// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Game {
    pub id: String,
    #[serde(default)]
    pub ruleset: HashMap<String, Value>,
    /// Milliseconds the game server waits for a move
    #[serde(default)]
    pub timeout: u32,
    #[serde(default)]
    pub source: String,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Battlesnake {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    pub length: i32,
    #[serde(default)]
    pub latency: String,
    #[serde(default)]
    pub shout: Option<String>,
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions, in the order legal moves are generated
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Parses an API direction string, ignoring case
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_apply_moves_one_cell() {
        let c = Coord::new(3, 3);
        assert_eq!(Direction::Up.apply(&c), Coord::new(3, 4));
        assert_eq!(Direction::Down.apply(&c), Coord::new(3, 2));
        assert_eq!(Direction::Left.apply(&c), Coord::new(2, 3));
        assert_eq!(Direction::Right.apply(&c), Coord::new(4, 3));
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(Direction::parse("up").unwrap(), Direction::Up);
        assert_eq!(Direction::parse("Down").unwrap(), Direction::Down);
        assert_eq!(Direction::parse("LEFT").unwrap(), Direction::Left);
        assert_eq!(Direction::parse(" right ").unwrap(), Direction::Right);
        assert!(Direction::parse("sideways").is_err());
    }

    #[test]
    fn test_game_state_deserializes_minimal_request() {
        let raw = r#"{
            "game": {"id": "g1", "timeout": 500},
            "turn": 4,
            "board": {
                "height": 11,
                "width": 11,
                "food": [{"x": 1, "y": 1}],
                "snakes": [{
                    "id": "me",
                    "health": 90,
                    "body": [{"x": 5, "y": 5}, {"x": 5, "y": 4}],
                    "head": {"x": 5, "y": 5},
                    "length": 2
                }]
            },
            "you": {
                "id": "me",
                "health": 90,
                "body": [{"x": 5, "y": 5}, {"x": 5, "y": 4}],
                "head": {"x": 5, "y": 5},
                "length": 2
            }
        }"#;

        let state: GameState = serde_json::from_str(raw).expect("request should parse");
        assert_eq!(state.game.timeout, 500);
        assert_eq!(state.board.snakes.len(), 1);
        assert!(state.board.hazards.is_empty());
        assert_eq!(state.you.shout, None);
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), "\"left\"");
        let d: Direction = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(d, Direction::Right);
    }
}
