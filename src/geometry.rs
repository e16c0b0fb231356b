// Grid geometry: stepping, bounds, distances and legal move generation

use crate::types::{Battlesnake, Board, Coord, Direction};

/// Coordinate one cell away from `c` in direction `d`
pub fn step(c: Coord, d: Direction) -> Coord {
    d.apply(&c)
}

/// Checks if a coordinate is outside the board
pub fn is_off_board(c: Coord, board: &Board) -> bool {
    c.x < 0 || c.y < 0 || c.x >= board.width || c.y >= board.height
}

/// Calculates Manhattan distance between two coordinates
pub fn manhattan_distance(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

pub fn is_adjacent(a: Coord, b: Coord) -> bool {
    manhattan_distance(a, b) == 1
}

/// Checks if any snake body segment (heads included) sits on the coordinate
pub fn is_occupied(c: Coord, board: &Board) -> bool {
    board.snakes.iter().any(|s| s.body.contains(&c))
}

pub fn is_over_food(c: Coord, board: &Board) -> bool {
    board.food.contains(&c)
}

pub fn has_adjacent_food(c: Coord, board: &Board) -> bool {
    board.food.iter().any(|&f| is_adjacent(c, f))
}

/// Generates all legal moves for a snake
/// A move is legal if it:
/// - Doesn't go out of bounds
/// - Doesn't land on any current body segment of any snake, its own included
///
/// Directions come back in `Direction::all()` order.
pub fn legal_directions(snake: &Battlesnake, board: &Board) -> Vec<Direction> {
    Direction::all()
        .iter()
        .filter(|&&dir| {
            let next = step(snake.head, dir);
            !is_off_board(next, board) && !is_occupied(next, board)
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health: 100,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: String::new(),
            shout: None,
        }
    }

    fn board(width: i32, height: i32, snakes: Vec<Battlesnake>) -> Board {
        Board {
            width,
            height,
            food: vec![],
            snakes,
            hazards: vec![],
        }
    }

    #[test]
    fn test_off_board_edges() {
        let b = board(11, 11, vec![]);
        assert!(is_off_board(Coord::new(-1, 5), &b));
        assert!(is_off_board(Coord::new(5, -1), &b));
        assert!(is_off_board(Coord::new(11, 5), &b));
        assert!(is_off_board(Coord::new(5, 11), &b));
        assert!(!is_off_board(Coord::new(0, 0), &b));
        assert!(!is_off_board(Coord::new(10, 10), &b));
    }

    #[test]
    fn test_distance_and_adjacency() {
        let a = Coord::new(2, 3);
        assert_eq!(manhattan_distance(a, Coord::new(5, 1)), 5);
        assert_eq!(manhattan_distance(a, a), 0);
        assert!(is_adjacent(a, Coord::new(2, 4)));
        assert!(!is_adjacent(a, Coord::new(3, 4)));
        assert!(!is_adjacent(a, a));
    }

    #[test]
    fn test_legal_directions_excludes_neck_and_walls() {
        // Head in the bottom-left corner, neck to the right
        let me = snake("me", &[(0, 0), (1, 0), (2, 0)]);
        let b = board(11, 11, vec![me.clone()]);
        assert_eq!(legal_directions(&me, &b), vec![Direction::Up]);
    }

    #[test]
    fn test_legal_directions_excludes_opponent_bodies() {
        let me = snake("me", &[(5, 5), (5, 4), (5, 3)]);
        let other = snake("other", &[(6, 6), (6, 5), (6, 4)]);
        let b = board(11, 11, vec![me.clone(), other]);
        assert_eq!(legal_directions(&me, &b), vec![Direction::Up, Direction::Left]);
    }

    #[test]
    fn test_legal_directions_counts_tail_as_occupied() {
        // Tail at (4, 5) would vacate next turn but is still blocked
        let me = snake("me", &[(5, 5), (5, 4), (4, 4), (4, 5)]);
        let b = board(11, 11, vec![me.clone()]);
        assert_eq!(legal_directions(&me, &b), vec![Direction::Up, Direction::Right]);
    }

    #[test]
    fn test_legal_directions_never_unsafe() {
        let me = snake("me", &[(1, 1), (1, 0), (0, 0), (0, 1), (0, 2)]);
        let other = snake("other", &[(2, 2), (2, 1), (3, 1)]);
        let b = board(4, 4, vec![me.clone(), other]);
        for d in legal_directions(&me, &b) {
            let next = step(me.head, d);
            assert!(!is_off_board(next, &b));
            assert!(!is_occupied(next, &b));
        }
    }

    #[test]
    fn test_legal_directions_boxed_in_is_empty() {
        let me = snake("me", &[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let b = board(2, 2, vec![me.clone()]);
        assert!(legal_directions(&me, &b).is_empty());
    }
}
