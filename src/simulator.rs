// One-step board simulation
//
// Produces the hypothetical snake and board after a single move. Food is never
// consumed here: the game server owns that effect, the simulator only decides
// whether the snake grows.

use crate::error::EngineError;
use crate::geometry::{is_over_food, step};
use crate::types::{Battlesnake, Board, Direction};

/// Moves a snake one step, growing it when the new head lands on food
///
/// The returned head may be off the board; callers treat that as a dead move.
pub fn advance(snake: &Battlesnake, board: &Board, dir: Direction) -> Battlesnake {
    let original_len = snake.body.len();
    let head = step(snake.head, dir);

    let mut body = Vec::with_capacity(original_len + 1);
    body.push(head);
    body.extend_from_slice(&snake.body);

    let mut length = snake.length;
    if is_over_food(head, board) {
        length += 1;
    } else {
        body.truncate(original_len);
    }

    Battlesnake {
        head,
        body,
        length,
        ..snake.clone()
    }
}

/// Returns a copy of `board` with the snake sharing `updated`'s id replaced
pub fn apply_snake(updated: &Battlesnake, board: &Board) -> Result<Board, EngineError> {
    let index = board
        .snakes
        .iter()
        .position(|s| s.id == updated.id)
        .ok_or_else(|| EngineError::SnakeNotFound {
            id: updated.id.clone(),
        })?;

    let mut next = board.clone();
    next.snakes[index] = updated.clone();
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health: 80,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: String::new(),
            shout: None,
        }
    }

    fn board(food: &[(i32, i32)], snakes: Vec<Battlesnake>) -> Board {
        Board {
            width: 11,
            height: 11,
            food: food.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
            snakes,
            hazards: vec![],
        }
    }

    #[test]
    fn test_advance_without_food_drops_tail() {
        let me = snake("me", &[(5, 5), (5, 4), (5, 3)]);
        let b = board(&[], vec![me.clone()]);

        let next = advance(&me, &b, Direction::Up);
        assert_eq!(next.head, Coord::new(5, 6));
        assert_eq!(
            next.body,
            vec![Coord::new(5, 6), Coord::new(5, 5), Coord::new(5, 4)]
        );
        assert_eq!(next.length, 3);
        assert_eq!(next.health, me.health);
    }

    #[test]
    fn test_advance_onto_food_grows() {
        let me = snake("me", &[(5, 5), (5, 4), (5, 3)]);
        let b = board(&[(6, 5)], vec![me.clone()]);

        let next = advance(&me, &b, Direction::Right);
        assert_eq!(next.length, 4);
        assert_eq!(next.body.len(), 4);
        assert_eq!(next.body[0], Coord::new(6, 5));
        assert_eq!(*next.body.last().unwrap(), Coord::new(5, 3));
        // Food stays on the board
        assert_eq!(b.food, vec![Coord::new(6, 5)]);
    }

    #[test]
    fn test_advance_may_leave_the_board() {
        let me = snake("me", &[(0, 5), (1, 5), (2, 5)]);
        let b = board(&[], vec![me.clone()]);

        let next = advance(&me, &b, Direction::Left);
        assert_eq!(next.head, Coord::new(-1, 5));
    }

    #[test]
    fn test_apply_snake_preserves_other_snakes() {
        let me = snake("me", &[(5, 5), (5, 4), (5, 3)]);
        let a = snake("a", &[(1, 1), (1, 2), (1, 3)]);
        let c = snake("c", &[(9, 9), (9, 8)]);
        let b = board(&[(0, 0)], vec![a.clone(), me.clone(), c.clone()]);

        let next = advance(&me, &b, Direction::Left);
        let next_board = apply_snake(&next, &b).unwrap();

        assert_eq!(next_board.snakes.len(), 3);
        assert_eq!(next_board.snakes[0], a);
        assert_eq!(next_board.snakes[1], next);
        assert_eq!(next_board.snakes[2], c);
        assert_eq!(next_board.food, b.food);
    }

    #[test]
    fn test_apply_snake_unknown_id_is_an_error() {
        let me = snake("me", &[(5, 5), (5, 4)]);
        let stranger = snake("stranger", &[(2, 2), (2, 1)]);
        let b = board(&[], vec![me]);

        assert_eq!(
            apply_snake(&stranger, &b),
            Err(EngineError::SnakeNotFound {
                id: "stranger".to_string()
            })
        );
    }
}
