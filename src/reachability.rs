// Reachability analysis
//
// Flood fill from a point over the 4-connected grid, counting cells that are on
// the board and free of snake bodies. Used as the "room left after this move"
// proxy by the scorer.

use std::collections::{HashSet, VecDeque};

use crate::geometry::{is_off_board, step};
use crate::types::{Board, Coord, Direction};

/// Number of free cells reachable from `origin`, not counting `origin` itself
pub fn free_cell_count(board: &Board, origin: Coord) -> usize {
    free_cell_count_with_order(board, origin, &Direction::all())
}

/// Same as [`free_cell_count`], expanding neighbours in the given order
///
/// The count does not depend on `order`; it only changes traversal sequence.
pub fn free_cell_count_with_order(board: &Board, origin: Coord, order: &[Direction]) -> usize {
    if is_off_board(origin, board) {
        return 0;
    }

    let taken: HashSet<Coord> = board
        .snakes
        .iter()
        .flat_map(|s| s.body.iter().copied())
        .collect();

    let mut seen = HashSet::new();
    seen.insert(origin);
    let mut queue = VecDeque::new();
    queue.push_back(origin);
    let mut free = 0;

    while let Some(cell) = queue.pop_front() {
        for &dir in order {
            let next = step(cell, dir);
            if is_off_board(next, board) || taken.contains(&next) || !seen.insert(next) {
                continue;
            }
            free += 1;
            queue.push_back(next);
        }
    }

    free
}
