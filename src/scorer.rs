// Move scoring heuristic
//
// One candidate direction is scored by simulating the move and summing three
// terms: open space after the move, food urgency near starvation, and the risk
// of a head-to-head encounter on the next turn.

use crate::config::ScoresConfig;
use crate::error::EngineError;
use crate::geometry::{has_adjacent_food, is_adjacent, is_over_food};
use crate::reachability::free_cell_count;
use crate::simulator::{advance, apply_snake};
use crate::trace::TraceLog;
use crate::types::{Direction, GameState};

/// Contributing terms of one candidate's score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub direction: Direction,
    pub open_space: i32,
    pub food: i32,
    pub head_collision: i32,
    pub total: i32,
    pub trace: TraceLog,
}

/// Scores moving `you` one step in `dir`
pub fn score_move(
    state: &GameState,
    dir: Direction,
    scores: &ScoresConfig,
) -> Result<ScoreBreakdown, EngineError> {
    let you = &state.you;
    let next = advance(you, &state.board, dir);
    let board = apply_snake(&next, &state.board)?;
    let mut trace = TraceLog::with_prefix("    ");

    let open_space = free_cell_count(&board, next.head) as i32;
    trace.log(format!("{} from free cells", open_space));

    let mut food = 0;
    if next.health < scores.health_low_threshold && is_over_food(next.head, &board) {
        food = 1 + scores.food_bonus_numerator / next.health.max(1);
        trace.log(format!("{} because over food", food));
    } else if next.health < scores.health_critical_threshold && has_adjacent_food(next.head, &board)
    {
        food = scores.starvation_food_bonus;
        trace.log(format!("{} for starving next to food", food));
    }

    // Lengths compared as of the snapshot; opponents have not moved yet
    let mut head_collision = 0;
    for other in board.snakes.iter().filter(|s| s.id != next.id) {
        if !is_adjacent(other.head, next.head) {
            continue;
        }
        if you.length > other.length {
            head_collision += scores.head_collision_win_bonus;
            trace.log(format!(
                "{} for getting closer to shorter snake {}",
                scores.head_collision_win_bonus, other.id
            ));
        } else {
            head_collision += scores.head_collision_penalty;
            trace.log(format!(
                "{} for getting closer to snake {} that is not shorter",
                scores.head_collision_penalty, other.id
            ));
        }
    }

    Ok(ScoreBreakdown {
        direction: dir,
        open_space,
        food,
        head_collision,
        total: open_space + food + head_collision,
        trace,
    })
}
