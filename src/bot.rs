// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// Move decision: filter legal moves, score each candidate concurrently under a
// deadline, and play the best score seen in time.

use log::{debug, info, warn};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::error::EngineError;
use crate::geometry::legal_directions;
use crate::scorer::{score_move, ScoreBreakdown};
use crate::trace::DecisionTrace;
use crate::types::{Battlesnake, Board, Direction, Game, GameState};

/// How the final direction of a turn was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// Every direction was blocked; the configured fallback was played
    NoLegalMove,
    /// Exactly one legal direction, nothing to score
    OnlyChoice,
    /// Every candidate finished before the deadline
    BestScore,
    /// The deadline fired; best of the candidates that reported
    PartialBestScore,
    /// No candidate reported in time; uniform pick among legal directions
    RandomFallback,
}

/// The direction played this turn and how it was chosen
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub direction: Direction,
    pub outcome: DecisionOutcome,
    /// Composite score of the chosen candidate, when one was scored
    pub score: Option<i32>,
    /// Legal directions, in evaluation order
    pub candidates: Vec<Direction>,
    /// Number of candidates whose score arrived before the decision
    pub reported: usize,
}

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    rng: Mutex<StdRng>,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            rng: Mutex::new(StdRng::from_os_rng()),
            debug_logger: DebugLogger::disabled(),
        }
    }

    /// Creates a Bot whose evaluation order and random fallbacks are reproducible
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Bot {
            config,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            debug_logger: DebugLogger::disabled(),
        }
    }

    /// Attaches a JSONL decision log
    pub fn with_debug_logger(mut self, debug_logger: DebugLogger) -> Self {
        self.debug_logger = debug_logger;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, board: &Board, you: &Battlesnake) {
        info!(
            "GAME START {} ({}x{}, {} snakes, you are {})",
            game.id,
            board.width,
            board.height,
            board.snakes.len(),
            you.id
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Computes the next move and wraps it as the API response body
    /// Corresponds to POST /move endpoint
    pub async fn get_move(&self, state: &GameState) -> Result<Value, EngineError> {
        let decision = self.decide_detailed(state).await?;

        self.debug_logger.log_move(
            &state.game.id,
            state.turn,
            &state.you.id,
            state.board.clone(),
            decision.direction,
            decision.outcome,
        );

        Ok(json!({ "move": decision.direction.as_str() }))
    }

    /// Picks the direction to play for this snapshot
    pub async fn decide(&self, state: &GameState) -> Result<Direction, EngineError> {
        self.decide_detailed(state).await.map(|d| d.direction)
    }

    /// Like [`Bot::decide`], reporting how the direction was reached
    pub async fn decide_detailed(&self, state: &GameState) -> Result<Decision, EngineError> {
        let scores = self.config.scores.clone();
        self.decide_with(state, move |state: &GameState, dir| {
            score_move(state, dir, &scores)
        })
        .await
    }

    /// Runs the decision with a caller-supplied scoring function
    ///
    /// Each legal candidate is scored on tokio's blocking pool. The turn commits
    /// when every candidate has reported or when the deadline fires, whichever
    /// comes first; candidates still running at that point are abandoned and
    /// their results dropped. A candidate that errors or panics is treated as
    /// never having reported.
    pub async fn decide_with<F>(&self, state: &GameState, scorer: F) -> Result<Decision, EngineError>
    where
        F: Fn(&GameState, Direction) -> Result<ScoreBreakdown, EngineError> + Send + Sync + 'static,
    {
        let start_time = Instant::now();
        Self::validate(state)?;

        let turn = state.turn;
        let mut candidates = legal_directions(&state.you, &state.board);

        match candidates.len() {
            0 => {
                let direction = self.config.decision.fallback_direction;
                warn!("Turn {}: there is no tomorrow, no safe move; playing {}", turn, direction);
                return Ok(Decision {
                    direction,
                    outcome: DecisionOutcome::NoLegalMove,
                    score: None,
                    candidates,
                    reported: 0,
                });
            }
            1 => {
                let direction = candidates[0];
                info!("Turn {}: one choice only: {}", turn, direction);
                return Ok(Decision {
                    direction,
                    outcome: DecisionOutcome::OnlyChoice,
                    score: None,
                    candidates,
                    reported: 0,
                });
            }
            _ => {}
        }

        candidates.shuffle(&mut *self.rng.lock());

        let deadline = start_time + self.config.timing.deadline(state.game.timeout);
        let shared_state = Arc::new(state.clone());
        let scorer = Arc::new(scorer);

        let mut tasks = JoinSet::new();
        for &dir in &candidates {
            let state = Arc::clone(&shared_state);
            let scorer = Arc::clone(&scorer);
            tasks.spawn_blocking(move || scorer(&*state, dir));
        }

        let mut best: Option<ScoreBreakdown> = None;
        let mut trace = DecisionTrace::new();
        let mut reported = 0;
        let mut timed_out = false;

        loop {
            match tokio::time::timeout_at(deadline, tasks.join_next()).await {
                Err(_) => {
                    timed_out = true;
                    break;
                }
                Ok(None) => break,
                Ok(Some(Ok(Ok(mut score)))) => {
                    reported += 1;
                    trace.merge(
                        format!("score going {}: {}", score.direction, score.total),
                        std::mem::take(&mut score.trace),
                    );
                    if best.as_ref().map_or(true, |b| score.total > b.total) {
                        best = Some(score);
                    }
                }
                Ok(Some(Ok(Err(e)))) => {
                    warn!("Turn {}: candidate could not be scored: {}", turn, e);
                }
                Ok(Some(Err(e))) => {
                    warn!("Turn {}: scoring task failed: {}", turn, e);
                }
            }
        }

        // Queued candidates are cancelled; running ones finish and their results are dropped
        tasks.abort_all();

        if !trace.is_empty() {
            debug!("Turn {}: candidate scores\n{}", turn, trace);
        }

        let decision = match best {
            Some(best) => Decision {
                direction: best.direction,
                outcome: if timed_out {
                    DecisionOutcome::PartialBestScore
                } else {
                    DecisionOutcome::BestScore
                },
                score: Some(best.total),
                candidates,
                reported,
            },
            None => {
                let picked = candidates.choose(&mut *self.rng.lock()).copied();
                Decision {
                    direction: picked.unwrap_or(self.config.decision.fallback_direction),
                    outcome: DecisionOutcome::RandomFallback,
                    score: None,
                    candidates,
                    reported,
                }
            }
        };

        if timed_out {
            warn!(
                "Turn {}: running out of time, {}/{} candidates reported",
                turn,
                reported,
                decision.candidates.len()
            );
        }

        info!(
            "Turn {}: Chose {} ({:?}, score: {:?}, time: {}ms)",
            turn,
            decision.direction,
            decision.outcome,
            decision.score,
            start_time.elapsed().as_millis()
        );

        Ok(decision)
    }

    /// Rejects snapshots the engine cannot reason about
    fn validate(state: &GameState) -> Result<(), EngineError> {
        let board = &state.board;
        if board.width <= 0 || board.height <= 0 {
            return Err(EngineError::InvalidDimensions {
                width: board.width,
                height: board.height,
            });
        }
        if state.you.body.is_empty() {
            return Err(EngineError::EmptyBody {
                id: state.you.id.clone(),
            });
        }
        if !board.snakes.iter().any(|s| s.id == state.you.id) {
            return Err(EngineError::SnakeNotFound {
                id: state.you.id.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;
    use std::collections::HashMap;

    fn state_with(you_id: &str, width: i32, body: Vec<Coord>) -> GameState {
        let you = Battlesnake {
            id: "me".to_string(),
            name: "me".to_string(),
            health: 100,
            head: body.first().copied().unwrap_or(Coord::new(0, 0)),
            length: body.len() as i32,
            body,
            latency: String::new(),
            shout: None,
        };
        let mut on_board = you.clone();
        on_board.id = you_id.to_string();
        GameState {
            game: Game {
                id: "g".to_string(),
                ruleset: HashMap::new(),
                timeout: 500,
                source: String::new(),
            },
            turn: 0,
            board: Board {
                width,
                height: 11,
                food: vec![],
                snakes: vec![on_board],
                hazards: vec![],
            },
            you,
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_snapshot() {
        let s = state_with("me", 11, vec![Coord::new(5, 5)]);
        assert_eq!(Bot::validate(&s), Ok(()));
    }

    #[test]
    fn test_validate_rejects_missing_snake() {
        let s = state_with("someone-else", 11, vec![Coord::new(5, 5)]);
        assert_eq!(
            Bot::validate(&s),
            Err(EngineError::SnakeNotFound {
                id: "me".to_string()
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_dimensions() {
        let s = state_with("me", 0, vec![Coord::new(5, 5)]);
        assert_eq!(
            Bot::validate(&s),
            Err(EngineError::InvalidDimensions {
                width: 0,
                height: 11
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_body() {
        let s = state_with("me", 11, vec![]);
        assert_eq!(
            Bot::validate(&s),
            Err(EngineError::EmptyBody {
                id: "me".to_string()
            })
        );
    }

    #[test]
    fn test_info_reports_configured_appearance() {
        let bot = Bot::with_seed(Config::default_hardcoded(), 1);
        let info = bot.info();
        assert_eq!(info["apiversion"], "1");
        assert_eq!(info["color"], "#FF0000");
        assert_eq!(info["head"], "bendr");
    }

    #[test]
    fn test_decision_outcome_serializes_snake_case() {
        let s = serde_json::to_string(&DecisionOutcome::PartialBestScore).unwrap();
        assert_eq!(s, "\"partial_best_score\"");
    }
}
