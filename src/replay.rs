// Replay module for analyzing historical game states and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Replay the decision on historical states
// 3. Compare logged vs replayed moves
// 4. Explain every candidate's score breakdown for logged turns

use log::{info, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::{Bot, DecisionOutcome};
use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::geometry::legal_directions;
use crate::scorer::{score_move, ScoreBreakdown};
use crate::types::{Direction, Game, GameState};

/// Represents a single log entry from the debug JSONL file
pub type LogEntry = DebugLogEntry;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub outcome: DecisionOutcome,
    pub replayed_score: Option<i32>,
    pub computation_time_ms: u128,
}

/// Every legal candidate of one logged turn, best first
#[derive(Debug, Clone)]
pub struct TurnExplanation {
    pub turn: i32,
    pub logged_move: String,
    pub candidates: Vec<ScoreBreakdown>,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    /// The seed fixes candidate order and random fallbacks across runs
    pub fn new(config: Config, seed: u64, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::with_seed(config.clone(), seed),
            config,
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Rebuilds the request snapshot a log entry was decided on
    pub fn state_from_entry(&self, entry: &LogEntry) -> Result<GameState, String> {
        let you = entry
            .board
            .snakes
            .iter()
            .find(|s| s.id == entry.you_id)
            .ok_or_else(|| {
                format!(
                    "Snake with id '{}' not found in board state",
                    entry.you_id
                )
            })?
            .clone();

        Ok(GameState {
            game: Game {
                id: entry.game_id.clone(),
                ruleset: HashMap::new(),
                timeout: 0,
                source: "replay".to_string(),
            },
            turn: entry.turn,
            board: entry.board.clone(),
            you,
        })
    }

    /// Replays a single log entry and compares the result
    pub async fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let original_move = Direction::parse(&entry.chosen_move)?;
        let state = self.state_from_entry(entry)?;

        let start_time = Instant::now();
        let decision = self
            .bot
            .decide_detailed(&state)
            .await
            .map_err(|e| format!("Turn {}: {}", entry.turn, e))?;
        let computation_time = start_time.elapsed().as_millis();

        let matches = original_move == decision.direction;
        let result = ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move: decision.direction,
            matches,
            outcome: decision.outcome,
            replayed_score: decision.score,
            computation_time_ms: computation_time,
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} ({:?}, score: {:?}, time: {}ms)",
                    entry.turn,
                    result.replayed_move,
                    result.outcome,
                    result.replayed_score,
                    computation_time
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {}, Replayed: {} ({:?}, score: {:?}, time: {}ms)",
                    entry.turn,
                    original_move,
                    result.replayed_move,
                    result.outcome,
                    result.replayed_score,
                    computation_time
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file
    pub async fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                }
            }
        }

        results
    }

    /// Replays specific turns from a log file
    pub async fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Scores every legal candidate of every entry, without a deadline
    ///
    /// Turns are explained in parallel on the rayon pool; output keeps log order.
    pub fn explain_all(&self, entries: &[LogEntry]) -> Vec<TurnExplanation> {
        entries
            .par_iter()
            .filter_map(|entry| match self.explain_entry(entry) {
                Ok(explanation) => Some(explanation),
                Err(e) => {
                    warn!("Failed to explain turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Scores every legal candidate of one entry, best first
    pub fn explain_entry(&self, entry: &LogEntry) -> Result<TurnExplanation, String> {
        let state = self.state_from_entry(entry)?;

        let mut candidates = legal_directions(&state.you, &state.board)
            .into_iter()
            .map(|dir| score_move(&state, dir, &self.config.scores))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Turn {}: {}", entry.turn, e))?;
        candidates.sort_by(|a, b| b.total.cmp(&a.total));

        Ok(TurnExplanation {
            turn: entry.turn,
            logged_move: entry.chosen_move.clone(),
            candidates,
        })
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_ms as f64)
                .sum::<f64>()
                / results.len() as f64;
            let timeouts = results
                .iter()
                .filter(|r| {
                    matches!(
                        r.outcome,
                        DecisionOutcome::PartialBestScore | DecisionOutcome::RandomFallback
                    )
                })
                .count();

            println!("Average Computation Time:   {:.1}ms", avg_time);
            println!("Turns Past Deadline:        {}\n", timeouts);
        }

        // Show mismatches in detail
        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {} ({:?}, score: {:?}, time: {}ms)",
                    result.turn,
                    result.original_move,
                    result.replayed_move,
                    result.outcome,
                    result.replayed_score,
                    result.computation_time_ms
                );
            }
            println!();
        }
    }

    /// Prints each explained turn with its candidates' score terms
    pub fn print_explanations(&self, explanations: &[TurnExplanation]) {
        for explanation in explanations {
            println!(
                "Turn {} (logged: {})",
                explanation.turn, explanation.logged_move
            );
            if explanation.candidates.is_empty() {
                println!("  no legal move");
            }
            for candidate in &explanation.candidates {
                println!(
                    "  score going {}: {} (space {}, food {}, heads {})",
                    candidate.direction,
                    candidate.total,
                    candidate.open_space,
                    candidate.food,
                    candidate.head_collision
                );
                println!("{}", candidate.trace);
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move = Direction::parse(&entry.chosen_move)?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move
                ));
            }
        }

        Ok(())
    }
}
