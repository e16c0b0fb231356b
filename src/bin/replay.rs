// Standalone replay tool for analyzing Battlesnake debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all turns
//   --turns <turn1,turn2>  Replay specific turns (comma-separated)
//   --explain              Print every candidate's score breakdown
//   --validate             Run validation mode with expected moves
//   --seed <n>             Seed for candidate order and random fallbacks
//   --verbose              Show detailed output for each turn
//   --config <path>        Path to Snake.toml (default: Snake.toml)

use std::env;
use std::process;

use scoresnake::config::Config;
use scoresnake::replay::ReplayEngine;
use scoresnake::types::Direction;

fn print_usage() {
    eprintln!("Battlesnake Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all turns in the log");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --explain               Score every legal candidate of every turn");
    eprintln!("  --validate <T:M,...>    Validate expected moves (format: turn:move,...)");
    eprintln!("  --seed <N>              RNG seed (default: 0)");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  # Replay all turns");
    eprintln!("  replay battlesnake_debug.jsonl --all");
    eprintln!();
    eprintln!("  # Replay specific turns");
    eprintln!("  replay battlesnake_debug.jsonl --turns 5,10,15");
    eprintln!();
    eprintln!("  # Show why each move scored the way it did");
    eprintln!("  replay battlesnake_debug.jsonl --explain");
    eprintln!();
    eprintln!("  # Validate expected moves");
    eprintln!("  replay battlesnake_debug.jsonl --validate 5:up,10:right|down");
}

fn parse_turns(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(i32, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.trim().split(':').collect();
            if parts.len() != 2 {
                return Err(format!("Invalid format '{}'. Expected 'turn:move'", pair));
            }

            let turn = parts[0]
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", parts[0], e))?;

            // Support multiple acceptable moves separated by '|'
            let moves: Result<Vec<Direction>, String> =
                parts[1].split('|').map(Direction::parse).collect();

            Ok((turn, moves?))
        })
        .collect()
}

enum Mode {
    All,
    Turns(Vec<i32>),
    Explain,
    Validate(Vec<(i32, Vec<Direction>)>),
}

/// Returns the value following a flag, exiting when it is missing
fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(value) => value,
        None => {
            eprintln!("Error: {} requires an argument", flag);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logger
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(if args.contains(&"--help".to_string()) {
            0
        } else {
            1
        });
    }

    let log_file = &args[1];
    let mut config_path = "Snake.toml".to_string();
    let mut verbose = false;
    let mut seed = 0u64;
    let mut mode = None;

    // Parse arguments
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => {
                mode = Some(Mode::All);
            }
            "--explain" => {
                mode = Some(Mode::Explain);
            }
            "--turns" => {
                let turns = parse_turns(flag_value(&args, i, "--turns")).unwrap_or_else(|e| {
                    eprintln!("Error parsing turns: {}", e);
                    process::exit(1);
                });
                mode = Some(Mode::Turns(turns));
                i += 1;
            }
            "--validate" => {
                let expected = parse_expected_moves(flag_value(&args, i, "--validate"))
                    .unwrap_or_else(|e| {
                        eprintln!("Error parsing expected moves: {}", e);
                        process::exit(1);
                    });
                mode = Some(Mode::Validate(expected));
                i += 1;
            }
            "--seed" => {
                seed = flag_value(&args, i, "--seed").parse().unwrap_or_else(|e| {
                    eprintln!("Error: invalid seed: {}", e);
                    process::exit(1);
                });
                i += 1;
            }
            "--config" => {
                config_path = flag_value(&args, i, "--config").to_string();
                i += 1;
            }
            "--verbose" => {
                verbose = true;
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mode = match mode {
        Some(mode) => mode,
        None => {
            eprintln!("Error: Must specify --all, --turns, --explain, or --validate");
            print_usage();
            process::exit(1);
        }
    };

    // Load configuration
    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(config, seed, verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    println!("Loaded {} log entries\n", entries.len());

    match mode {
        Mode::All => {
            println!("Replaying all {} turns...\n", entries.len());
            let results = engine.replay_all(&entries).await;
            engine.print_report(&results);
        }
        Mode::Turns(turns) => {
            println!("Replaying {} specific turn(s)...\n", turns.len());
            match engine.replay_turns(&entries, &turns).await {
                Ok(results) => {
                    engine.print_report(&results);
                }
                Err(e) => {
                    eprintln!("Error during replay: {}", e);
                    process::exit(1);
                }
            }
        }
        Mode::Explain => {
            let explanations = engine.explain_all(&entries);
            engine.print_explanations(&explanations);
        }
        Mode::Validate(expected_moves) => {
            println!("Validating {} expected move(s)...\n", expected_moves.len());
            match engine.validate_expected_moves(&entries, &expected_moves) {
                Ok(()) => {
                    println!("✓ All expected moves validated successfully!");
                }
                Err(e) => {
                    eprintln!("✗ Validation failed: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
