// Library exports for the Battlesnake bot
// This allows the replay tool and the integration tests to use the core decision logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod geometry;
pub mod reachability;
pub mod replay;
pub mod scorer;
pub mod simulator;
pub mod trace;
pub mod types;
