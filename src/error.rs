// Engine errors
//
// These only describe malformed snapshots. Running out of moves or out of time
// are ordinary outcomes of a decision and never surface as errors.

/// A snapshot the engine refuses to decide on
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("snake '{id}' is not on its own board")]
    SnakeNotFound { id: String },
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("snake '{id}' has an empty body")]
    EmptyBody { id: String },
}
