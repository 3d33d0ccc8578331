use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Mock random sequence must contain at least one value")]
    EmptyMockSequence,

    #[error("Mock random value out of range [0, 1): {0}")]
    MockValueOutOfRange(f64),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MatchError {
    /// Whether the caller can retry with corrected input.
    pub fn is_recoverable(&self) -> bool {
        match self {
            MatchError::InvalidConfig(_) => true,
            MatchError::SchemaVersion { .. } => true,
            MatchError::Json(_) => true,
            MatchError::Io(_) => true,
            MatchError::EmptyMockSequence => false,
            MatchError::MockValueOutOfRange(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
