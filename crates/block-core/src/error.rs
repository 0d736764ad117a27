use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate block kind id: {0}")]
    DuplicateKind(String),
    #[error("block kind id must not be empty")]
    EmptyId,
    #[error("block kind {id:?} has an empty tag")]
    EmptyTag { id: String },
    #[error("block kind id {0:?} is reserved for the default paragraph")]
    Reserved(String),
    #[error("failed to parse block kind registry: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("trigger {0:?} must be a printable, non-whitespace character")]
    InvalidTrigger(char),
    #[error("trigger {0:?} is a digit and would collide with typed palette indices")]
    DigitTrigger(char),
    #[error("menu gap must be finite, got {0}")]
    InvalidMenuGap(f32),
    #[error("failed to parse editor config: {0}")]
    Json(#[from] serde_json::Error),
}
