//! Errors raised while loading catalog or lane data.
//!
//! The simulation itself has no error paths; these only surface when
//! external data is parsed and validated before a match starts.

/// Catalog data failed to parse or violated an invariant.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid unit archetype '{id}': {reason}")]
    InvalidUnit { id: String, reason: &'static str },
    #[error("invalid enemy archetype '{id}': {reason}")]
    InvalidEnemy { id: String, reason: &'static str },
    #[error("invalid stage {id}: {reason}")]
    InvalidStage { id: u32, reason: &'static str },
    #[error("duplicate catalog id: {0}")]
    DuplicateId(String),
}

/// Lane configuration failed to parse or is geometrically impossible.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("lane config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid lane config: {0}")]
    Invalid(&'static str),
}
