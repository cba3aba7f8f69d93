use thiserror::Error;

/// Errors raised while creating a match
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("no rendering surface available")]
    MissingSurface,

    #[error("playfield {width}x{height} is too small for the configured paddles")]
    FieldTooSmall { width: f32, height: f32 },
}
