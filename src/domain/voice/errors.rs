//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VoiceError {
    #[error("Voice ID cannot be empty")]
    EmptyVoiceId,

    #[error("Voice weight must be between 0 and 1, got {0}")]
    WeightOutOfRange(f64),

    #[error("At least one voice is required")]
    EmptyMix,

    #[error("Embedding cannot be empty")]
    EmptyEmbedding,

    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
}
