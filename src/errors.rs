use std::fmt;

use thiserror::Error;

/// Source dimension reported by a minimum-size rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Width => f.write_str("Width"),
            Dimension::Height => f.write_str("Height"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    #[error("{dimension} of the source image is {actual}, smaller than the standard size of {min}")]
    SourceTooSmall {
        dimension: Dimension,
        actual: u32,
        min: u32,
    },
    #[error("Source image has zero width or height")]
    ZeroSourceDimension,
    #[error("Target width and height must be greater than zero")]
    ZeroTargetDimension,
    #[error("Resize ratio must be a positive, finite number")]
    InvalidRatio,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurError {
    #[error("Block size of the box blur must be greater than zero")]
    ZeroBlockSize,
}

/// Failure inside a codec engine, tagged with the pipeline stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Failed to decode source image: {0}")]
    Decode(String),
    #[error("Failed to resize image: {0}")]
    Resize(String),
    #[error("Failed to composite image onto canvas: {0}")]
    Composite(String),
    #[error("Failed to encode result image: {0}")]
    Encode(String),
}

/// Any failure of the letterbox pipeline.
///
/// Plan errors are kept apart from engine errors so that callers can treat
/// "image is smaller than the standard size" differently from decoder and
/// encoder failures.
#[derive(Error, Debug)]
pub enum LetterboxError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Blur(#[from] BlurError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
