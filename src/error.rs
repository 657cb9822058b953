use std::path::PathBuf;
use thiserror::Error;

/// The main error type for vlprep operations.
#[derive(Debug, Error)]
pub enum VlprepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse JSONL line {line} of {path}: {source}")]
    JsonlParse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown dataset '{name}' (not present in the registry)")]
    UnknownDataset { name: String },

    #[error(
        "Absolute aspect ratio must be <= {max_ratio}, got {ratio:.3} for {width}x{height}"
    )]
    AspectRatio {
        width: u32,
        height: u32,
        ratio: f64,
        max_ratio: u32,
    },

    #[error("Resize factor must be greater than 0")]
    InvalidResizeFactor,

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageDimensionRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },
}
