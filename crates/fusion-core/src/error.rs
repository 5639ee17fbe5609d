use thiserror::Error;

#[derive(Error, Debug)]
pub enum FusionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Render service returned {status} for {url}: {body}")]
    Service {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Coordinate mapping failed for tile {tile_id}: {message}")]
    CoordinateMapping { tile_id: String, message: String },

    #[error("Render service returned {got} coordinates for {expected} points")]
    CoordinateCount { expected: usize, got: usize },

    #[error("Too few points for {model} fit: need {needed}, got {got}")]
    TooFewPoints {
        model: String,
        needed: usize,
        got: usize,
    },

    #[error("Point set length mismatch: {source_len} source vs {target_len} target")]
    PointCountMismatch {
        source_len: usize,
        target_len: usize,
    },

    #[error("Coordinate array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Degenerate point configuration: {0}")]
    Degenerate(String),

    #[error("Invalid transform: {0}")]
    InvalidTransform(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, FusionError>;
