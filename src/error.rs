use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("drop interval must be greater than zero")]
    ZeroDropInterval,
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },
    #[error("pinch trigger ({trigger}) must be below pinch release ({release})")]
    PinchBand { trigger: f32, release: f32 },
}

#[derive(Debug, Error)]
pub enum LandmarkError {
    #[error("malformed landmark frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("hand has {found} landmarks, expected at least {expected}")]
    TooFewLandmarks { found: usize, expected: usize },
}
