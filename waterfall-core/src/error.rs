use thiserror::Error;

/// A single slice payload that could not be turned into power values.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload of {0} bytes is not a whole number of f32 values")]
    Length(usize),
    #[error("slice has no usable `{0}` field")]
    MissingField(&'static str),
}

/// Failure to bring a capture's waterfall data into the viewer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("waterfall post-processing is missing or incomplete")]
    MissingWaterfall,
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("network error: {0}")]
    Network(String),
}

impl LoadError {
    /// Text for the dismissible load-failure banner.
    pub fn friendly_message(&self) -> String {
        match self {
            LoadError::MissingWaterfall => {
                "No completed waterfall data is available for this capture.".to_string()
            }
            LoadError::Http { status: 404, .. } => {
                "Capture not found, or you do not have permission to view it.".to_string()
            }
            LoadError::Http { status: 403, .. } => {
                "You do not have permission to view this capture.".to_string()
            }
            LoadError::Http { status: 500, .. } => {
                "The server ran into a problem. Please try again later.".to_string()
            }
            LoadError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A control value that doesn't name a known option.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown palette `{0}`")]
    Palette(String),
    #[error("unsupported FFT size `{0}`")]
    FftSize(String),
    #[error("unsupported playback speed `{0}`")]
    PlaybackSpeed(String),
}
