use thiserror::Error;

/// Maximum estimated prompt length accepted by the prompt enhancer, in tokens.
pub const MAX_PROMPT_TOKENS: usize = 480;

/// Maximum number of images one batch may produce (styles × iterations).
pub const MAX_BATCH_IMAGES: usize = 30;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("GOOGLE_AI_API_KEY is not configured")]
    NotConfigured,

    #[error("Prompt exceeds maximum length of {MAX_PROMPT_TOKENS} tokens (estimated {estimated})")]
    PromptTooLong { estimated: usize },

    #[error("Invalid or missing aspectRatio parameter: {0}")]
    InvalidAspectRatio(String),

    #[error("Remote request failed: {0}")]
    RemoteFailure(String),

    #[error("No image data in response")]
    NoImageData,

    #[error("Failed to generate prompt suggestion")]
    SuggestionUnavailable,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Maximum limit is {MAX_BATCH_IMAGES} total images, requested {0}. Please reduce styles or iterations.")]
    BatchTooLarge(usize),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl GenError {
    /// Validation-class errors are the caller's fault and map to HTTP 400.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GenError::InvalidInput(_)
                | GenError::PromptTooLong { .. }
                | GenError::InvalidAspectRatio(_)
                | GenError::BatchTooLarge(_)
        )
    }
}

impl From<std::io::Error> for GenError {
    fn from(err: std::io::Error) -> Self {
        GenError::StorageError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
