use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Single error taxonomy for the whole pipeline. Network-transient variants
/// are retried by the client; everything else surfaces immediately.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("All retries exhausted: {0}")]
    MaxRetriesExceeded(String),

    #[error("No JSON object found in model output")]
    NoJsonFound,

    #[error("Malformed JSON in model output: {0}")]
    MalformedJson(String),

    #[error("Model response missing '{0}' field")]
    MissingField(&'static str),

    #[error("Sanitized command is empty")]
    EmptyCommand,

    #[error("Command contains more than one output redirection")]
    InvalidRedirection,

    #[error("Administrator privileges required: {0}")]
    AdminRequired(String),

    #[error("Failed to spawn command: {0}")]
    Spawn(String),

    #[error("Command exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Machine-readable code for each variant, stable across message edits.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::Timeout => "TIMEOUT",
            Error::Api { .. } => "API_ERROR",
            Error::Network(_) => "NETWORK_ERROR",
            Error::MaxRetriesExceeded(_) => "MAX_RETRIES_EXCEEDED",
            Error::NoJsonFound => "NO_JSON_FOUND",
            Error::MalformedJson(_) => "MALFORMED_JSON",
            Error::MissingField(_) => "MISSING_FIELD",
            Error::EmptyCommand => "EMPTY_COMMAND",
            Error::InvalidRedirection => "INVALID_REDIRECTION",
            Error::AdminRequired(_) => "ADMIN_REQUIRED",
            Error::Spawn(_) => "SPAWN_ERROR",
            Error::NonZeroExit { .. } => "NON_ZERO_EXIT",
            Error::Storage(_) => "STORAGE_ERROR",
            Error::Io(_) => "IO_ERROR",
        }
    }

    /// True for failures the network layer may retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Api { .. } | Error::Network(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
