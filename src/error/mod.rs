use thiserror::Error;

/// Exit codes for the CLI
///
/// A completed probe run always exits with `Success`, even when individual
/// probes failed; probe outcomes are reported in the summary and the results
/// file, not the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The run completed (or the command succeeded)
    Success = 0,
    /// Credential acquisition failed
    AuthFailure = 2,
    /// Configuration error
    ConfigError = 4,
    /// Invalid input
    InvalidInput = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::Config(_) | AppError::TomlParse(_) => ExitCode::ConfigError,
            AppError::Auth(_) => ExitCode::AuthFailure,
            AppError::InvalidInput(_)
            | AppError::FileNotFound(_)
            | AppError::UrlParse(_)
            | AppError::Io(_) => ExitCode::InvalidInput,
            AppError::Network(_) | AppError::Http(_) | AppError::Json(_) => ExitCode::Success,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
