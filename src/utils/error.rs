use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Fetching {day} failed: {message}")]
    FetchError { day: String, message: String },

    #[error("Fetching {day} timed out after {seconds}s")]
    TimeoutError { day: String, seconds: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Week menu is malformed: {message}")]
    InvariantError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Storage,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::HttpError(_) | EtlError::FetchError { .. } | EtlError::TimeoutError { .. } => {
                ErrorCategory::Network
            }
            EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            EtlError::IoError(_) => ErrorCategory::Storage,
            EtlError::SerializationError(_) | EtlError::InvariantError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::HttpError(_) | EtlError::FetchError { .. } => {
                "Check that the lunch guide URL is reachable and try again"
            }
            EtlError::TimeoutError { .. } => "Increase --timeout-seconds or retry later",
            EtlError::IoError(_) => "Check that the output directory exists and is writable",
            EtlError::SerializationError(_) | EtlError::InvariantError { .. } => {
                "The menu document could not be built; re-run with --verbose for details"
            }
            EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::ConfigValidationError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::HttpError(e) if e.is_timeout() => "The lunch guide did not answer in time".to_string(),
            EtlError::HttpError(_) => "Could not reach the lunch guide".to_string(),
            EtlError::IoError(e) => format!("Could not write the menu files: {}", e),
            EtlError::MissingConfigError { field } => format!("'{}' must be provided", field),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
