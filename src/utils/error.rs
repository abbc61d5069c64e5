use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActorError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {message}")]
    ApiStatusError { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Not found: {path}")]
    NotFoundError { path: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, ActorError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Input,
    Storage,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ActorError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError {
            message: message.into(),
        }
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFoundError { path: path.into() }
    }

    /// 只有「檔案不存在」才算，權限或網路錯誤都不算
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFoundError { .. } => true,
            Self::IoError(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::ApiStatusError { .. } => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Input,
            Self::IoError(_) | Self::StorageError { .. } | Self::NotFoundError { .. } => {
                ErrorCategory::Storage
            }
            Self::SerializationError(_) | Self::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 遠端錯誤通常可以重跑解決
            Self::ApiError(_) => ErrorSeverity::Medium,
            Self::ApiStatusError { status, .. } if *status == 429 || *status >= 500 => {
                ErrorSeverity::Medium
            }
            Self::ApiStatusError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::StorageError { .. } | Self::NotFoundError { .. } => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check network connectivity to the Tomba API and run again",
            Self::ApiStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Verify tombaApiKey and tombaApiSecret"
            }
            Self::ApiStatusError { status, .. } if *status == 429 => {
                "The API rate limit was hit; wait a moment before running again"
            }
            Self::ApiStatusError { .. } => "Inspect the API response and the search parameters",
            Self::ValidationError { .. } => {
                "Provide tombaApiKey, tombaApiSecret and at least one domain in the input"
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => "Check the command line options and environment variables",
            Self::IoError(_) | Self::StorageError { .. } | Self::NotFoundError { .. } => {
                "Check that the output location exists and is writable"
            }
            Self::SerializationError(_) | Self::ProcessingError { .. } => {
                "Check that the input document is valid JSON or TOML"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the email search API: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Storage => format!("Could not save output: {}", self),
            ErrorCategory::Processing => format!("Could not process data: {}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_displays_bare_message() {
        let err = ActorError::validation("At least one domain is required");
        assert_eq!(err.to_string(), "At least one domain is required");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_api_status_severity() {
        let throttled = ActorError::ApiStatusError {
            status: 429,
            message: "Too Many Requests".to_string(),
        };
        assert_eq!(throttled.severity(), ErrorSeverity::Medium);

        let unauthorized = ActorError::ApiStatusError {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(unauthorized.severity(), ErrorSeverity::High);
        assert_eq!(
            unauthorized.recovery_suggestion(),
            "Verify tombaApiKey and tombaApiSecret"
        );
    }

    #[test]
    fn test_storage_errors_are_critical() {
        let err = ActorError::storage("bucket not found");
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("Could not save output"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(ActorError::not_found("dataset.json").is_not_found());
        assert!(ActorError::IoError(std::io::Error::from(std::io::ErrorKind::NotFound)).is_not_found());

        assert!(!ActorError::IoError(std::io::Error::from(std::io::ErrorKind::PermissionDenied))
            .is_not_found());
        assert!(!ActorError::storage("AccessDenied: Access Denied").is_not_found());
    }
}
