use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoryError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Upstream API returned {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("Upstream API returned no completion text")]
    EmptyCompletion,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StoryError::ApiError(_)
            | StoryError::UpstreamError { .. }
            | StoryError::EmptyCompletion => ErrorCategory::Upstream,
            StoryError::ConfigError { .. }
            | StoryError::InvalidConfigValueError { .. }
            | StoryError::MissingConfigError { .. } => ErrorCategory::Configuration,
            StoryError::ValidationError { .. } => ErrorCategory::Input,
            StoryError::IoError(_) | StoryError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StoryError::ValidationError { .. } => ErrorSeverity::Low,
            // 429 / 5xx 通常稍後重試即可
            StoryError::UpstreamError { status, .. } if *status == 429 || *status >= 500 => {
                ErrorSeverity::Medium
            }
            StoryError::ApiError(_) | StoryError::EmptyCompletion => ErrorSeverity::Medium,
            StoryError::UpstreamError { .. } => ErrorSeverity::High,
            StoryError::ConfigError { .. }
            | StoryError::InvalidConfigValueError { .. }
            | StoryError::MissingConfigError { .. } => ErrorSeverity::High,
            StoryError::IoError(_) | StoryError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 顯示給使用者的訊息，不含上游細節
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => match self {
                StoryError::ValidationError { message } => message.clone(),
                _ => "Please check your input.".to_string(),
            },
            ErrorCategory::Upstream => {
                "The scribes could not weave your scroll right now. Please try again in a moment."
                    .to_string()
            }
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => "An unexpected error occurred.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StoryError::UpstreamError { status: 401, .. }
            | StoryError::UpstreamError { status: 403, .. } => {
                "Check the provider API key (GROQ_API_KEY / OPENAI_API_KEY)"
            }
            StoryError::UpstreamError { status: 429, .. } => {
                "The provider is rate limiting requests; wait before retrying"
            }
            StoryError::UpstreamError { .. } | StoryError::EmptyCompletion => {
                "Check the provider status and the configured model name"
            }
            StoryError::ApiError(_) => "Check network connectivity and the provider base URL",
            StoryError::ConfigError { .. }
            | StoryError::InvalidConfigValueError { .. }
            | StoryError::MissingConfigError { .. } => {
                "Review the configuration file and environment variables"
            }
            StoryError::ValidationError { .. } => "Enter a name and choose a region",
            StoryError::IoError(_) | StoryError::SerializationError(_) => {
                "Check file permissions and the configuration path"
            }
        }
    }

    /// HTTP 狀態碼對應
    pub fn http_status(&self) -> u16 {
        match self.category() {
            ErrorCategory::Input => 422,
            ErrorCategory::Upstream => 502,
            ErrorCategory::Configuration | ErrorCategory::System => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_errors_map_to_bad_gateway() {
        let err = StoryError::UpstreamError {
            status: 429,
            body: "slow down".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.http_status(), 502);
        assert!(err.recovery_suggestion().contains("rate limiting"));
    }

    #[test]
    fn test_user_message_hides_upstream_details() {
        let err = StoryError::UpstreamError {
            status: 401,
            body: "invalid api key sk-secret".to_string(),
        };
        let message = err.user_friendly_message();
        assert!(!message.contains("sk-secret"));
        assert!(!message.contains("401"));
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_validation_error_is_shown_verbatim() {
        let err = StoryError::ValidationError {
            message: "Please enter a name and choose a region.".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Please enter a name and choose a region."
        );
        assert_eq!(err.http_status(), 422);
    }
}
