use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropCareError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No image selected")]
    NoImageSelected,

    #[error("Invalid image '{path}': {reason}")]
    InvalidImage { path: String, reason: String },

    #[error("Inference service returned status {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("Malformed inference response: {message}")]
    MalformedResponse { message: String },

    #[error("An analysis is already in progress")]
    SessionBusy,

    #[error("Analysis cancelled")]
    Cancelled,

    #[error("Cannot {transition} while session is {state}")]
    InvalidTransition {
        transition: &'static str,
        state: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Network,
    Service,
    Session,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CropCareError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CropCareError::NoImageSelected
            | CropCareError::InvalidImage { .. }
            | CropCareError::Base64Error(_) => ErrorCategory::Input,
            CropCareError::ConfigError { .. }
            | CropCareError::ConfigValidationError { .. }
            | CropCareError::MissingConfigError { .. }
            | CropCareError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CropCareError::ApiError(_) => ErrorCategory::Network,
            CropCareError::ServiceStatus { .. }
            | CropCareError::MalformedResponse { .. }
            | CropCareError::SerializationError(_) => ErrorCategory::Service,
            CropCareError::SessionBusy
            | CropCareError::Cancelled
            | CropCareError::InvalidTransition { .. } => ErrorCategory::Session,
            CropCareError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CropCareError::Cancelled | CropCareError::SessionBusy => ErrorSeverity::Low,
            CropCareError::ApiError(_) | CropCareError::ServiceStatus { .. } => {
                ErrorSeverity::Medium
            }
            CropCareError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// 行程退出碼: 取消固定 130，其餘依嚴重程度
    pub fn exit_code(&self) -> i32 {
        if matches!(self, CropCareError::Cancelled) {
            return 130;
        }
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    /// 暫時性的錯誤 (網路、5xx) 才值得重試
    pub fn is_retryable(&self) -> bool {
        match self {
            CropCareError::ApiError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            CropCareError::ServiceStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// 給使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            CropCareError::NoImageSelected => {
                "No Image Selected: Please select an image before analyzing.".to_string()
            }
            CropCareError::InvalidImage { path, reason } => {
                format!("The image '{}' cannot be used: {}", path, reason)
            }
            CropCareError::ConfigError { .. }
            | CropCareError::ConfigValidationError { .. }
            | CropCareError::MissingConfigError { .. }
            | CropCareError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            CropCareError::SessionBusy => {
                "An analysis is already running. Please wait for it to finish.".to_string()
            }
            CropCareError::Cancelled => "Analysis cancelled.".to_string(),
            _ => "Analysis Failed: Something went wrong. Please try again.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Input => {
                "Pick a clear, well-lit photo of a single leaf (jpg, png or webp)".to_string()
            }
            ErrorCategory::Configuration => {
                "Check the config file, command line flags and CROPCARE_API_KEY".to_string()
            }
            ErrorCategory::Network => {
                "Check your network connection and try again".to_string()
            }
            ErrorCategory::Service => {
                "The inference service may be unavailable, try again later".to_string()
            }
            ErrorCategory::Session => "Wait for the current analysis and retry".to_string(),
            ErrorCategory::System => "Check file permissions and disk access".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CropCareError>;
