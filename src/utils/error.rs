use thiserror::Error;

#[derive(Error, Debug)]
pub enum CapsuleError {
    #[error("Malformed capsule token: {reason}")]
    MalformedToken { reason: String },

    #[error("Wardrobe service rejected the capsule: {message}")]
    ServerError { message: String },

    #[error("Wardrobe service responded with status {status}")]
    NonSuccessStatus { status: u16 },

    #[error("Wardrobe request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("'{value}' is not a valid {field}")]
    InvalidFieldValue { field: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Remote,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CapsuleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CapsuleError::MalformedToken { .. } | CapsuleError::InvalidFieldValue { .. } => {
                ErrorCategory::Input
            }
            CapsuleError::ServerError { .. }
            | CapsuleError::NonSuccessStatus { .. }
            | CapsuleError::Network(_)
            | CapsuleError::Serialization(_) => ErrorCategory::Remote,
            CapsuleError::ConfigError { .. }
            | CapsuleError::ConfigValidationError { .. }
            | CapsuleError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CapsuleError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // the service answered; the user only has to change the selection
            CapsuleError::ServerError { .. } => ErrorSeverity::Low,
            CapsuleError::NonSuccessStatus { .. } | CapsuleError::Network(_) => {
                ErrorSeverity::Medium
            }
            CapsuleError::MalformedToken { .. }
            | CapsuleError::InvalidFieldValue { .. }
            | CapsuleError::Serialization(_)
            | CapsuleError::ConfigError { .. }
            | CapsuleError::ConfigValidationError { .. }
            | CapsuleError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            CapsuleError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Message shown in the form's error line.
    pub fn user_friendly_message(&self) -> String {
        match self {
            CapsuleError::MalformedToken { .. } => {
                "This capsule link is broken and could not be opened.".to_string()
            }
            CapsuleError::ServerError { message } => message.clone(),
            CapsuleError::NonSuccessStatus { .. }
            | CapsuleError::Network(_)
            | CapsuleError::Serialization(_) => {
                "Could not fetch your capsule wardrobe. Please try again.".to_string()
            }
            CapsuleError::InvalidFieldValue { field, value } => {
                format!("'{}' is not a valid choice for {}", value, field)
            }
            CapsuleError::ConfigError { .. }
            | CapsuleError::ConfigValidationError { .. }
            | CapsuleError::InvalidConfigValueError { .. } => format!("Configuration problem: {}", self),
            CapsuleError::IoError(e) => format!("System error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CapsuleError::MalformedToken { .. } => {
                "Ask for a fresh share link or fill in the form again".to_string()
            }
            CapsuleError::ServerError { .. } => "Adjust the selection and submit again".to_string(),
            CapsuleError::NonSuccessStatus { status } if *status >= 500 => {
                "The wardrobe service is having trouble; retry in a moment".to_string()
            }
            CapsuleError::NonSuccessStatus { .. } => {
                "Check that the server URL points at a wardrobe service".to_string()
            }
            CapsuleError::Network(_) => {
                "Check the server URL and that the wardrobe service is running".to_string()
            }
            CapsuleError::Serialization(_) => {
                "The service returned an unexpected body; check the server version".to_string()
            }
            CapsuleError::InvalidFieldValue { .. } => {
                "Run with --help to list the accepted values".to_string()
            }
            CapsuleError::ConfigError { .. }
            | CapsuleError::ConfigValidationError { .. }
            | CapsuleError::InvalidConfigValueError { .. } => {
                "Review the command-line flags and the configuration file".to_string()
            }
            CapsuleError::IoError(_) => "Check file paths and permissions".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CapsuleError>;
