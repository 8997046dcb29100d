use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcoFeeError {
    #[error("Admin API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error("Invalid province selected: '{value}'")]
    InvalidJurisdiction { value: String },

    #[error("Unable to resolve Shop ID for metafield owner")]
    MissingShopId,

    #[error("Cart transform function '{title}' not found")]
    FunctionNotFound { title: String },

    #[error("Admin API error (status {status}): {message}")]
    AdminApi { status: u16, message: String },

    #[error("Admin API rejected the request: {messages}")]
    UserErrors { messages: String },

    #[error("Provisioning failed: {message}")]
    Provisioning { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Validation,
    Platform,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EcoFeeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EcoFeeError::HttpError(_) | EcoFeeError::AdminApi { .. } => ErrorCategory::Network,
            EcoFeeError::IoError(_) | EcoFeeError::SerializationError(_) => ErrorCategory::System,
            EcoFeeError::ConfigError { .. }
            | EcoFeeError::ConfigValidationError { .. }
            | EcoFeeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EcoFeeError::InvalidJurisdiction { .. } => ErrorCategory::Validation,
            EcoFeeError::MissingShopId
            | EcoFeeError::FunctionNotFound { .. }
            | EcoFeeError::UserErrors { .. }
            | EcoFeeError::Provisioning { .. } => ErrorCategory::Platform,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Platform => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EcoFeeError::HttpError(_) => {
                "Check network connectivity and the admin endpoint, then retry".to_string()
            }
            EcoFeeError::AdminApi { status, .. } if *status == 401 || *status == 403 => {
                "Check the access token and the app's granted scopes".to_string()
            }
            EcoFeeError::AdminApi { .. } => "Retry later; the admin API may be degraded".to_string(),
            EcoFeeError::IoError(_) => "Check file paths and permissions".to_string(),
            EcoFeeError::SerializationError(_) => {
                "Check that the input is valid cart transform JSON".to_string()
            }
            EcoFeeError::ConfigError { .. }
            | EcoFeeError::ConfigValidationError { .. }
            | EcoFeeError::InvalidConfigValueError { .. } => {
                "Review the configuration file and environment variables".to_string()
            }
            EcoFeeError::InvalidJurisdiction { .. } => format!(
                "Choose one of the enabled provinces: {}",
                crate::core::jurisdiction::JurisdictionCode::enabled()
                    .map(|code| code.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            EcoFeeError::MissingShopId => {
                "Confirm the access token belongs to an installed shop".to_string()
            }
            EcoFeeError::FunctionNotFound { title } => format!(
                "Ensure the function is deployed and titled '{}'",
                title
            ),
            EcoFeeError::UserErrors { .. } => {
                "Fix the rejected fields and submit again".to_string()
            }
            EcoFeeError::Provisioning { .. } => {
                "Check server logs and retry activation".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EcoFeeError::InvalidJurisdiction { .. } => "Invalid province selected.".to_string(),
            EcoFeeError::Provisioning { message } => message.clone(),
            EcoFeeError::UserErrors { messages } => messages.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EcoFeeError>;
