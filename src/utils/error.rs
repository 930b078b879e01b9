use crate::domain::model::CirculationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cipher error: {message}")]
    CipherError { message: String },

    #[error("Unsupported snapshot format version {found} (expected {expected})")]
    UnsupportedFormatError { found: u32, expected: u32 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input for '{field}': {reason}")]
    InvalidInputError { field: String, reason: String },

    #[error("Circulation rejected: {0}")]
    CirculationError(#[from] CirculationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Encryption,
    Configuration,
    Input,
    Circulation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LibraryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LibraryError::IoError(_)
            | LibraryError::SerializationError(_)
            | LibraryError::UnsupportedFormatError { .. } => ErrorCategory::Storage,
            LibraryError::CipherError { .. } => ErrorCategory::Encryption,
            LibraryError::ConfigError { .. }
            | LibraryError::ConfigValidationError { .. }
            | LibraryError::MissingConfigError { .. }
            | LibraryError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            LibraryError::InvalidInputError { .. } => ErrorCategory::Input,
            LibraryError::CirculationError(_) => ErrorCategory::Circulation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // A rejected issue/return leaves state untouched
            ErrorCategory::Circulation => ErrorSeverity::Low,
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Encryption => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LibraryError::IoError(e) => format!("Could not access the library data file: {}", e),
            LibraryError::SerializationError(_) | LibraryError::UnsupportedFormatError { .. } => {
                "The library data file is unreadable or from an incompatible version".to_string()
            }
            LibraryError::CipherError { .. } => {
                "The library data file could not be decrypted with the configured key".to_string()
            }
            LibraryError::ConfigError { message } => format!("Invalid configuration: {}", message),
            LibraryError::ConfigValidationError { field, message } => {
                format!("Invalid configuration in '{}': {}", field, message)
            }
            LibraryError::MissingConfigError { field } => {
                format!("Missing configuration value '{}'", field)
            }
            LibraryError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid value for '{}': {}", field, reason)
            }
            LibraryError::InvalidInputError { field, reason } => {
                format!("Invalid input for '{}': {}", field, reason)
            }
            LibraryError::CirculationError(e) => format!("Failed! {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Storage => "Check that the data file path is writable and not corrupted",
            ErrorCategory::Encryption => "Check the encryption key and cipher mode in the configuration",
            ErrorCategory::Configuration => "Review the configuration file and command-line flags",
            ErrorCategory::Input => "Re-enter the value; ids are positive whole numbers",
            ErrorCategory::Circulation => {
                "List available/issued books and members to find valid ids"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
