use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaceError {
    #[error("Validation error on '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Place not found: {id}")]
    NotFoundError { id: i64 },

    #[error("Persistence error ({path}): {message}")]
    PersistenceError { path: String, message: String },

    #[error("No place id left after {last}")]
    IdSpaceExhausted { last: i64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlaceError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        PlaceError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn persistence(path: impl Into<String>, message: impl ToString) -> Self {
        PlaceError::PersistenceError {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PlaceError::ValidationError { .. } => ErrorCategory::Input,
            PlaceError::NotFoundError { .. } => ErrorCategory::Lookup,
            PlaceError::PersistenceError { .. }
            | PlaceError::IdSpaceExhausted { .. }
            | PlaceError::IoError(_)
            | PlaceError::SerializationError(_) => ErrorCategory::Storage,
            PlaceError::ConfigError { .. } | PlaceError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Low,
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlaceError::ValidationError { .. } => "Check the provided values and try again",
            PlaceError::NotFoundError { .. } => "Run `list` to see the ids of stored places",
            PlaceError::PersistenceError { .. } | PlaceError::IoError(_) => {
                "Check that the data directory exists and is writable"
            }
            PlaceError::SerializationError(_) => {
                "The places file may be corrupt; restore it from a backup or remove it"
            }
            PlaceError::IdSpaceExhausted { .. } => {
                "Remove or renumber the places with the largest ids in the places file"
            }
            PlaceError::ConfigError { .. } | PlaceError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlaceError::ValidationError { field, message } => {
                format!("Invalid {}: {}", field, message)
            }
            PlaceError::NotFoundError { id } => format!("No place with id {}", id),
            PlaceError::PersistenceError { path, .. } => {
                format!("Could not save or load places at {}", path)
            }
            PlaceError::IdSpaceExhausted { .. } => {
                "No new place id can be assigned".to_string()
            }
            PlaceError::IoError(e) => format!("File system error: {}", e),
            PlaceError::SerializationError(_) => "Places data could not be read".to_string(),
            PlaceError::ConfigError { message } => format!("Configuration problem: {}", message),
            PlaceError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PlaceError>;
