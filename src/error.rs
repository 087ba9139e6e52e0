//! Error types for datahub-catalog.
//!
//! The catalog core degrades every data anomaly to a safe default (empty
//! store, clamped page, no-op filter stage), so these errors only surface at
//! the storage, authentication and command-line boundaries.

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for datahub-catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A dataset document could not be read as JSON at all.
    #[error("Invalid dataset document for {source_name}: {message}")]
    Dataset {
        /// Data source the document was meant for.
        source_name: String,
        /// Human-readable error message.
        message: String,
        /// Underlying serde_json error, if available.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Record identifier not present in any dataset.
    #[error("Record not found: {record_id}")]
    UnknownRecord {
        /// Identifier that was not found.
        record_id: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Human-readable error message.
        message: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Human-readable error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {context}")]
    IoError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {context}")]
    SerializationError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying serde_json error.
        #[source]
        source: serde_json::Error,
    },

    /// Invalid argument.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the invalid argument.
        name: String,
        /// Reason why the argument is invalid.
        reason: String,
    },

    /// Access attempted without a login.
    #[error("Not logged in. Run `datahub login` first")]
    NotAuthenticated,

    /// Credentials were well-formed but did not match.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Credentials failed form validation.
    #[error("{}", format_validation(.email.as_deref(), .password.as_deref()))]
    CredentialValidation {
        /// Email field message, if the email was rejected.
        email: Option<String>,
        /// Password field message, if the password was rejected.
        password: Option<String>,
    },

    /// Unsupported operation or feature.
    #[error("Unsupported: {feature}")]
    Unsupported {
        /// Name of the unsupported feature.
        feature: String,
    },
}

fn format_validation(email: Option<&str>, password: Option<&str>) -> String {
    match (email, password) {
        (Some(e), Some(p)) => format!("{e}; {p}"),
        (Some(e), None) => e.to_string(),
        (None, Some(p)) => p.to_string(),
        (None, None) => "Invalid credentials".to_string(),
    }
}

impl CatalogError {
    /// Create a new I/O error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            context: context.into(),
            source,
        }
    }

    /// Get the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } | Self::UnknownRecord { .. } => exit_codes::EXIT_NOT_FOUND,
            Self::ConfigError { .. } | Self::InvalidConfig { .. } => exit_codes::EXIT_CONFIG_ERROR,
            Self::InvalidArgument { .. } => exit_codes::EXIT_USAGE_ERROR,
            Self::Dataset { .. } | Self::SerializationError { .. } => exit_codes::EXIT_DATA_ERROR,
            Self::IoError { .. } => exit_codes::EXIT_IO_ERROR,
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::CredentialValidation { .. } => exit_codes::EXIT_NO_PERMISSION,
            Self::Unsupported { .. } => exit_codes::EXIT_GENERAL_ERROR,
        }
    }
}

/// Result type alias for datahub-catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            context: "I/O operation failed".to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            context: "JSON operation failed".to_string(),
            source: err,
        }
    }
}

/// Exit codes for CLI operations.
pub mod exit_codes {
    /// General/unspecified error.
    pub const EXIT_GENERAL_ERROR: i32 = 1;
    /// Specified file or record not found.
    pub const EXIT_NOT_FOUND: i32 = 3;
    /// Invalid configuration.
    pub const EXIT_CONFIG_ERROR: i32 = 5;
    /// Invalid command-line usage (BSD standard).
    pub const EXIT_USAGE_ERROR: i32 = 64;
    /// Input data format error (BSD standard).
    pub const EXIT_DATA_ERROR: i32 = 65;
    /// I/O error (BSD standard).
    pub const EXIT_IO_ERROR: i32 = 74;
    /// Permission denied (BSD standard), used for the login gate.
    pub const EXIT_NO_PERMISSION: i32 = 77;
}
