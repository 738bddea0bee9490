use thiserror::Error;

/// Core error types for the Parchment host layer
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Text decoding failed
    #[error("Decode error: {0}")]
    Decode(#[from] crate::core::decode::DecodeError),

    /// Profile operation failed
    #[error("Profile error: {0}")]
    Profile(#[from] crate::core::profile::ProfileError),

    /// A path argument was rejected before touching the filesystem
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Shutdown handoff failed (e.g. the replacement process could not spawn)
    #[error("Shutdown error: {0}")]
    Shutdown(String),

    /// Internal logic error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Represents a translated error with helpful context
#[derive(Debug, Clone)]
pub struct ErrorTranslation {
    pub user_message: String,
    pub suggestions: Vec<String>,
}

impl ErrorTranslation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            user_message: message.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

/// Database of host error patterns and their translations
pub struct HostErrorPattern;

impl HostErrorPattern {
    /// Matches an error message against known patterns and returns a user-friendly translation.
    pub fn match_error(msg: &str) -> ErrorTranslation {
        let lower = msg.to_lowercase();

        // Permission errors
        if lower.contains("permission denied") || lower.contains("operation not permitted") {
            return ErrorTranslation::new("Insufficient permissions for this profile operation")
                .with_suggestion("Check ownership of ~/.local/share/parchment")
                .with_suggestion("Another user may have created the profile directory");
        }

        // Disk full
        if lower.contains("no space left") || lower.contains("disk full") {
            return ErrorTranslation::new("The disk is full")
                .with_suggestion("Free up space and try again")
                .with_suggestion("Purging the render cache may help: parchment purge --cache");
        }

        // Read-only filesystem (live/portable media)
        if lower.contains("read-only file system") {
            return ErrorTranslation::new("The profile lives on read-only media")
                .with_suggestion("Portable installs need a writable data directory")
                .with_suggestion("Point PARCHMENT_DATA_DIR at a writable location");
        }

        // Missing files or directories
        if lower.contains("no such file") || lower.contains("not found") {
            return ErrorTranslation::new("A file or directory the operation needed is missing")
                .with_suggestion("The profile may never have been initialized")
                .with_suggestion("Run 'parchment list' to see which profiles exist");
        }

        // Malformed stored data
        if lower.contains("json error") || lower.contains("expected value") {
            return ErrorTranslation::new("A stored file is corrupt and could not be parsed")
                .with_suggestion("Delete the offending file; it will be recreated with defaults")
                .with_suggestion("Preferences live in config.json under the data directory");
        }

        // Decoder input problems
        if lower.contains("decode error") || lower.contains("utf-8") {
            return ErrorTranslation::new("The text could not be decoded")
                .with_suggestion("Check that the input is URL-encoded UTF-8")
                .with_suggestion("Characters outside the Basic Multilingual Plane are not supported");
        }

        // Generic fallback
        ErrorTranslation::new(format!("Host error: {msg}"))
            .with_suggestion("Check the detailed error message for more information")
    }
}

pub type Result<T> = std::result::Result<T, Error>;
