//! Error types for refork-core

use thiserror::Error;

/// Result type alias using refork-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was missing or unusable
    #[error("{message}")]
    Validation { message: String },

    /// Destination already exists and overwriting was not requested
    #[error("Destination already exists: {path}. Use --force to overwrite")]
    DestinationExists { path: String },

    /// Root of a walk does not exist or is not a directory
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    /// Invalid glob pattern
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Directory walk failed
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Reading a file failed
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a file failed
    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Path is not valid UTF-8
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// External program could not be started because it is missing
    #[error("{command}: command not found")]
    CommandNotFound { command: String },

    /// GitHub CLI not authenticated
    #[error("GitHub CLI is not authenticated: {output}")]
    GhNotAuthenticated { output: String },

    /// Git operation failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// `gh repo create` failed for a reason other than an existing repository
    #[error("Failed to create repository: {message}")]
    RepoCreateFailed { message: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Regex error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a destination exists error
    pub fn destination_exists(path: impl Into<String>) -> Self {
        Self::DestinationExists { path: path.into() }
    }

    /// Create a directory not found error
    pub fn directory_not_found(path: impl Into<String>) -> Self {
        Self::DirectoryNotFound { path: path.into() }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a read file error
    pub fn read_file(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error
    pub fn write_file(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }

    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    /// Create a repository creation error
    pub fn repo_create_failed(message: impl Into<String>) -> Self {
        Self::RepoCreateFailed {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
