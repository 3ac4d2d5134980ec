//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{} could not be found.", .0.display())]
    MissingExampleConfig(PathBuf),

    #[error("required environment variables are missing: {}", .missing.join(", "))]
    IncompleteConfig { missing: Vec<String> },

    #[error("{command} returned non-zero exit status {}", describe_exit(.exit_code))]
    ToolFailed {
        command: String,
        exit_code: Option<i32>,
    },

    #[error("cannot run {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "(terminated by signal)".to_string(),
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
