//! Prompt-specific error types.

use thiserror::Error;

/// Errors that can occur during prompt operations.
#[derive(Debug, Error)]
pub enum PromptError {
    /// A registration request was malformed (both or neither of a function
    /// and a prompt, overrides on a prebuilt prompt, unnamed closure).
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The requested prompt is not registered.
    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    /// Required arguments were absent at render time.
    #[error("Missing required arguments: {}", .0.join(", "))]
    MissingArguments(Vec<String>),

    /// An argument was present but could not be interpreted.
    #[error("Invalid argument value for '{0}': {1}")]
    InvalidArgument(String, String),

    /// The backing function failed while rendering.
    #[error("Error rendering prompt {name}: {source}")]
    RenderFailure {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

impl PromptError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "unknown prompt" error.
    pub fn unknown_prompt(name: impl Into<String>) -> Self {
        Self::UnknownPrompt(name.into())
    }

    /// Create a new "missing arguments" error.
    pub fn missing_arguments<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingArguments(names.into_iter().map(Into::into).collect())
    }

    /// Create a new "invalid argument" error.
    pub fn invalid_argument(arg: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument(arg.into(), reason.into())
    }

    /// Wrap a failure raised by a prompt's backing function.
    pub fn render_failure(name: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::RenderFailure {
            name: name.into(),
            source: source.into(),
        }
    }
}
