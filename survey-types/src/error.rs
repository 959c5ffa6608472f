use std::io;

/// Error type for survey operations.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// No place was given to record the answers.
    #[error("cannot ask questions without a place to record the answers")]
    MissingTarget,

    /// The terminal could not be acquired (not interactive, closed, etc.)
    #[error("terminal unavailable: {0}")]
    Surface(#[source] io::Error),

    /// A prompt failed to read an answer.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// A validation message could not be rendered.
    #[error("could not render validation message: {0}")]
    Render(#[from] RenderError),

    /// A validated answer could not be stored in the target.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// The configured attempt limit was reached without a valid reply.
    #[error("no valid reply for '{name}' after {attempts} attempts")]
    TooManyAttempts { name: String, attempts: usize },
}

impl SurveyError {
    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Prompt(PromptError::Interrupted))
    }
}

/// Error type for prompt implementations.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// User interrupted the prompt (Ctrl+C, Escape, etc.)
    #[error("prompt interrupted by user")]
    Interrupted,

    /// Reading from or writing to the terminal failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// Any other prompt-specific failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PromptError {
    /// Create a prompt error from any error type.
    pub fn other(err: impl Into<anyhow::Error>) -> Self {
        Self::Other(err.into())
    }
}

/// Error type for storing an answer in a result record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error("no field named '{name}' to record the answer in")]
    UnknownField { name: String },

    #[error("cannot store {actual} answer for '{name}' in a field of type {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("cannot record answers in a {kind}")]
    NotAddressable { kind: &'static str },
}

/// Error type for rendering a validation message from a template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("invalid template: {0}")]
    Template(String),

    #[error("unknown directive '{0}'")]
    UnknownDirective(String),

    #[error("unknown color '{0}'")]
    UnknownColor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_detected() {
        assert!(SurveyError::Prompt(PromptError::Interrupted).is_cancelled());
        assert!(!SurveyError::MissingTarget.is_cancelled());

        let io = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        assert!(!SurveyError::Prompt(PromptError::Io(io)).is_cancelled());
    }

    #[test]
    fn error_messages() {
        let err = WriteError::TypeMismatch {
            name: "age".to_string(),
            expected: "u8",
            actual: "String",
        };
        assert_eq!(
            err.to_string(),
            "cannot store String answer for 'age' in a field of type u8"
        );

        let err = SurveyError::TooManyAttempts {
            name: "color".to_string(),
            attempts: 3,
        };
        assert_eq!(err.to_string(), "no valid reply for 'color' after 3 attempts");
    }

    #[test]
    fn prompt_errors_pass_through_unchanged() {
        let err: SurveyError = PromptError::other(anyhow::anyhow!("device gone")).into();
        assert_eq!(err.to_string(), "device gone");
    }
}
