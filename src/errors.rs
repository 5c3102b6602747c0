use std::path::PathBuf;

/// Errors raised at the edges of the crate: configuration, file I/O and
/// report export. Generation, parsing and scoring never fail; they degrade
/// to shorter output instead.
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type PrepResult<T> = Result<T, PrepError>;

/// Error context for structured logging
#[derive(Debug)]
pub struct ErrorContext {
    pub operation: String,
    pub resource: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            resource: None,
        }
    }

    pub fn with_resource(mut self, resource: &str) -> Self {
        self.resource = Some(resource.to_string());
        self
    }
}

impl PrepError {
    /// Log the error with its operation context and hand it back for propagation
    pub fn log_with_context(self, context: ErrorContext) -> Self {
        match &self {
            PrepError::Config(_) | PrepError::InvalidInput(_) => {
                tracing::warn!(
                    operation = %context.operation,
                    resource = ?context.resource,
                    error = %self,
                    "Rejected input"
                );
            }
            PrepError::Read { .. } | PrepError::Write { .. } | PrepError::Serialization(_) => {
                tracing::error!(
                    operation = %context.operation,
                    resource = ?context.resource,
                    error = %self,
                    "I/O failure"
                );
            }
        }
        self
    }

    /// User-facing one-line message for the terminal front-end
    pub fn user_message(&self) -> String {
        match self {
            PrepError::Config(message) => format!("Check your settings: {}", message),
            PrepError::InvalidInput(message) => message.clone(),
            PrepError::Read { path, .. } => format!("Could not read '{}'.", path.display()),
            PrepError::Write { path, .. } => format!("Could not write '{}'.", path.display()),
            PrepError::Serialization(_) => "Report could not be serialized.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context_creation() {
        let context = ErrorContext::new("export_report").with_resource("report.md");
        assert_eq!(context.operation, "export_report");
        assert_eq!(context.resource, Some("report.md".to_string()));
    }

    #[test]
    fn test_user_messages() {
        let err = PrepError::Read {
            path: PathBuf::from("resume.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.user_message(), "Could not read 'resume.txt'.");
        assert!(err.to_string().contains("missing"));

        let err = PrepError::InvalidInput("Pick A, B, C or D".to_string())
            .log_with_context(ErrorContext::new("practice_answer"));
        assert_eq!(err.user_message(), "Pick A, B, C or D");
    }
}
