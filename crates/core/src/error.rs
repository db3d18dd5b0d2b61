//! Error types for the promptree domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all promptree operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Prompt document errors ---
    #[error("Malformed document: {0}")]
    Document(#[from] DocumentError),

    // --- Attachment errors ---
    #[error("Attachment error: {0}")]
    Attachment(#[from] AttachmentError),

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Filesystem ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// A prompt document that cannot be parsed.
///
/// Any of these aborts processing for the node before any external call
/// or write happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("missing blank-line separator between headers and body")]
    MissingSeparator,

    #[error("header line without colon: {line:?}")]
    HeaderLineWithoutColon { line: String },

    #[error("continuation line before any header: {line:?}")]
    ContinuationWithoutHeader { line: String },
}

/// A declared input file that cannot be resolved.
///
/// Attachments are all-or-nothing: one missing file aborts the node
/// before the model is called.
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("declared input file not found: {path}")]
    NotFound { path: String },

    #[error("failed to read input file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_error_displays_offending_line() {
        let err = Error::Document(DocumentError::HeaderLineWithoutColon {
            line: "In notes.txt".into(),
        });
        assert!(err.to_string().contains("Malformed document"));
        assert!(err.to_string().contains("In notes.txt"));
    }

    #[test]
    fn attachment_error_names_the_path() {
        let err = Error::Attachment(AttachmentError::NotFound {
            path: "notes/missing.txt".into(),
        });
        assert!(err.to_string().contains("notes/missing.txt"));
    }

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }
}
