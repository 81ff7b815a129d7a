use thiserror::Error;

/// Error types for a single form submission
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The form could not be read
    #[error("Form error: {0}")]
    Form(String),

    /// The request failed before a response arrived
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but its body is not a chart payload
    #[error("Malformed payload (HTTP {status}): {source}")]
    MalformedPayload {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The document could not be rewritten
    #[error("Document error: {0}")]
    Document(String),

    /// The plotting library rejected the traces
    #[error("Render error: {0}")]
    Render(String),

    /// A notification widget could not be shown
    #[error("Notification error: {0}")]
    Notification(String),
}

/// Type alias for Result with SubmitError
pub type Result<T> = std::result::Result<T, SubmitError>;
