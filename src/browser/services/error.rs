//! Errors from the catalog API layer.

/// Failure of a single catalog request.
///
/// "No matches" is not an error: it arrives as an empty
/// [`PageEnvelope`](crate::browser::models::PageEnvelope).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A background request task panicked or was aborted.
    #[error("Request task failed: {0}")]
    Task(String),
}

impl CatalogError {
    /// Status code for API errors, `None` for transport failures
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CatalogError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<tokio::task::JoinError> for CatalogError {
    fn from(err: tokio::task::JoinError) -> Self {
        CatalogError::Task(err.to_string())
    }
}
