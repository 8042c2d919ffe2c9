use lumen_core::error::CoreError;
use lumen_core::types::RecordId;

/// PostgREST error code for "no row matched a single-object request".
const NO_ROWS_CODE: &str = "PGRST116";

/// Errors from the hosted backend's REST, storage and identity endpoints.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A row came back in a shape we cannot map into a domain type.
    #[error("Malformed row: {0}")]
    Decode(String),
}

impl BackendError {
    /// Whether the backend reported that no row matched.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api { status, body } => *status == 404 || body.contains(NO_ROWS_CODE),
            _ => false,
        }
    }

    /// Convert into a [`CoreError`], mapping "no row" to a `NotFound` for
    /// the given entity.
    pub fn for_entity(self, entity: &'static str, id: RecordId) -> CoreError {
        if self.is_not_found() {
            CoreError::NotFound { entity, id }
        } else {
            self.into()
        }
    }
}

impl From<BackendError> for CoreError {
    fn from(err: BackendError) -> Self {
        match &err {
            BackendError::Api { status: 401, .. } | BackendError::Api { status: 403, .. } => {
                CoreError::Unauthorized("Session is missing or expired".into())
            }
            _ => CoreError::Storage(err.to_string()),
        }
    }
}
