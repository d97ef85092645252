use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// A common error type that can be used throughout the API.
///
/// Can be returned in a `Result` from an API handler function.
///
/// Error responses carry a plain-text message body; the status code mapping is
/// part of the API contract and asserted by the handler tests. Two mappings are
/// intentionally unconventional and must not be "fixed":
///
/// * a token that fails verification is a `400`, not a `401`;
/// * a malformed record id is a `404`, so callers can't tell a bad id from a
///   missing record.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request carried no token at all (header absent or empty).
    #[error("Access denied. No token provided.")]
    Unauthorized,

    /// The request carried a token that failed verification.
    #[error("Invalid token.")]
    InvalidToken,

    /// The authenticated identity is not allowed to perform the operation.
    #[error("Access denied.")]
    Forbidden,

    /// No record matched, or a guarded path id didn't parse as a record key.
    #[error("{0}")]
    NotFound(&'static str),

    /// The request body failed structural validation; carries the first
    /// violation's message.
    #[error("{0}")]
    Validation(String),

    /// Automatically return `500 Internal Server Error` on a `sqlx::Error`.
    ///
    /// Via the generated `From<sqlx::Error> for Error` impl, this allows the
    /// use of `?` on database calls in handler functions without a manual mapping step.
    ///
    /// The actual error message isn't returned to the client for security reasons.
    /// It should be logged instead.
    #[error("an error occurred with the database")]
    Sqlx(#[from] sqlx::Error),

    /// Similarly, we don't want to report random `anyhow::Error`s to the client.
    #[error("an internal server error occurred")]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    fn status_code(&self) -> StatusCode {
        use Error::*;

        match self {
            Unauthorized => StatusCode::UNAUTHORIZED,
            InvalidToken | Validation(_) => StatusCode::BAD_REQUEST,
            Forbidden => StatusCode::FORBIDDEN,
            NotFound(_) => StatusCode::NOT_FOUND,
            Sqlx(_) | Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Self::Sqlx(e) => {
                log::error!("SQLx error: {:?}", e);
            }

            Self::Anyhow(e) => {
                log::error!("Generic error: {:?}", e);
            }

            // Other errors get mapped normally.
            _ => (),
        }

        (self.status_code(), self.to_string()).into_response()
    }
}
