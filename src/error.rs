//! Request-scoped failures and their HTTP mapping.

use thiserror::Error;

use crate::http::multipart::MultipartError;
use crate::http::response::{Response, StatusCode};

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("malformed upload: {0}")]
    MalformedUpload(#[from] MultipartError),

    #[error("unsafe file name: {0:?}")]
    UnsafeName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::NotFound(_) => StatusCode::NotFound,
            ServeError::UnsafeName(_) => StatusCode::BadRequest,
            ServeError::MalformedUpload(_) | ServeError::Io(_) => {
                StatusCode::InternalServerError
            }
        }
    }

    /// Short message sent to the client. Details stay in the logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            ServeError::NotFound(_) => "File not found",
            ServeError::UnsafeName(_) => "Invalid file name",
            ServeError::MalformedUpload(_) => "Upload failed",
            ServeError::Io(_) => "Internal server error",
        }
    }

    pub fn into_response(self) -> Response {
        Response::text(self.status(), self.client_message())
    }
}
