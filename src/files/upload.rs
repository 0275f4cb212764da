//! `POST /upload`

use crate::config::ServedRoot;
use crate::error::ServeError;
use crate::http::multipart::{self, MultipartError};
use crate::http::request::Request;
use crate::http::response::Response;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Stored { filename: String, bytes_written: usize },
    NoFilePart,
}

/// Stores the first file part of a multipart body inside the root.
///
/// The payload is written with a single buffered write and replaces any
/// existing file of the same name. Concurrent uploads of one name race and
/// the last write wins.
pub async fn store(root: &ServedRoot, request: &Request) -> Result<UploadOutcome, ServeError> {
    request
        .content_length()
        .ok_or(MultipartError::InvalidContentLength)?;
    let content_type = request
        .header("Content-Type")
        .ok_or(MultipartError::MissingContentType)?;
    let boundary = multipart::boundary(content_type)?;

    let Some(part) = multipart::find_file_part(&request.body, boundary)? else {
        return Ok(UploadOutcome::NoFilePart);
    };

    let path = root.resolve_name(part.filename)?;
    tokio::fs::write(&path, part.content).await?;

    Ok(UploadOutcome::Stored {
        filename: part.filename.to_string(),
        bytes_written: part.content.len(),
    })
}

pub async fn handle(root: &ServedRoot, request: &Request) -> Result<Response, ServeError> {
    match store(root, request).await? {
        UploadOutcome::Stored {
            filename,
            bytes_written,
        } => {
            tracing::info!(filename = %filename, bytes = bytes_written, "File uploaded");
        }
        UploadOutcome::NoFilePart => {
            tracing::debug!("Upload contained no file part");
        }
    }

    Ok(Response::redirect("/"))
}
