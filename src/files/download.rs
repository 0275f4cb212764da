//! `GET /download/<name>`

use crate::config::ServedRoot;
use crate::error::ServeError;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Percent-decodes a path segment. Invalid UTF-8 becomes U+FFFD.
pub fn decode_name(encoded: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(encoded.as_bytes())).into_owned()
}

/// Sends a regular file inside the root as an attachment.
///
/// The whole file is read before the response is built.
pub async fn handle(root: &ServedRoot, name: &str) -> Result<Response, ServeError> {
    let path = root.resolve_name(name)?;

    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(ServeError::NotFound(name.to_string()));
    }

    let content = tokio::fs::read(&path).await?;
    tracing::info!(filename = %name, bytes = content.len(), "Sending download");

    Ok(ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "application/octet-stream")
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{name}\""),
        )
        .body(content)
        .build())
}
