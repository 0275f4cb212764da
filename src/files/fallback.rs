//! Static files for any other `GET` path.

use crate::config::ServedRoot;
use crate::error::ServeError;
use crate::files::download::decode_name;
use crate::http::mime::content_type_for;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Serves `path` (query already stripped) relative to the root.
///
/// Paths that climb out of the root, directories, and missing files are 404.
pub async fn handle(root: &ServedRoot, path: &str) -> Result<Response, ServeError> {
    let decoded = decode_name(path);
    let relative = decoded.trim_start_matches('/');

    let Some(target) = root.resolve_relative(relative) else {
        tracing::warn!(path = %decoded, "Rejecting path outside served root");
        return Err(ServeError::NotFound(decoded));
    };

    let is_file = tokio::fs::metadata(&target)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(ServeError::NotFound(decoded));
    }

    let content = tokio::fs::read(&target).await?;

    Ok(ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", content_type_for(&target))
        .body(content)
        .build())
}
