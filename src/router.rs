//! Request dispatch.
//!
//! ```text
//!   GET  /                 → listing
//!   GET  /download/<name>  → download
//!   POST /upload           → upload
//!   GET  anything else     → static fallback
//!   *    *                 → 404
//! ```

use crate::config::ServedRoot;
use crate::error::ServeError;
use crate::files::{download, fallback, listing, upload};
use crate::http::request::{Method, Request};
use crate::http::response::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    Exact(&'static str),
    /// Matches when a non-empty remainder follows the prefix.
    Prefix(&'static str),
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Listing,
    Download,
    Upload,
    Static,
}

/// Checked in order; the first match wins.
pub const ROUTES: &[(Method, PathPattern, RouteKind)] = &[
    (Method::GET, PathPattern::Exact("/"), RouteKind::Listing),
    (Method::GET, PathPattern::Prefix("/download/"), RouteKind::Download),
    (Method::POST, PathPattern::Exact("/upload"), RouteKind::Upload),
    (Method::GET, PathPattern::Any, RouteKind::Static),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    Listing,
    /// Percent-decoded file name.
    Download(String),
    Upload,
    Static(&'a str),
    NotFound,
}

impl PathPattern {
    /// Returns the part of `path` after the pattern, if it matches.
    fn matches<'a>(&self, path: &'a str) -> Option<&'a str> {
        match self {
            PathPattern::Exact(p) => (path == *p).then_some(""),
            PathPattern::Prefix(p) => path.strip_prefix(*p).filter(|rest| !rest.is_empty()),
            PathPattern::Any => Some(path),
        }
    }
}

/// Picks exactly one route for `(method, path)`. `path` carries no query string.
pub fn resolve(method: Method, path: &str) -> Route<'_> {
    let found = ROUTES.iter().find_map(|(m, pattern, kind)| {
        if *m != method {
            return None;
        }
        pattern.matches(path).map(|rest| (*kind, rest))
    });

    match found {
        Some((RouteKind::Listing, _)) => Route::Listing,
        Some((RouteKind::Download, name)) => Route::Download(download::decode_name(name)),
        Some((RouteKind::Upload, _)) => Route::Upload,
        Some((RouteKind::Static, path)) => Route::Static(path),
        None => Route::NotFound,
    }
}

/// Runs the matching handler. Handler errors become error responses here.
pub async fn dispatch(req: &Request, root: &ServedRoot) -> Response {
    let result = match resolve(req.method, req.route_path()) {
        Route::Listing => listing::handle(root).await,
        Route::Download(name) => download::handle(root, &name).await,
        Route::Upload => upload::handle(root, req).await,
        Route::Static(path) => fallback::handle(root, path).await,
        Route::NotFound => Err(ServeError::NotFound(req.path.clone())),
    };

    result.unwrap_or_else(|e| {
        match &e {
            ServeError::NotFound(_) => tracing::debug!(error = %e, "Not found"),
            ServeError::UnsafeName(_) => tracing::warn!(error = %e, "Rejected file name"),
            _ => tracing::error!(error = %e, path = %req.path, "Request failed"),
        }
        e.into_response()
    })
}
