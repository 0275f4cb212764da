use crate::http::request::{Method, Request};
use std::collections::HashMap;
use thiserror::Error;

/// Largest header section accepted before the request is rejected.
pub const MAX_HEADER_BYTES: usize = 64 * 1024;

/// Body cap used by [`parse_http_request`].
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid request line")]
    InvalidRequest,
    #[error("unsupported method")]
    InvalidMethod,
    #[error("invalid header line")]
    InvalidHeader,
    #[error("header section too large")]
    HeadersTooLarge,
    #[error("announced body of {0} bytes exceeds the limit")]
    BodyTooLarge(usize),
    #[error("incomplete request")]
    Incomplete,
}

/// Parses one request from the front of `buf`.
///
/// Returns the request and the number of bytes it occupied. A
/// `Content-Length` that is not a number is kept in the headers but treated
/// as an empty body; [`Request::keep_alive`] then closes the connection.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    parse_http_request_limited(buf, DEFAULT_MAX_BODY_BYTES)
}

/// Like [`parse_http_request`], rejecting a `Content-Length` above `max_body`
/// as soon as the headers are complete, before any body is buffered.
pub fn parse_http_request_limited(
    buf: &[u8],
    max_body: usize,
) -> Result<(Request, usize), ParseError> {
    // Look for header/body separator
    let headers_end = match find_headers_end(buf) {
        Some(end) => end,
        None if buf.len() > MAX_HEADER_BYTES => return Err(ParseError::HeadersTooLarge),
        None => return Err(ParseError::Incomplete),
    };
    let header_bytes = &buf[..headers_end];
    let body_bytes = &buf[headers_end + 4..];

    let headers_str =
        std::str::from_utf8(header_bytes).map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let mut parts = request_line.split_whitespace();

    let method_str = parts.next().ok_or(ParseError::InvalidRequest)?;
    let path = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().ok_or(ParseError::InvalidRequest)?;

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;

        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    // Body
    let content_length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);

    if content_length > max_body {
        return Err(ParseError::BodyTooLarge(content_length));
    }

    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    let body = body_bytes[..content_length].to_vec();

    let request = Request {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    };

    let total_consumed = headers_end + 4 + content_length;
    Ok((request, total_consumed))
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
