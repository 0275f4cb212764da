//! Byte-level `multipart/form-data` scanning.
//!
//! This is not a MIME parser. The body is split on the boundary token and
//! each segment that mentions `filename="` is run through a small scanner:
//!
//! ```text
//!   Preamble ──► Headers ──► Body
//!   (skip CRLF)  (up to the   (rest of the segment, minus the
//!                blank line)  "\r\n--" that precedes the next boundary)
//! ```
//!
//! The first segment whose header block names a non-empty file wins.

use std::ops::Range;

use thiserror::Error;

const CRLF: &[u8] = b"\r\n";
const BLANK_LINE: &[u8] = b"\r\n\r\n";
const DELIMITER_PREFIX: &[u8] = b"\r\n--";
const FILENAME_MARKER: &[u8] = b"filename=\"";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MultipartError {
    #[error("missing or invalid Content-Length")]
    InvalidContentLength,
    #[error("missing Content-Type")]
    MissingContentType,
    #[error("no boundary parameter in Content-Type")]
    MissingBoundary,
    #[error("part headers are not terminated by a blank line")]
    UnterminatedHeaders,
    #[error("file name is unterminated or not valid UTF-8")]
    InvalidFilename,
}

/// One part of a multipart body, borrowed from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultipartPart<'a> {
    pub headers: &'a [u8],
    pub body: &'a [u8],
}

/// The uploaded file found in a multipart body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilePart<'a> {
    pub filename: &'a str,
    pub content: &'a [u8],
}

enum ScanState {
    Preamble,
    Headers,
    Body { headers: Range<usize> },
}

/// Extracts the `boundary=` parameter from a `Content-Type` value.
///
/// Surrounding quotes are removed and the token ends at the next `;`.
pub fn boundary(content_type: &str) -> Result<&str, MultipartError> {
    let (_, rest) = content_type
        .split_once("boundary=")
        .ok_or(MultipartError::MissingBoundary)?;
    let token = rest
        .split_once(';')
        .map_or(rest, |(token, _)| token)
        .trim()
        .trim_matches('"');

    if token.is_empty() {
        return Err(MultipartError::MissingBoundary);
    }
    Ok(token)
}

/// Splits `body` on every occurrence of `boundary`.
pub fn segments<'a>(body: &'a [u8], boundary: &[u8]) -> Vec<&'a [u8]> {
    let mut segments = Vec::new();
    let mut start = 0;

    while let Some(offset) = find(&body[start..], boundary) {
        segments.push(&body[start..start + offset]);
        start += offset + boundary.len();
    }
    segments.push(&body[start..]);

    segments
}

/// Runs one segment through the Preamble → Headers → Body scanner.
///
/// A segment without a blank line after its headers is malformed. A segment
/// without a trailing delimiter keeps every byte after the blank line.
pub fn scan_part(segment: &[u8]) -> Result<MultipartPart<'_>, MultipartError> {
    let mut state = ScanState::Preamble;
    let mut cursor = 0;

    loop {
        state = match state {
            ScanState::Preamble => {
                if segment.starts_with(CRLF) {
                    cursor = CRLF.len();
                }
                ScanState::Headers
            }
            ScanState::Headers => {
                let end = cursor
                    + find(&segment[cursor..], BLANK_LINE)
                        .ok_or(MultipartError::UnterminatedHeaders)?;
                let headers = cursor..end;
                cursor = end + BLANK_LINE.len();
                ScanState::Body { headers }
            }
            ScanState::Body { headers } => {
                let rest = &segment[cursor..];
                let body = rest.strip_suffix(DELIMITER_PREFIX).unwrap_or(rest);
                return Ok(MultipartPart {
                    headers: &segment[headers],
                    body,
                });
            }
        };
    }
}

impl<'a> MultipartPart<'a> {
    /// The `filename="..."` value from the header block, if there is one.
    pub fn filename(&self) -> Result<Option<&'a str>, MultipartError> {
        let Some(pos) = find(self.headers, FILENAME_MARKER) else {
            return Ok(None);
        };
        let start = pos + FILENAME_MARKER.len();
        let len = find(&self.headers[start..], b"\"").ok_or(MultipartError::InvalidFilename)?;

        std::str::from_utf8(&self.headers[start..start + len])
            .map(Some)
            .map_err(|_| MultipartError::InvalidFilename)
    }
}

/// Finds the first file part in `body`.
///
/// Segments without the filename marker (form fields, the preamble, the
/// closing `--`) are skipped, as are parts with an empty file name.
pub fn find_file_part<'a>(
    body: &'a [u8],
    boundary: &str,
) -> Result<Option<FilePart<'a>>, MultipartError> {
    for segment in segments(body, boundary.as_bytes()) {
        if find(segment, FILENAME_MARKER).is_none() {
            continue;
        }

        let part = scan_part(segment)?;
        match part.filename()? {
            Some(filename) if !filename.is_empty() => {
                return Ok(Some(FilePart {
                    filename,
                    content: part.body,
                }));
            }
            _ => continue,
        }
    }

    Ok(None)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanner_skips_leading_line_break() {
        let part = scan_part(b"\r\nX: y\r\n\r\nabc\r\n--").unwrap();
        assert_eq!(part.headers, b"X: y");
        assert_eq!(part.body, b"abc");
    }

    #[test]
    fn scanner_without_leading_line_break() {
        let part = scan_part(b"X: y\r\n\r\nabc").unwrap();
        assert_eq!(part.headers, b"X: y");
        assert_eq!(part.body, b"abc");
    }

    #[test]
    fn scanner_rejects_missing_blank_line() {
        assert_eq!(
            scan_part(b"\r\nX: y\r\nabc").unwrap_err(),
            MultipartError::UnterminatedHeaders
        );
    }

    #[test]
    fn find_handles_short_haystack() {
        assert_eq!(find(b"ab", b"abc"), None);
        assert_eq!(find(b"abc", b""), None);
        assert_eq!(find(b"xabc", b"abc"), Some(1));
    }
}
