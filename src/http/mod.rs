//! HTTP protocol implementation.
//!
//! A small hand-written HTTP/1.1 server layer with keep-alive support.
//!
//! # Architecture
//!
//! - **`connection`**: the per-client request-response state machine
//! - **`parser`**: parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: serializes and writes HTTP responses to the client
//! - **`mime`**: content type detection based on file extensions
//! - **`multipart`**: extracts an uploaded file from a `multipart/form-data` body
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received (malformed → 400, then Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Dispatch to a handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```

pub mod connection;
pub mod mime;
pub mod multipart;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
