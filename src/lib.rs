//! filedrop - share one directory over plain HTTP
//!
//! Browse, download and upload files in a served root through a small
//! hand-written HTTP/1.1 server.

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod router;
pub mod server;
