use bytes::BytesMut;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::config::ServedRoot;
use crate::http::parser::{ParseError, parse_http_request_limited};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router;

const READ_CHUNK: usize = 8192;

pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    root: ServedRoot,
    max_body: usize,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

/// What the read side produced.
pub enum Incoming {
    Request(Request),
    Malformed(ParseError),
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, root: ServedRoot, max_body: usize) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            root,
            max_body,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    Incoming::Request(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    Incoming::Malformed(e) => {
                        tracing::warn!(error = %e, "Rejecting malformed request");
                        let writer = ResponseWriter::new(&Response::bad_request());
                        self.state = ConnectionState::Writing(writer, false);
                    }
                    Incoming::Closed => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    let keep_alive = req.keep_alive();
                    let response = router::dispatch(req, &self.root).await;

                    tracing::info!(
                        method = ?req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Request handled"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if *keep_alive {
                        self.state = ConnectionState::Reading;
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    pub async fn read_request(&mut self) -> anyhow::Result<Incoming> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request_limited(&self.buffer, self.max_body) {
                Ok((request, consumed)) => {
                    let _ = self.buffer.split_to(consumed);
                    return Ok(Incoming::Request(request));
                }

                Err(ParseError::Incomplete) => {}

                Err(e) => return Ok(Incoming::Malformed(e)),
            }

            self.buffer.reserve(READ_CHUNK);
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                // Client closed connection
                return Ok(Incoming::Closed);
            }
        }
    }
}
