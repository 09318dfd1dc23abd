use std::sync::Arc;
use std::time::Duration;

use tokio::io::BufReader;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

use crate::http::compression::apply_compression;
use crate::http::parser::{ParseError, parse_request};
use crate::http::request::Request;
use crate::http::response::{Response, Status};
use crate::http::writer::ResponseWriter;
use crate::server::router::Router;

/// Owns one accepted connection and drives it through the request-response
/// state machine until it closes.
pub struct Connection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    router: Arc<Router>,
    idle_timeout: Duration,
    state: ConnectionState,
}

pub enum ConnectionState {
    Idle,
    Dispatching(Request),
    Responding(ResponseWriter, bool), // bool = close after write?
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, router: Arc<Router>, idle_timeout: Duration) -> Self {
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: write_half,
            router,
            idle_timeout,
            state: ConnectionState::Idle,
        }
    }

    /// Runs the connection to completion.
    ///
    /// One request/response pair is in flight at a time; the next request is
    /// not read until the current response has been fully written. An error
    /// return means the write side failed mid-response.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Idle => {
                    // The idle deadline covers the whole parse, measured from
                    // cycle start.
                    let parsed =
                        match timeout(self.idle_timeout, parse_request(&mut self.reader)).await {
                            Ok(result) => result,
                            Err(_) => Err(ParseError::Timeout),
                        };

                    self.state = match parsed {
                        Ok(request) => ConnectionState::Dispatching(request),
                        Err(ParseError::Timeout) | Err(ParseError::ConnectionClosed) => {
                            ConnectionState::Closed
                        }
                        Err(err) => {
                            // Malformed request: answer 400, then close.
                            tracing::debug!(error = ?err, "malformed request");
                            let mut response = Response::new();
                            response.status = Status::BadRequest;
                            response.set_header("Connection", "close");
                            ConnectionState::Responding(ResponseWriter::new(response), true)
                        }
                    };
                }

                ConnectionState::Dispatching(request) => {
                    tracing::debug!(
                        method = %request.method,
                        path = %request.path,
                        "dispatching request"
                    );

                    let mut response = Response::new();
                    let handler = self.router.resolve(&request.method, &request.path);
                    handler(request, &mut response);

                    apply_compression(request, &mut response);

                    let close = !request.keep_alive();
                    response.set_header("Connection", if close { "close" } else { "keep-alive" });

                    self.state = ConnectionState::Responding(ResponseWriter::new(response), close);
                }

                ConnectionState::Responding(writer, close) => {
                    let close = *close;
                    writer.write_to_stream(&mut self.writer).await?;

                    self.state = if close {
                        ConnectionState::Closed
                    } else {
                        ConnectionState::Idle // go back for the next request
                    };
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }
}
