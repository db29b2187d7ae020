use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::http::parser::{ParseError, RequestParser};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::{FrameMode, ResponseWriter};
use crate::site::Site;

/// One accepted socket, handled start to close exactly once.
pub struct Connection<S> {
    stream: BufReader<S>,
    parser: RequestParser,
    site: Site,
    state: ConnectionState,
}

pub enum ConnectionState {
    AwaitingRequest,
    Parsed(Result<Request, ParseError>),
    Corrupted(ParseError),
    Routed(Request),
    Responding(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, site: Site) -> Self {
        let parser = RequestParser::new(site.default_page(), site.store().clone());
        Self {
            stream: BufReader::new(stream),
            parser,
            site,
            state: ConnectionState::AwaitingRequest,
        }
    }

    /// Drives the connection to `Closed`.
    ///
    /// The stream is shut down on every path out, including a failed write.
    /// The returned error only reports what went wrong while responding.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.drive().await;

        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(error = %e, "Shutdown after response failed");
        }

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::AwaitingRequest => {
                    ConnectionState::Parsed(self.parser.parse(&mut self.stream).await)
                }

                ConnectionState::Parsed(Ok(request)) => {
                    tracing::info!(
                        method = request.method.as_str(),
                        path = %request.path,
                        chunked = request.chunked,
                        "Request parsed"
                    );
                    tracing::debug!(full_request = %request.full_text, "Raw request");
                    ConnectionState::Routed(request)
                }

                ConnectionState::Parsed(Err(e)) => ConnectionState::Corrupted(e),

                ConnectionState::Corrupted(e) => {
                    tracing::warn!(reason = %e, "Corrupted request");
                    let writer = ResponseWriter::new(&Response::bad_request(), FrameMode::default());
                    ConnectionState::Responding(writer)
                }

                ConnectionState::Routed(request) => {
                    let response = self.site.handle(&request).await;
                    let mode = FrameMode::for_request(&request);

                    tracing::info!(
                        status = response.status.as_u16(),
                        content_type = %response.content_type,
                        chunked = mode.chunked,
                        "Sending response"
                    );
                    ConnectionState::Responding(ResponseWriter::new(&response, mode))
                }

                ConnectionState::Responding(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }
}
