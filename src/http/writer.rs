use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::request::Request;
use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";
const CRLF: &[u8] = b"\r\n";

/// Payload bytes per chunk in chunked mode.
pub const CHUNK_SIZE: usize = 1000;

/// How a response is put on the wire, decided by the request it answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameMode {
    /// `Transfer-Encoding: chunked` instead of `Content-Length`
    pub chunked: bool,
    /// Headers only (HEAD)
    pub headers_only: bool,
}

impl FrameMode {
    pub fn for_request(request: &Request) -> Self {
        Self {
            chunked: request.chunked,
            headers_only: request.suppresses_body(),
        }
    }
}

fn serialize_head(resp: &Response, mode: FrameMode) -> Bytes {
    let mut buf = BytesMut::with_capacity(128);

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());

    // Framing header
    if mode.chunked {
        buf.put_slice(b"Transfer-Encoding: chunked\r\n");
    } else {
        buf.put_slice(format!("Content-Length: {}\r\n", resp.payload().len()).as_bytes());
    }

    buf.put_slice(format!("Content-Type: {}\r\n", resp.content_type).as_bytes());

    // Header/body separator
    buf.put_slice(CRLF);

    buf.freeze()
}

/// Splits `payload` into chunked transfer-encoding frames, terminator included.
///
/// Each frame is `<hex size>\r\n<data>\r\n`; the last one is `0\r\n\r\n`.
pub fn encode_chunks(payload: &[u8]) -> Vec<Bytes> {
    let mut frames: Vec<Bytes> = payload
        .chunks(CHUNK_SIZE)
        .map(|data| {
            let mut frame = BytesMut::with_capacity(data.len() + 10);
            frame.put_slice(format!("{:x}", data.len()).as_bytes());
            frame.put_slice(CRLF);
            frame.put_slice(data);
            frame.put_slice(CRLF);
            frame.freeze()
        })
        .collect();

    frames.push(Bytes::from_static(b"0\r\n\r\n"));
    frames
}

/// Frames one response and writes it to a stream.
///
/// The head is flushed before any body byte so a failure mid-body leaves the
/// peer with a complete status line. Once body bytes are out, a write error
/// can only be reported, not turned into another response.
pub struct ResponseWriter {
    head: Bytes,
    body: Vec<Bytes>,
}

impl ResponseWriter {
    pub fn new(response: &Response, mode: FrameMode) -> Self {
        let body = if mode.headers_only {
            Vec::new()
        } else if mode.chunked {
            encode_chunks(response.payload())
        } else {
            vec![Bytes::copy_from_slice(response.payload())]
        };

        Self {
            head: serialize_head(response, mode),
            body,
        }
    }

    /// Total number of bytes this writer puts on the wire.
    pub fn wire_len(&self) -> usize {
        self.head.len() + self.body.iter().map(Bytes::len).sum::<usize>()
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        write_fully(stream, &self.head).await?;
        stream.flush().await?;

        for frame in &self.body {
            write_fully(stream, frame).await?;
        }
        stream.flush().await?;

        Ok(())
    }
}

async fn write_fully<W>(stream: &mut W, buf: &[u8]) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while written < buf.len() {
        let n = stream.write(&buf[written..]).await?;

        if n == 0 {
            return Err(anyhow::anyhow!("connection closed while writing"));
        }

        written += n;
    }
    Ok(())
}
