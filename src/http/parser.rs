use crate::http::request::{
    IMPORTANT_KEY, Method, Request, normalize_path, query_params, split_fields, split_pairs,
};
use crate::params::ParameterStore;
use crate::site::DELETE_PARAMETER_PATH;
use std::collections::HashMap;
use std::fmt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Reasons a request is treated as corrupted.
///
/// Any of these means no field of the request can be trusted and the
/// connection is answered with a fixed 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Stream ended before a request line arrived
    EmptyRequest,
    /// Request line did not split into 2 or 3 tokens
    InvalidRequestLine(String),
    /// Third token was neither `HTTP/1.0` nor `HTTP/1.1`
    InvalidVersion(String),
    /// `Content-Length` was present but not an integer
    InvalidContentLength(String),
    /// Socket failed while reading the request line or headers
    Io(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "empty request"),
            ParseError::InvalidRequestLine(line) => write!(f, "invalid request line {:?}", line),
            ParseError::InvalidVersion(version) => write!(f, "unsupported version {:?}", version),
            ParseError::InvalidContentLength(value) => {
                write!(f, "invalid Content-Length {:?}", value)
            }
            ParseError::Io(e) => write!(f, "read failed: {}", e),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::Io(e.to_string())
    }
}

/// Parses exactly one request off a buffered stream.
///
/// Reads the request line, headers up to the first blank line, then at most
/// `Content-Length` body bytes. A body cut short by end of stream is kept as
/// is. Has no side effects; see [`RequestParser`] for the publishing variant.
pub async fn read_request<R>(reader: &mut R, default_page: &str) -> Result<Request, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let request_line = read_line(reader).await?.ok_or(ParseError::EmptyRequest)?;

    let tokens = split_fields(&request_line, " ");
    if tokens.len() != 2 && tokens.len() != 3 {
        return Err(ParseError::InvalidRequestLine(request_line));
    }

    let version = match tokens.get(2) {
        Some(&v) if v == "HTTP/1.1" || v == "HTTP/1.0" => Some(v.to_string()),
        Some(&v) => return Err(ParseError::InvalidVersion(v.to_string())),
        None => None,
    };

    let method = Method::parse(tokens[0]);
    let raw_path = tokens[1].to_string();
    let query_params = query_params(&raw_path);
    let path = normalize_path(&raw_path, default_page);

    let mut full_text = request_line.clone();
    let mut headers = HashMap::new();

    while let Some(line) = read_line(reader).await? {
        if line.is_empty() {
            break;
        }
        full_text.push_str("\r\n");
        full_text.push_str(&line);

        if let [name, value] = split_fields(&line, ": ").as_slice() {
            headers.insert(name.to_string(), value.to_string());
        }
    }

    // 32-bit signed range; anything wider is corrupt, negatives mean no body.
    let content_length = match headers.get("Content-Length") {
        Some(value) => value
            .parse::<i32>()
            .map_err(|_| ParseError::InvalidContentLength(value.clone()))?
            .max(0) as usize,
        None => 0,
    };

    let chunked = headers.get("chunked").is_some_and(|v| v == "yes");

    let mut params = query_params.clone();
    let mut body = Vec::new();

    if content_length > 0 {
        let mut limited = (&mut *reader).take(content_length as u64);
        if let Err(e) = limited.read_to_end(&mut body).await {
            tracing::warn!(error = %e, read = body.len(), "Body read failed, keeping partial body");
        }
        if body.len() < content_length {
            tracing::debug!(
                expected = content_length,
                read = body.len(),
                "Request body truncated"
            );
        }

        let body_text = String::from_utf8_lossy(&body);
        for (key, value) in split_pairs(&body_text) {
            params.insert(key.to_string(), value.to_string());
        }
        params
            .entry(IMPORTANT_KEY.to_string())
            .or_insert_with(|| "off".to_string());

        full_text.push_str("\r\n");
        full_text.push_str(&body_text);
    }

    Ok(Request {
        method,
        path,
        raw_path,
        version,
        query_params,
        headers,
        params,
        body,
        content_length,
        chunked,
        full_text,
    })
}

/// Reads one line, without its `\n` or `\r\n` terminator.
///
/// Returns `None` at end of stream.
async fn read_line<R>(reader: &mut R) -> Result<Option<String>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).await?;
    if n == 0 {
        return Ok(None);
    }

    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Request parser bound to the process-wide parameter store.
///
/// Every successful parse that carries parameters publishes them into the
/// store before the request is routed, so a request whose response later
/// fails still shows up in the parameter history. Requests to the
/// delete-parameter action are the exception.
#[derive(Debug, Clone)]
pub struct RequestParser {
    default_page: String,
    store: ParameterStore,
}

impl RequestParser {
    pub fn new(default_page: impl Into<String>, store: ParameterStore) -> Self {
        Self {
            default_page: default_page.into(),
            store,
        }
    }

    pub async fn parse<R>(&self, reader: &mut R) -> Result<Request, ParseError>
    where
        R: AsyncBufRead + Unpin,
    {
        let request = read_request(reader, &self.default_page).await?;

        if !request.params.is_empty() && request.path != DELETE_PARAMETER_PATH {
            self.store.merge(&request.params).await;
        }

        Ok(request)
    }
}
