/// HTTP status codes the server emits.
///
/// - `Ok` (200): Request successful
/// - `BadRequest` (400): Corrupted request or unknown method
/// - `NotFound` (404): File missing or a directory
/// - `InternalServerError` (500): I/O failure before any byte was sent
/// - `NotImplemented` (501): Recognized but unsupported method
/// - `Other`: any other numeric code, reported as Internal Server Error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
    /// Code outside the table above
    Other(u16),
}

impl StatusCode {
    pub fn from_u16(code: u16) -> Self {
        match code {
            200 => StatusCode::Ok,
            400 => StatusCode::BadRequest,
            404 => StatusCode::NotFound,
            500 => StatusCode::InternalServerError,
            501 => StatusCode::NotImplemented,
            other => StatusCode::Other(other),
        }
    }

    /// Returns the numeric HTTP status code.
    ///
    /// ```
    /// # use paramserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::Other(418).as_u16(), 418);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
            StatusCode::Other(code) => *code,
        }
    }

    /// Reason phrase for the status line. Unknown codes keep their number but
    /// read "Internal Server Error".
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::InternalServerError | StatusCode::Other(_) => "Internal Server Error",
        }
    }

    /// Body sent when a non-200 response has none of its own.
    pub fn canned_body(&self) -> &'static str {
        match self {
            StatusCode::Ok => "",
            StatusCode::BadRequest => "Bad request - The request is corrupted",
            StatusCode::NotFound => "The requested file was not found",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::InternalServerError | StatusCode::Other(_) => "Internal Server Error",
        }
    }
}

/// A response waiting to be framed onto the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: String,
    /// `None` means "use the canned body for the status"
    pub body: Option<Vec<u8>>,
}

impl Response {
    pub fn new(status: StatusCode, content_type: impl Into<String>, body: Option<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body,
        }
    }

    /// 200 OK with the given payload.
    pub fn ok(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::Ok, content_type, Some(body.into()))
    }

    /// HTML response with an explicit body.
    pub fn html(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status, "text/html", Some(body.into().into_bytes()))
    }

    /// Status-only response; the canned message becomes the body.
    pub fn error(status: StatusCode) -> Self {
        Self::new(status, "text/html", None)
    }

    pub fn bad_request() -> Self {
        Self::error(StatusCode::BadRequest)
    }

    pub fn not_found() -> Self {
        Self::error(StatusCode::NotFound)
    }

    pub fn internal_error() -> Self {
        Self::error(StatusCode::InternalServerError)
    }

    pub fn not_implemented() -> Self {
        Self::error(StatusCode::NotImplemented)
    }

    /// The bytes that will actually be sent.
    pub fn payload(&self) -> &[u8] {
        match &self.body {
            Some(body) => body.as_slice(),
            None => self.status.canned_body().as_bytes(),
        }
    }
}
