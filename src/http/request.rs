use std::collections::HashMap;

/// Form key that only accepts `on` or `off`, defaulted to `off` for every body.
pub const IMPORTANT_KEY: &str = "important";

/// HTTP request methods.
///
/// GET, HEAD, POST and TRACE are served; OPTIONS, DELETE, PATCH and PUT are
/// recognized but answered with 501. Any other token is kept verbatim in
/// `Unknown` and answered with 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// POST - Submit form data
    POST,
    /// TRACE - Echo the request back
    TRACE,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// DELETE - Delete a resource
    DELETE,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// PUT - Replace a resource
    PUT,
    /// Any token outside the set above
    Unknown(String),
}

impl Method {
    /// Parses an HTTP method token. Matching is case-sensitive.
    ///
    /// ```
    /// # use paramserve::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Unknown("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "TRACE" => Method::TRACE,
            "OPTIONS" => Method::OPTIONS,
            "DELETE" => Method::DELETE,
            "PATCH" => Method::PATCH,
            "PUT" => Method::PUT,
            other => Method::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::TRACE => "TRACE",
            Method::OPTIONS => "OPTIONS",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::PUT => "PUT",
            Method::Unknown(token) => token,
        }
    }

    /// Methods acknowledged with 501 Not Implemented.
    pub fn is_unimplemented(&self) -> bool {
        matches!(
            self,
            Method::OPTIONS | Method::DELETE | Method::PATCH | Method::PUT
        )
    }
}

/// A request that passed structural validation.
///
/// Built once per connection by the parser and never mutated afterwards.
/// Header names are stored exactly as received, so lookups are
/// case-sensitive: `content-length` does not answer for `Content-Length`.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Routable path after query stripping, default-page substitution and
    /// `../` removal
    pub path: String,
    /// Path token exactly as it appeared on the request line
    pub raw_path: String,
    /// `None` for two-token request lines
    pub version: Option<String>,
    pub query_params: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    /// Query parameters merged with form body pairs, body winning on collision
    pub params: HashMap<String, String>,
    pub body: Vec<u8>,
    /// Declared body length; the body itself may be shorter if the peer hung up
    pub content_length: usize,
    /// Set by the non-standard `chunked: yes` request header
    pub chunked: bool,
    /// Request line, headers and body joined with CRLF, used by TRACE
    pub full_text: String,
}

impl Request {
    /// Retrieves a header value by its exact, case-sensitive name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// `Referer` header, or "" when absent.
    pub fn referer(&self) -> &str {
        self.header("Referer").unwrap_or("")
    }

    /// `User-Agent` header, or "" when absent.
    pub fn user_agent(&self) -> &str {
        self.header("User-Agent").unwrap_or("")
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(|v| v.as_str())
    }

    /// Whether the routable path names a bitmap image.
    pub fn is_image(&self) -> bool {
        [".bmp", ".gif", ".png", ".jpg"]
            .iter()
            .any(|ext| self.path.ends_with(ext))
    }

    /// HEAD responses carry headers only.
    pub fn suppresses_body(&self) -> bool {
        self.method == Method::HEAD
    }
}

/// Splits `input` on `sep`, dropping trailing empty fields.
///
/// `"a=1="` on `=` gives `["a", "1"]`, and a line made only of separators
/// gives nothing. An empty input still yields one empty field.
pub fn split_fields<'a>(input: &'a str, sep: &str) -> Vec<&'a str> {
    let mut fields: Vec<&str> = input.split(sep).collect();
    if input.is_empty() {
        return fields;
    }
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Splits `k1=v1&k2=v2` into pairs.
///
/// A pair survives only if it splits on `=` into exactly two non-empty
/// fields once trailing empties are dropped. `a=1=` keeps `a=1`; `a=`,
/// `=1`, `a=1=2` and `flag` are dropped.
pub fn split_pairs(input: &str) -> impl Iterator<Item = (&str, &str)> {
    input
        .split('&')
        .filter_map(|pair| match split_fields(pair, "=").as_slice() {
            [key, value] if !key.is_empty() && !value.is_empty() => Some((*key, *value)),
            _ => None,
        })
}

/// Extracts query parameters from a request-line path.
///
/// The query is the text between the first and the second `?`.
pub fn query_params(raw_path: &str) -> HashMap<String, String> {
    raw_path
        .split('?')
        .nth(1)
        .map(|query| {
            split_pairs(query)
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Turns a request-line path into the path used for routing.
///
/// Drops the query suffix, maps `/` to the default page and removes every
/// `../` sequence. Removal repeats until nothing changes, so overlapping
/// input such as `....//` cannot leave a fresh `../` behind after one pass.
pub fn normalize_path(raw_path: &str, default_page: &str) -> String {
    let path = raw_path.split('?').next().unwrap_or_default();

    let path = if path == "/" {
        format!("/{}", default_page.trim_start_matches('/'))
    } else {
        path.to_string()
    };

    strip_traversal(path)
}

fn strip_traversal(mut path: String) -> String {
    while path.contains("../") {
        path = path.replace("../", "/");
    }
    path
}
