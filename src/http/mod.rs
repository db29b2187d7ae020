//! HTTP/1.x protocol layer.
//!
//! One request per connection: no keep-alive, no pipelining.
//!
//! # Architecture
//!
//! - **`parser`**: Reads the request line, headers and `Content-Length` body off a buffered stream
//! - **`request`**: Parsed request, method set, query/form pair splitting and path normalization
//! - **`response`**: Status table, canned bodies and the pending response value
//! - **`writer`**: Frames a response with `Content-Length` or chunked transfer encoding
//! - **`connection`**: Per-connection state machine from parse to close
//! - **`mime`**: Content-type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingRequest  │ ← Parse one request
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │     Parsed       │
//!        └──────┬───────────┘
//!               ├─ parse error → Corrupted (fixed 400)
//!               └─ valid       → Routed (handler by method)
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← Frame and flush
//!        └──────┬───────────┘
//!               ▼
//!            Closed          ← socket shut down on every path
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
