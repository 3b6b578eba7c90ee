//! HTTP wire handling.
//!
//! - **`connection`**: per-connection driver, one request then close
//! - **`parser`**: single capped read and line-oriented request parsing
//! - **`request`**: the parsed request and method tokens
//! - **`response`**: status lines and the response builder
//! - **`writer`**: serializes and writes responses to the client
//!
//! # Connection lifecycle
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← one read of at most 2048 bytes
//!        └──────┬──────┘
//!               ├─ read failed → Closed (nothing sent)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← route to a resource
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← send response
//!        └──────┬───────────┘
//!               ▼
//!             Closed
//! ```
//!
//! # Accepted request shape
//!
//! ```text
//! METHOD SP RESOURCE SP PROTOCOL CRLF
//! Header-Name: value CRLF        (Host, User-Agent, Accept,
//! ...                             Content-Type, Content-Length only)
//! CRLF                            (first non-header line, dropped)
//! body lines, rejoined with CRLF
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
