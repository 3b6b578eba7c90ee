//! tinyserve - a small HTTP/1.1 file and echo server
//!
//! One request per connection, parsed from a single bounded read.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
