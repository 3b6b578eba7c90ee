use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::request::Request;

/// Hard cap on a single request read. Anything past it is dropped.
pub const MAX_REQUEST_LEN: usize = 2048;

/// The only headers the parser extracts, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Header {
    Host,
    UserAgent,
    Accept,
    ContentType,
    ContentLength,
}

impl Header {
    const ALL: [Header; 5] = [
        Header::Host,
        Header::UserAgent,
        Header::Accept,
        Header::ContentType,
        Header::ContentLength,
    ];

    fn marker(self) -> &'static str {
        match self {
            Header::Host => "Host:",
            Header::UserAgent => "User-Agent:",
            Header::Accept => "Accept:",
            Header::ContentType => "Content-Type:",
            Header::ContentLength => "Content-Length:",
        }
    }

    /// First header whose marker occurs anywhere in the line.
    fn find(line: &str) -> Option<Header> {
        Self::ALL.into_iter().find(|h| line.contains(h.marker()))
    }

    fn slot(self, request: &mut Request) -> &mut Option<String> {
        match self {
            Header::Host => &mut request.host,
            Header::UserAgent => &mut request.user_agent,
            Header::Accept => &mut request.accept,
            Header::ContentType => &mut request.content_type,
            Header::ContentLength => &mut request.content_length,
        }
    }
}

/// Performs exactly one read of at most [`MAX_REQUEST_LEN`] bytes.
///
/// A peer that closes without sending yields `Ok` with an empty buffer;
/// only a failed read is an error.
pub async fn read_request<R>(reader: &mut R) -> std::io::Result<Bytes>
where
    R: AsyncRead + Unpin,
{
    let mut buf = BytesMut::zeroed(MAX_REQUEST_LEN);
    let n = reader.read(&mut buf[..]).await?;
    buf.truncate(n);
    Ok(buf.freeze())
}

/// Interprets a raw buffer as one request, best effort.
///
/// Line 0 is the request line. Following lines are checked for the five
/// header markers by substring search. The first line that matches none of
/// them is dropped and everything after it is body, joined with CR LF.
/// Markers are not searched for once the body has started, so a body line
/// containing `Host:` stays in the body.
pub fn parse_http_request(buf: &[u8]) -> Request {
    let mut request = Request::default();
    let mut lines = split_lines(buf);

    if let Some(line) = lines.next() {
        let line = String::from_utf8_lossy(line);
        let mut parts = line.split_ascii_whitespace();
        request.method = parts.next().unwrap_or_default().to_string();
        request.path = parts.next().unwrap_or_default().to_string();
        request.version = parts.next().unwrap_or_default().to_string();
    }

    let mut body_started = false;
    for line in lines {
        if body_started {
            // no separator until the body holds something
            if !request.body.is_empty() {
                request.body.extend_from_slice(b"\r\n");
            }
            request.body.extend_from_slice(line);
            continue;
        }

        let text = String::from_utf8_lossy(line);
        match Header::find(&text) {
            Some(header) => {
                if let Some(value) = text.split_ascii_whitespace().nth(1) {
                    *header.slot(&mut request) = Some(value.to_string());
                }
            }
            None => body_started = true,
        }
    }

    request
}

/// Splits on LF, stripping one trailing CR per line. A final LF does not
/// start another line.
fn split_lines(buf: &[u8]) -> impl Iterator<Item = &[u8]> {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Non-empty `/`-separated segments of a resource path.
///
/// ```
/// # use tinyserve::http::parser::split_segments;
/// assert_eq!(split_segments("/a//b/"), vec!["a", "b"]);
/// assert!(split_segments("").is_empty());
/// ```
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
