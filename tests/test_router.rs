use std::ops::Deref;
use std::path::{Path, PathBuf};

use tinyserve::config::ServerConfig;
use tinyserve::http::parser::parse_http_request;
use tinyserve::http::request::Request;
use tinyserve::http::response::StatusCode;
use tinyserve::http::writer::serialize_response;
use tinyserve::router::handle_request;

/// Temporary directory removed again when dropped.
struct ScratchDir(PathBuf);

impl Deref for ScratchDir {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn scratch_dir(name: &str) -> ScratchDir {
    let dir = std::env::temp_dir().join(format!("tinyserve-router-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    ScratchDir(dir)
}

fn config_for(dir: &Path) -> ServerConfig {
    ServerConfig {
        directory: format!("{}/", dir.display()),
        ..ServerConfig::default()
    }
}

async fn route(raw: &[u8], cfg: &ServerConfig) -> Vec<u8> {
    let req = parse_http_request(raw);
    serialize_response(&handle_request(&req, cfg).await).to_vec()
}

#[tokio::test]
async fn test_root_is_bare_ok() {
    let cfg = ServerConfig::default();

    assert_eq!(route(b"GET / HTTP/1.1\r\n\r\n", &cfg).await, b"HTTP/1.1 200 OK\r\n\r\n");
    assert_eq!(route(b"GET //// HTTP/1.1\r\n\r\n", &cfg).await, b"HTTP/1.1 200 OK\r\n\r\n");
}

#[tokio::test]
async fn test_empty_request_is_bare_ok() {
    let cfg = ServerConfig::default();

    assert_eq!(route(b"", &cfg).await, b"HTTP/1.1 200 OK\r\n\r\n");
}

#[tokio::test]
async fn test_echo() {
    let cfg = ServerConfig::default();
    let resp = route(b"GET /echo/abc HTTP/1.1\r\nHost: localhost\r\n\r\n", &cfg).await;

    assert_eq!(
        resp,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc"
    );
}

#[tokio::test]
async fn test_echo_is_verbatim_and_ignores_extra_segments() {
    let cfg = ServerConfig::default();
    let req = Request {
        method: "POST".to_string(),
        path: "/echo/hello%20world/more".to_string(),
        ..Request::default()
    };

    let resp = handle_request(&req, &cfg).await;

    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.body, b"hello%20world".to_vec());
    assert_eq!(resp.header("Content-Length"), Some("13"));
}

#[tokio::test]
async fn test_echo_without_segment_is_not_found() {
    let cfg = ServerConfig::default();

    assert_eq!(route(b"GET /echo HTTP/1.1\r\n\r\n", &cfg).await, b"HTTP/1.1 404 Not Found\r\n\r\n");
    assert_eq!(route(b"GET /echo/ HTTP/1.1\r\n\r\n", &cfg).await, b"HTTP/1.1 404 Not Found\r\n\r\n");
}

#[tokio::test]
async fn test_user_agent() {
    let cfg = ServerConfig::default();
    let resp = route(b"GET /user-agent HTTP/1.1\r\nHost: localhost\r\nUser-Agent: curl/8.0\r\n\r\n", &cfg).await;

    assert_eq!(
        resp,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 8\r\n\r\ncurl/8.0"
    );
}

#[tokio::test]
async fn test_user_agent_absent() {
    let cfg = ServerConfig::default();
    let resp = route(b"GET /user-agent HTTP/1.1\r\n\r\n", &cfg).await;

    assert_eq!(
        resp,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 0\r\n\r\n"
    );
}

#[tokio::test]
async fn test_unknown_root_is_not_found_for_any_method() {
    let cfg = ServerConfig::default();

    for method in ["GET", "POST", "PUT", "BREW", ""] {
        let raw = format!("{} /nope HTTP/1.1\r\n\r\n", method);
        assert_eq!(route(raw.as_bytes(), &cfg).await, b"HTTP/1.1 404 Not Found\r\n\r\n");
    }
}

#[tokio::test]
async fn test_get_file() {
    let dir = scratch_dir("get");
    std::fs::write(dir.join("data.bin"), [0u8, 159, 146, 150, b'\n', b'x']).unwrap();
    let cfg = config_for(&dir);

    let req = parse_http_request(b"GET /files/data.bin HTTP/1.1\r\n\r\n");
    let resp = handle_request(&req, &cfg).await;

    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.header("Content-Type"), Some("application/octet-stream"));
    assert_eq!(resp.header("Content-Length"), Some("6"));
    assert_eq!(resp.body, vec![0u8, 159, 146, 150, b'\n', b'x']);
}

#[tokio::test]
async fn test_get_missing_file_is_not_found() {
    let dir = scratch_dir("missing");
    let cfg = config_for(&dir);

    assert_eq!(
        route(b"GET /files/nope.txt HTTP/1.1\r\n\r\n", &cfg).await,
        b"HTTP/1.1 404 Not Found\r\n\r\n"
    );
}

#[tokio::test]
async fn test_files_without_name_is_not_found() {
    let cfg = ServerConfig::default();

    assert_eq!(route(b"GET /files HTTP/1.1\r\n\r\n", &cfg).await, b"HTTP/1.1 404 Not Found\r\n\r\n");
    assert_eq!(route(b"POST /files/ HTTP/1.1\r\n\r\nbody", &cfg).await, b"HTTP/1.1 404 Not Found\r\n\r\n");
}

#[tokio::test]
async fn test_files_other_methods_not_found() {
    let dir = scratch_dir("methods");
    std::fs::write(dir.join("present"), b"here").unwrap();
    let cfg = config_for(&dir);

    for method in ["PUT", "DELETE", "HEAD", "get"] {
        let raw = format!("{} /files/present HTTP/1.1\r\n\r\n", method);
        assert_eq!(route(raw.as_bytes(), &cfg).await, b"HTTP/1.1 404 Not Found\r\n\r\n");
    }
}

#[tokio::test]
async fn test_post_then_get_round_trip() {
    let dir = scratch_dir("roundtrip");
    let cfg = config_for(&dir);

    let created = route(
        b"POST /files/note.txt HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/octet-stream\r\nContent-Length: 11\r\n\r\nhello world",
        &cfg,
    )
    .await;
    assert_eq!(created, b"HTTP/1.1 201 Created\r\n\r\n");
    assert_eq!(std::fs::read(dir.join("note.txt")).unwrap(), b"hello world");

    let fetched = route(b"GET /files/note.txt HTTP/1.1\r\n\r\n", &cfg).await;
    assert_eq!(
        fetched,
        b"HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: 11\r\n\r\nhello world"
    );
}

#[tokio::test]
async fn test_post_truncates_existing_file() {
    let dir = scratch_dir("truncate");
    std::fs::write(dir.join("f"), b"a much longer previous content").unwrap();
    let cfg = config_for(&dir);

    route(b"POST /files/f HTTP/1.1\r\n\r\nshort", &cfg).await;

    assert_eq!(std::fs::read(dir.join("f")).unwrap(), b"short");
}

#[tokio::test]
async fn test_post_write_failure_is_internal_error() {
    let dir = scratch_dir("writefail");
    let cfg = ServerConfig {
        directory: format!("{}/no-such-subdir/", dir.display()),
        ..ServerConfig::default()
    };

    assert_eq!(
        route(b"POST /files/x HTTP/1.1\r\n\r\nbody", &cfg).await,
        b"HTTP/1.1 500 Internal Server Error\r\n\r\n"
    );
}

#[tokio::test]
async fn test_dot_segments_are_refused() {
    let dir = scratch_dir("traversal");
    let cfg = config_for(&dir);

    assert_eq!(
        route(b"GET /files/.. HTTP/1.1\r\n\r\n", &cfg).await,
        b"HTTP/1.1 404 Not Found\r\n\r\n"
    );
    assert_eq!(
        route(b"POST /files/.. HTTP/1.1\r\n\r\nx", &cfg).await,
        b"HTTP/1.1 404 Not Found\r\n\r\n"
    );
}

#[tokio::test]
async fn test_get_directory_is_not_found() {
    let dir = scratch_dir("dir");
    std::fs::create_dir_all(dir.join("sub")).unwrap();
    let cfg = config_for(&dir);

    assert_eq!(
        route(b"GET /files/sub HTTP/1.1\r\n\r\n", &cfg).await,
        b"HTTP/1.1 404 Not Found\r\n\r\n"
    );
}
