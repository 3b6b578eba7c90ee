//! The `/files/<name>` resource.
//!
//! Paths are `directory + name` with no separator added. `name` is a single
//! segment and so never holds a `/`; `.` and `..` are refused.

use tracing::warn;

use crate::http::response::Response;

fn resolve(directory: &str, name: &str) -> Option<String> {
    if name == "." || name == ".." {
        return None;
    }
    Some(format!("{directory}{name}"))
}

pub async fn read(directory: &str, name: &str) -> Response {
    let Some(path) = resolve(directory, name) else {
        warn!(segment = name, "Refusing relative file segment");
        return Response::not_found();
    };

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            warn!(path = %path, "Not a regular file");
            return Response::not_found();
        }
        Err(e) => {
            warn!(path = %path, error = %e, "stat failed");
            return Response::not_found();
        }
    }

    match tokio::fs::read(&path).await {
        Ok(contents) => Response::octet_stream(contents),
        Err(e) => {
            warn!(path = %path, error = %e, "Failed to read file");
            Response::not_found()
        }
    }
}

/// Creates or truncates the file and writes `body` to it.
pub async fn write(directory: &str, name: &str, body: &[u8]) -> Response {
    let Some(path) = resolve(directory, name) else {
        warn!(segment = name, "Refusing relative file segment");
        return Response::not_found();
    };

    match tokio::fs::write(&path, body).await {
        Ok(()) => Response::created(),
        Err(e) => {
            warn!(path = %path, error = %e, "Failed to write file");
            Response::internal_error()
        }
    }
}
