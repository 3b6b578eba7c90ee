//! Request dispatch.
//!
//! The first path segment picks the resource:
//!
//! | path                | method     | answer                               |
//! |---------------------|------------|--------------------------------------|
//! | `/`                 | any        | bare `200 OK`                        |
//! | `/echo/<s>`         | any        | `<s>` as `text/plain`                |
//! | `/user-agent`       | any        | the User-Agent value as `text/plain` |
//! | `/files/<name>`     | GET        | file contents, or 404                |
//! | `/files/<name>`     | POST       | body written to the file, 201        |
//!
//! Everything else is `404 Not Found`.

pub mod files;

use crate::config::ServerConfig;
use crate::http::parser::split_segments;
use crate::http::request::{Method, Request};
use crate::http::response::Response;

pub async fn handle_request(req: &Request, cfg: &ServerConfig) -> Response {
    let segments = split_segments(&req.path);

    match segments.as_slice() {
        [] => Response::ok(),
        ["echo", message, ..] => Response::text(message.as_bytes()),
        ["user-agent", ..] => Response::text(req.user_agent()),
        ["files", name, ..] => match req.method() {
            Some(Method::GET) => files::read(&cfg.directory, name).await,
            Some(Method::POST) => files::write(&cfg.directory, name, &req.body).await,
            _ => Response::not_found(),
        },
        _ => Response::not_found(),
    }
}
