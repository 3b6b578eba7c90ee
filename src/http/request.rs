/// HTTP request methods the router knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
}

impl Method {
    /// Parses a method token (case-sensitive). Tokens the router has no
    /// use for map to `None`.
    ///
    /// ```
    /// # use tinyserve::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("PUT"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            _ => None,
        }
    }
}

/// One request read off a connection.
///
/// Only five headers are ever extracted. Malformed input still produces a
/// valid request with empty fields; `invalid` is set only when the socket
/// read itself failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Raw method token, empty if the request line was empty
    pub method: String,
    /// Raw request target, not percent-decoded
    pub path: String,
    /// Protocol token, e.g. "HTTP/1.1"
    pub version: String,
    pub host: Option<String>,
    pub user_agent: Option<String>,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub content_length: Option<String>,
    pub body: Vec<u8>,
    pub invalid: bool,
}

impl Request {
    /// A request whose read failed. Carries no other data.
    pub fn invalid() -> Self {
        Self {
            invalid: true,
            ..Self::default()
        }
    }

    /// The method token as a known [`Method`], if it is one.
    pub fn method(&self) -> Option<Method> {
        Method::from_str(&self.method)
    }

    /// Parses the Content-Length header as a usize.
    ///
    /// Returns 0 if the header is missing or not a valid number.
    pub fn content_length(&self) -> usize {
        self.content_length
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// User-Agent value, or the empty string when the header was absent.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or("")
    }
}
