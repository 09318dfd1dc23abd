use std::collections::HashMap;
use std::fmt;

/// HTTP status of a response.
///
/// The default vocabulary covers the statuses the built-in handlers use:
/// - `Ok` (200): Request successful
/// - `Created` (201): Resource created successfully
/// - `BadRequest` (400): Malformed request
/// - `NotFound` (404): Resource not found
/// - `InternalServerError` (500): Server error
///
/// Handlers that need anything else set `Custom` with their own code and
/// reason phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// Any other status line, e.g. `Custom(418, "I'm a teapot".into())`
    Custom(u16, String),
}

impl Status {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use microserve::http::response::Status;
    /// assert_eq!(Status::Ok.as_u16(), 200);
    /// assert_eq!(Status::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::InternalServerError => 500,
            Status::Custom(code, _) => *code,
        }
    }

    /// Returns the reason phrase for this status.
    ///
    /// # Example
    ///
    /// ```
    /// # use microserve::http::response::Status;
    /// assert_eq!(Status::Ok.reason_phrase(), "OK");
    /// assert_eq!(Status::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &str {
        match self {
            Status::Ok => "OK",
            Status::Created => "Created",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::InternalServerError => "Internal Server Error",
            Status::Custom(_, phrase) => phrase,
        }
    }
}

impl fmt::Display for Status {
    /// Formats the status as it appears on the wire, e.g. `200 OK`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Each request/response cycle starts from [`Response::new`] and is mutated
/// by exactly one handler before serialization. `Content-Length` is never
/// stored here; the writer computes it from the final body.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status
    pub status: Status,
    /// HTTP headers, each value a sequence joined with commas on the wire
    pub headers: HashMap<String, Vec<String>>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    /// Creates the default response a handler starts from:
    /// 200 OK, `Content-Type: text/plain`, empty body.
    pub fn new() -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), vec!["text/plain".to_string()]);
        Self {
            status: Status::Ok,
            headers,
            body: Vec::new(),
        }
    }

    /// Sets a header to a single value, replacing any existing values.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), vec![value.into()]);
    }

    /// Retrieves the first value of a header by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}
