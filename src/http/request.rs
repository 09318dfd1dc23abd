use std::collections::HashMap;

/// Represents a parsed HTTP request from a client.
///
/// The method, path, and version are kept verbatim as received: the method is
/// not coerced to an enum (routing compares it by exact string equality) and
/// the path is not percent-decoded.
///
/// Header values are stored as the comma-split sequence of the raw header
/// line. A single value containing a literal comma is therefore
/// indistinguishable from multiple values, and a header name seen twice
/// overwrites the earlier entry. Header names are case-sensitive.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method as received (e.g. "GET", "POST")
    pub method: String,
    /// The raw request path (e.g. "/echo/abc")
    pub path: String,
    /// HTTP version string (typically "HTTP/1.1")
    pub version: String,
    /// Request headers, each value comma-split into a sequence
    pub headers: HashMap<String, Vec<String>>,
    /// Request body, sized by Content-Length (empty if absent or invalid)
    pub body: Vec<u8>,
}

impl Request {
    /// Retrieves the first value of a header by name.
    ///
    /// Lookup is case-sensitive, matching how headers are stored.
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the first comma-split value if present, `None` otherwise.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Retrieves the full value sequence of a header by name.
    pub fn header_values(&self, name: &str) -> Option<&[String]> {
        self.headers.get(name).map(Vec::as_slice)
    }

    /// Determines whether the connection should remain open after the response.
    ///
    /// For HTTP/1.1 the default is `true` (keep-alive); only a `Connection`
    /// header whose first value is case-insensitively equal to `close` turns
    /// it off.
    pub fn keep_alive(&self) -> bool {
        self.header("Connection")
            .map(|v| !v.eq_ignore_ascii_case("close"))
            .unwrap_or(true)
    }
}
