use std::collections::HashMap;
use std::sync::Arc;

use crate::http::request::Request;
use crate::http::response::{Response, Status};

/// A route handler.
///
/// Receives the parsed request and the pre-initialized response (200,
/// `Content-Type: text/plain`, empty body) and mutates the response in
/// place. Failure is signalled by setting the status, never by panicking or
/// returning an error.
pub type Handler = Arc<dyn Fn(&Request, &mut Response) + Send + Sync>;

struct PrefixRoute {
    method: String,
    prefix: String,
    handler: Handler,
}

/// Maps (method, path) to a handler.
///
/// Routes are registered at construction time and the table is immutable
/// afterwards, so connection tasks resolve against it concurrently without
/// locking.
///
/// A pattern ending in `/*` is a prefix rule: the trailing `*` is stripped
/// and the rule matches any path starting with the remaining prefix, for
/// that method only. Any other pattern is an exact rule. Resolution tries
/// exact rules first, then prefix rules in registration order (first match
/// wins), and falls back to a built-in 404 handler. Method comparison is
/// exact string equality with no case-folding; prefix comparison is
/// byte-exact.
pub struct Router {
    exact: HashMap<String, Handler>,
    prefix: Vec<PrefixRoute>,
    fallback: Handler,
}

impl Router {
    pub fn new() -> Self {
        Self {
            exact: HashMap::new(),
            prefix: Vec::new(),
            fallback: Arc::new(|_req: &Request, response: &mut Response| {
                response.status = Status::NotFound;
            }),
        }
    }

    /// Registers a handler for a method and pattern.
    pub fn route(
        mut self,
        method: impl Into<String>,
        pattern: impl Into<String>,
        handler: Handler,
    ) -> Self {
        let method = method.into();
        let pattern = pattern.into();
        if pattern.ends_with("/*") {
            let prefix = pattern[..pattern.len() - 1].to_string();
            self.prefix.push(PrefixRoute {
                method,
                prefix,
                handler,
            });
        } else {
            self.exact.insert(route_key(&method, &pattern), handler);
        }
        self
    }

    /// Resolves a request to its handler, or the 404 fallback.
    pub fn resolve(&self, method: &str, path: &str) -> Handler {
        if let Some(handler) = self.exact.get(route_key(method, path).as_str()) {
            return handler.clone();
        }
        for route in &self.prefix {
            if route.method == method && path.starts_with(&route.prefix) {
                return route.handler.clone();
            }
        }
        self.fallback.clone()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

fn route_key(method: &str, path: &str) -> String {
    format!("{}:{}", method, path)
}
