//! Built-in request handlers.
//!
//! These implement the business endpoints on top of the protocol core: each
//! is an ordinary [`Handler`] that reads the request and mutates the
//! response, signalling failure only through the status.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::http::response::Status;
use crate::server::router::Handler;

/// `GET /`: answers 200 with an empty body.
pub fn root() -> Handler {
    Arc::new(|_request, response| {
        response.status = Status::Ok;
    })
}

/// `GET /echo/*`: echoes the path tail after `/echo/` into the body.
pub fn echo() -> Handler {
    Arc::new(|request, response| {
        let tail = request.path.splitn(3, '/').nth(2).unwrap_or("");
        response.body = tail.as_bytes().to_vec();
    })
}

/// `GET /user-agent`: reflects the first `User-Agent` value into the body.
pub fn user_agent() -> Handler {
    Arc::new(|request, response| {
        if request.path.eq_ignore_ascii_case("/user-agent") {
            if let Some(agent) = request.header("User-Agent") {
                response.body = agent.as_bytes().to_vec();
            }
        }
    })
}

/// `GET|POST /files/*`: serves and stores files under `root_dir`, keyed by
/// the path tail after `/files/`.
///
/// GET: a missing file is 404, a read failure 500, success returns the
/// contents as `application/octet-stream`. POST: writes the request body to
/// the file and answers 201, or 500 if the write fails. Other methods fall
/// through with the default 200 and an empty body.
pub fn serve_files(root_dir: PathBuf) -> Handler {
    Arc::new(move |request, response| {
        let name = request.path.splitn(3, '/').nth(2).unwrap_or("");
        let full_path = root_dir.join(name);

        match request.method.as_str() {
            "GET" => match std::fs::read(&full_path) {
                Ok(contents) => {
                    response.set_header("Content-Type", "application/octet-stream");
                    response.body = contents;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    response.status = Status::NotFound;
                }
                Err(e) => {
                    tracing::error!("failed to read {}: {}", full_path.display(), e);
                    response.status = Status::InternalServerError;
                }
            },
            "POST" => {
                response.status = Status::Created;
                if let Err(e) = std::fs::write(&full_path, &request.body) {
                    tracing::error!("failed to write {}: {}", full_path.display(), e);
                    response.status = Status::InternalServerError;
                }
            }
            _ => {}
        }
    })
}
