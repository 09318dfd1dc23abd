use crate::http::request::Request;
use crate::http::response::{Response, Status};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

/// Gzip-compresses the response body when the client accepts it.
///
/// Scans the `Accept-Encoding` value sequence for a token whose trim is
/// exactly `gzip`. Tokens carrying parameters (e.g. `gzip;q=0.5`) do not
/// match; no other encoding is supported. On a match the body is replaced
/// with its gzip encoding and `Content-Encoding: gzip` is set.
///
/// Calling this on a response that already has a `Content-Encoding` is a
/// no-op, so a second invocation cannot double-compress. An encoder failure
/// sets status 500 and leaves the body untouched.
pub fn apply_compression(request: &Request, response: &mut Response) {
    if response.headers.contains_key("Content-Encoding") {
        return;
    }
    let Some(accepted) = request.header_values("Accept-Encoding") else {
        return;
    };
    for token in accepted {
        if token.trim() == "gzip" {
            match gzip_encode(&response.body) {
                Ok(compressed) => {
                    response.body = compressed;
                    response.set_header("Content-Encoding", "gzip");
                }
                Err(e) => {
                    tracing::error!("gzip encoding failed: {}", e);
                    response.status = Status::InternalServerError;
                }
            }
            break;
        }
    }
}

fn gzip_encode(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
