use anyhow::Context;
use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes the status line and headers.
///
/// `Content-Length` is computed from the final body and written first; any
/// `Content-Length` entry in the header map is skipped so the wire never
/// carries two. The remaining headers are emitted in map-iteration order,
/// each value sequence joined with commas.
fn serialize_head(response: &Response) -> Bytes {
    let mut buf = BytesMut::with_capacity(256);

    let status_line = format!("{} {}\r\n", HTTP_VERSION, response.status);
    buf.put_slice(status_line.as_bytes());
    buf.put_slice(format!("Content-Length: {}\r\n", response.body.len()).as_bytes());

    for (name, values) in &response.headers {
        if name == "Content-Length" {
            continue;
        }
        buf.put_slice(name.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(values.join(",").as_bytes());
        buf.put_slice(b"\r\n");
    }

    // Header/body separator
    buf.put_slice(b"\r\n");

    buf.freeze()
}

/// Writes one serialized response to a stream.
///
/// The head (status line + headers) and the body are two separate checked
/// writes; either failing aborts the response and surfaces to the caller.
pub struct ResponseWriter {
    head: Bytes,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            head: serialize_head(&response),
            body: response.body,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        stream
            .write_all(&self.head)
            .await
            .context("failed to write response head")?;
        stream
            .write_all(&self.body)
            .await
            .context("failed to write response body")?;
        Ok(())
    }
}
