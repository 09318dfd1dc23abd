use crate::http::request::Request;
use std::collections::HashMap;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Failure modes of [`parse_request`].
///
/// The connection loop treats `ConnectionClosed` and `Timeout` as a silent
/// close and everything else as a 400.
#[derive(Debug)]
pub enum ParseError {
    /// The client closed the connection at a request boundary.
    ConnectionClosed,
    /// The idle deadline elapsed while waiting for or reading the request.
    Timeout,
    /// The request line did not have exactly three space-separated fields.
    InvalidRequestLine,
    /// The stream ended mid-line, mid-body, or failed with an I/O error.
    MalformedStream,
}

/// Reads and parses one HTTP/1.1 request off a buffered byte stream.
///
/// Lines are terminated by `\n` with a preceding `\r` stripped. Headers are
/// read until a line equal to exactly `\r\n`; a header line with no `:` is
/// skipped with a debug log. Header values are trimmed and comma-split; the
/// individual tokens are not re-trimmed. A `Content-Length` whose first value
/// parses as a positive integer sizes the body; non-numeric or non-positive
/// values mean no body.
///
/// The caller is responsible for bounding this with a read deadline and
/// mapping its expiry to [`ParseError::Timeout`].
pub async fn parse_request<R>(reader: &mut R) -> Result<Request, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    // Request line
    let line = read_line(reader).await?;
    let request_line = line_to_str(&line)?;
    let fields: Vec<&str> = request_line.split(' ').collect();
    if fields.len() != 3 || fields[0].is_empty() {
        tracing::debug!(line = %request_line, "invalid request line");
        return Err(ParseError::InvalidRequestLine);
    }
    let (method, path, version) = (fields[0], fields[1], fields[2]);

    // Headers, until the bare CRLF terminator
    let mut headers = HashMap::new();
    loop {
        let raw = read_line(reader).await?;
        if raw.as_slice() == b"\r\n" {
            break;
        }
        let line = match line_to_str(&raw) {
            Ok(s) => s.trim(),
            Err(_) => {
                tracing::debug!("skipping non-utf8 header line");
                continue;
            }
        };
        let Some((name, value)) = line.split_once(':') else {
            tracing::debug!(line, "skipping header line without a colon");
            continue;
        };
        let values = value
            .trim()
            .split(',')
            .map(str::to_string)
            .collect::<Vec<_>>();
        // A repeated header name overwrites the earlier entry.
        headers.insert(name.to_string(), values);
    }

    // Body, sized by Content-Length when it is a positive integer
    let mut body = Vec::new();
    if let Some(length) = content_length(&headers) {
        body = vec![0u8; length];
        reader.read_exact(&mut body).await.map_err(map_io_err)?;
    }

    Ok(Request {
        method: method.to_string(),
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    })
}

/// Reads one `\n`-terminated line, returning its raw bytes (terminator
/// included). EOF at a line boundary is `ConnectionClosed`; EOF mid-line is
/// `MalformedStream`.
async fn read_line<R>(reader: &mut R) -> Result<Vec<u8>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let n = reader
        .read_until(b'\n', &mut line)
        .await
        .map_err(map_io_err)?;
    if n == 0 {
        return Err(ParseError::ConnectionClosed);
    }
    if line.last() != Some(&b'\n') {
        return Err(ParseError::MalformedStream);
    }
    Ok(line)
}

/// Strips the trailing `\n` (and a preceding `\r`, if any) and checks UTF-8.
fn line_to_str(line: &[u8]) -> Result<&str, ParseError> {
    let mut end = line.len();
    if end > 0 && line[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && line[end - 1] == b'\r' {
        end -= 1;
    }
    std::str::from_utf8(&line[..end]).map_err(|_| ParseError::MalformedStream)
}

/// First `Content-Length` value as a positive byte count, or `None`.
fn content_length(headers: &HashMap<String, Vec<String>>) -> Option<usize> {
    let value = headers.get("Content-Length")?.first()?;
    match value.parse::<i64>() {
        Ok(n) if n > 0 => Some(n as usize),
        Ok(_) => None,
        Err(_) => {
            tracing::debug!(value = %value, "ignoring invalid Content-Length");
            None
        }
    }
}

fn map_io_err(e: io::Error) -> ParseError {
    match e.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => ParseError::Timeout,
        _ => ParseError::MalformedStream,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn parse_simple_get() {
        let raw: &[u8] = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let mut reader = BufReader::new(raw);

        let parsed = parse_request(&mut reader).await.unwrap();

        assert_eq!(parsed.method, "GET");
        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.headers.get("Host").unwrap(), &vec!["example.com"]);
    }
}
