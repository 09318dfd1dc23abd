use microserve::http::parser::{ParseError, parse_request};
use microserve::http::request::Request;
use tokio::io::BufReader;

async fn parse(raw: &[u8]) -> Result<Request, ParseError> {
    let mut reader = BufReader::new(raw);
    parse_request(&mut reader).await
}

#[tokio::test]
async fn test_parse_simple_get_request() {
    let parsed = parse(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n")
        .await
        .unwrap();

    assert_eq!(parsed.method, "GET");
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.get("Host").unwrap(), &vec!["example.com"]);
}

#[tokio::test]
async fn test_parse_post_request_with_body() {
    let parsed = parse(b"POST /api HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello")
        .await
        .unwrap();

    assert_eq!(parsed.method, "POST");
    assert_eq!(parsed.path, "/api");
    assert_eq!(parsed.body, b"hello".to_vec());
}

#[tokio::test]
async fn test_parse_multiple_headers() {
    let parsed = parse(
        b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n",
    )
    .await
    .unwrap();

    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert_eq!(parsed.header("User-Agent"), Some("test-client"));
    assert_eq!(parsed.header("Accept"), Some("*/*"));
}

#[tokio::test]
async fn test_parse_request_with_path_and_query_string() {
    let parsed = parse(b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n")
        .await
        .unwrap();

    assert_eq!(parsed.path, "/search?q=rust");
}

#[tokio::test]
async fn test_parse_comma_split_header_values() {
    let parsed = parse(b"GET / HTTP/1.1\r\nAccept-Encoding: gzip, deflate, br\r\n\r\n")
        .await
        .unwrap();

    // The value is trimmed as a whole and split on commas; the individual
    // tokens keep their surrounding spaces.
    assert_eq!(
        parsed.headers.get("Accept-Encoding").unwrap(),
        &vec!["gzip", " deflate", " br"]
    );
}

#[tokio::test]
async fn test_parse_duplicate_header_overwrites() {
    let parsed = parse(b"GET / HTTP/1.1\r\nX-Tag: first\r\nX-Tag: second\r\n\r\n")
        .await
        .unwrap();

    assert_eq!(parsed.header("X-Tag"), Some("second"));
}

#[tokio::test]
async fn test_parse_header_without_colon_is_skipped() {
    let parsed = parse(b"GET / HTTP/1.1\r\nBrokenHeader\r\nHost: example.com\r\n\r\n")
        .await
        .unwrap();

    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert!(!parsed.headers.contains_key("BrokenHeader"));
}

#[tokio::test]
async fn test_parse_request_line_with_too_few_fields() {
    let result = parse(b"GET /\r\n\r\n").await;

    assert!(matches!(result, Err(ParseError::InvalidRequestLine)));
}

#[tokio::test]
async fn test_parse_request_line_with_too_many_fields() {
    let result = parse(b"GET / HTTP/1.1 extra\r\n\r\n").await;

    assert!(matches!(result, Err(ParseError::InvalidRequestLine)));
}

#[tokio::test]
async fn test_parse_empty_request_line() {
    let result = parse(b"\r\n\r\n").await;

    assert!(matches!(result, Err(ParseError::InvalidRequestLine)));
}

#[tokio::test]
async fn test_parse_eof_before_any_bytes() {
    let result = parse(b"").await;

    assert!(matches!(result, Err(ParseError::ConnectionClosed)));
}

#[tokio::test]
async fn test_parse_stream_truncated_mid_line() {
    let result = parse(b"GET / HTT").await;

    assert!(matches!(result, Err(ParseError::MalformedStream)));
}

#[tokio::test]
async fn test_parse_stream_truncated_mid_body() {
    let result = parse(b"POST /api HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello").await;

    assert!(matches!(result, Err(ParseError::MalformedStream)));
}

#[tokio::test]
async fn test_parse_content_length_zero_means_empty_body() {
    let parsed = parse(b"POST /api HTTP/1.1\r\nContent-Length: 0\r\n\r\n")
        .await
        .unwrap();

    assert!(parsed.body.is_empty());
}

#[tokio::test]
async fn test_parse_content_length_negative_means_empty_body() {
    let parsed = parse(b"POST /api HTTP/1.1\r\nContent-Length: -7\r\n\r\n")
        .await
        .unwrap();

    assert!(parsed.body.is_empty());
}

#[tokio::test]
async fn test_parse_content_length_non_numeric_means_empty_body() {
    let parsed = parse(b"POST /api HTTP/1.1\r\nContent-Length: abc\r\n\r\n")
        .await
        .unwrap();

    assert!(parsed.body.is_empty());
}

#[tokio::test]
async fn test_parse_request_with_binary_body() {
    let parsed = parse(b"POST /upload HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03")
        .await
        .unwrap();

    assert_eq!(parsed.body, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_parse_method_kept_verbatim() {
    // Unknown and lowercase methods pass through uncoerced; routing decides
    // what to do with them.
    let parsed = parse(b"get / HTTP/1.1\r\n\r\n").await.unwrap();
    assert_eq!(parsed.method, "get");

    let parsed = parse(b"PURGE /cache HTTP/1.1\r\n\r\n").await.unwrap();
    assert_eq!(parsed.method, "PURGE");
}

#[tokio::test]
async fn test_parse_consecutive_requests_from_one_stream() {
    let raw: &[u8] = b"GET /a HTTP/1.1\r\n\r\nGET /b HTTP/1.1\r\n\r\n";
    let mut reader = BufReader::new(raw);

    let first = parse_request(&mut reader).await.unwrap();
    let second = parse_request(&mut reader).await.unwrap();

    assert_eq!(first.path, "/a");
    assert_eq!(second.path, "/b");
}
