use paramserve::http::parser::read_request;
use paramserve::http::request::{Method, Request, normalize_path, split_pairs};
use std::collections::HashMap;

async fn parse_request(raw: &str) -> Request {
    let mut reader = raw.as_bytes();
    read_request(&mut reader, "index.html").await.unwrap()
}

#[tokio::test]
async fn test_request_header_retrieval() {
    let req = parse_request("GET / HTTP/1.1\r\nHost: example.com\r\nReferer: http://example.com/a\r\n\r\n").await;

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("host"), None);
    assert_eq!(req.referer(), "http://example.com/a");
    assert_eq!(req.user_agent(), "");
}

#[tokio::test]
async fn test_request_full_text_without_headers() {
    let req = parse_request("TRACE /x HTTP/1.0\r\n\r\n").await;

    assert_eq!(req.method, Method::TRACE);
    assert_eq!(req.full_text, "TRACE /x HTTP/1.0");
}

#[tokio::test]
async fn test_head_suppresses_body() {
    let head = parse_request("HEAD / HTTP/1.1\r\n\r\n").await;
    let get = parse_request("GET / HTTP/1.1\r\n\r\n").await;

    assert!(head.suppresses_body());
    assert!(!get.suppresses_body());
}

#[tokio::test]
async fn test_is_image() {
    for (path, expected) in [
        ("/a.png", true),
        ("/a.gif", true),
        ("/a.bmp", true),
        ("/a.jpg", true),
        ("/a.jpg?size=2", true),
        ("/a.jpeg", false),
        ("/a.html", false),
    ] {
        let req = parse_request(&format!("GET {} HTTP/1.1\r\n\r\n", path)).await;
        assert_eq!(req.is_image(), expected, "{}", path);
    }
}

#[test]
fn test_method_tokens() {
    let methods = vec![
        ("GET", Method::GET),
        ("HEAD", Method::HEAD),
        ("POST", Method::POST),
        ("TRACE", Method::TRACE),
        ("OPTIONS", Method::OPTIONS),
        ("DELETE", Method::DELETE),
        ("PATCH", Method::PATCH),
        ("PUT", Method::PUT),
    ];

    for (token, expected) in methods {
        let method = Method::parse(token);
        assert_eq!(method, expected);
        assert_eq!(method.as_str(), token);
    }

    assert_eq!(Method::parse("Get"), Method::Unknown("Get".to_string()));
}

#[test]
fn test_query_pairs_reserialize_to_same_set() {
    let parsed: HashMap<&str, &str> = split_pairs("a=1&b=2").collect();
    let reserialized: Vec<String> = parsed.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    let reparsed: HashMap<&str, &str> = reserialized
        .iter()
        .flat_map(|pair| split_pairs(pair))
        .collect();

    assert_eq!(parsed, reparsed);
    assert_eq!(parsed.get("a"), Some(&"1"));
    assert_eq!(parsed.get("b"), Some(&"2"));
}

#[test]
fn test_pair_with_trailing_equals_is_kept() {
    let parsed: HashMap<&str, &str> = split_pairs("a=1=&b=2").collect();

    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed.get("a"), Some(&"1"));
    assert_eq!(parsed.get("b"), Some(&"2"));
}

#[test]
fn test_normalize_path_keeps_regular_paths() {
    assert_eq!(normalize_path("/img/logo.png?v=3", "index.html"), "/img/logo.png");
    assert_eq!(normalize_path("/dir/", "index.html"), "/dir/");
}
