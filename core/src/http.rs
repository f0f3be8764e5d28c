//! HTTP request/response descriptors.
//!
//! # Design
//! Requests and responses are plain data. Builders produce an `HttpRequest`
//! without touching the network; a transport executes it and hands back an
//! `HttpResponse` for decoding. The query is an ordered list of pairs so
//! array parameters (`ids[]`) can repeat their key.

use crate::auth::Token;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Fully-qualified URL without the query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// A request carrying the standard JSON headers and no query.
    pub fn new(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            headers: base_headers(),
            body: None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key` in the query.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_query(&self, key: &str) -> bool {
        self.query.iter().any(|(k, _)| k == key)
    }

    /// URL with the percent-encoded query appended.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.url)
    }
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn base_headers() -> Vec<(String, String)> {
    vec![
        ("Accept".to_string(), "application/json".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ]
}

/// Attach `Authorization: <kind> <bearer>`, replacing any existing value.
pub fn with_auth_headers(mut request: HttpRequest, token: &Token) -> HttpRequest {
    request
        .headers
        .retain(|(k, _)| !k.eq_ignore_ascii_case("authorization"));
    request
        .headers
        .push(("Authorization".to_string(), token.authorization()));
    request
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn token(bearer: &str) -> Token {
        Token {
            kind: "Bearer".to_string(),
            bearer: bearer.to_string(),
            expires_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn new_request_carries_json_headers() {
        let req = HttpRequest::new(HttpMethod::Get, "http://x/api".to_string());
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert!(req.header("authorization").is_none());
        assert!(req.query.is_empty());
    }

    #[test]
    fn full_url_encodes_repeated_keys() {
        let mut req = HttpRequest::new(HttpMethod::Get, "http://x/api/beatmaps".to_string());
        assert_eq!(req.full_url(), "http://x/api/beatmaps");
        req.query.push(("ids[]".to_string(), "1".to_string()));
        req.query.push(("ids[]".to_string(), "2".to_string()));
        req.query.push(("filename".to_string(), "a b.osu".to_string()));
        assert_eq!(
            req.full_url(),
            "http://x/api/beatmaps?ids%5B%5D=1&ids%5B%5D=2&filename=a%20b.osu"
        );
    }

    #[test]
    fn with_auth_headers_replaces_previous_token() {
        let req = HttpRequest::new(HttpMethod::Get, "http://x/api".to_string());
        let req = with_auth_headers(req, &token("first"));
        let req = with_auth_headers(req, &token("second"));
        let auth: Vec<_> = req
            .headers
            .iter()
            .filter(|(k, _)| k == "Authorization")
            .collect();
        assert_eq!(auth.len(), 1);
        assert_eq!(auth[0].1, "Bearer second");
    }
}
