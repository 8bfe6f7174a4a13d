//! Inbound request type.

use std::collections::HashMap;

use url::Url;

/// An inbound HTTP request as handed over by the hosting transport.
///
/// The router only ever reads a request; handlers receive their own clone.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// HTTP method token, exactly as received.
    pub method: String,
    /// Absolute request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Vec<u8>,
}

impl Request {
    /// Creates a new request.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    /// Creates a POST request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    /// Creates an OPTIONS request.
    pub fn options(url: impl Into<String>) -> Self {
        Self::new("OPTIONS", url)
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Gets a header value.
    ///
    /// Names compare ASCII case-insensitively, like the transport's header
    /// map; the value comes back verbatim.
    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Parses the URL.
    pub fn parsed_url(&self) -> Option<Url> {
        Url::parse(&self.url).ok()
    }

    /// Returns the path component of the URL, or `None` when the URL does
    /// not parse.
    pub fn path(&self) -> Option<String> {
        self.parsed_url().map(|url| url.path().to_string())
    }

    /// Gets a query parameter from the URL.
    pub fn get_query(&self, key: &str) -> Option<String> {
        self.parsed_url()?
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Parses the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
