//! Outbound response type.

use std::collections::HashMap;

use crate::error::Result;

/// An outbound HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// HTTP status text.
    pub status_text: String,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body; empty for OPTIONS answers.
    pub body: Vec<u8>,
}

impl Response {
    /// Creates a new response with the given status and no status text.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            status_text: String::new(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a 200 OK response.
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Creates a 200 response with a JSON-serialized body.
    pub fn json<T: serde::Serialize + ?Sized>(data: &T) -> Result<Self> {
        let body = serde_json::to_vec(data)?;
        Ok(Self::ok()
            .header("content-type", "application/json")
            .body(body))
    }

    /// Creates a 200 response with plain text content.
    pub fn text(body: impl Into<String>) -> Self {
        Self::ok()
            .header("content-type", "text/plain")
            .body(body.into())
    }

    /// Creates the router's 404 response.
    pub fn not_found() -> Self {
        Self::text("resource not found")
            .status(404)
            .status_text("not found")
    }

    /// Creates a 500 response for transports reporting a failed handler.
    pub fn internal_server_error() -> Self {
        Self::text("internal server error").status(500)
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the status code.
    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Overrides the status text.
    #[must_use]
    pub fn status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Looks up a response header by exact name.
    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}
