//! Request predicates and condition sets.
//!
//! A [`Predicate`] is a pure boolean test over a [`Request`]. Routes guard
//! their handler with a [`Conditions`] value, which is either empty (always
//! matches) or an ordered list of predicates that must all hold.
//!
//! None of the predicates fail: an unparseable URL or a missing header is
//! simply a non-match.
//!
//! ```
//! use oxide_edge_router::{Conditions, Method, Path, Request, host};
//!
//! let conditions = Conditions::new()
//!     .and(Method::GET)
//!     .and(Path::new("/articles").unwrap())
//!     .and(host("example.com"));
//!
//! let req = Request::get("https://example.com/articles").header("host", "example.com");
//! assert!(conditions.matches(&req));
//! ```

use std::borrow::Cow;
use std::fmt;

use regex::Regex;

use crate::error::{Result, RouterError};
use crate::request::Request;

/// A boolean test over an inbound request.
pub trait Predicate: Send + Sync + fmt::Debug {
    /// Returns true if the request satisfies this condition.
    fn test(&self, req: &Request) -> bool;
}

/// Matches the request method, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    name: Cow<'static, str>,
}

impl Method {
    /// CONNECT method
    pub const CONNECT: Self = Self::from_static("connect");
    /// DELETE method
    pub const DELETE: Self = Self::from_static("delete");
    /// GET method
    pub const GET: Self = Self::from_static("get");
    /// HEAD method
    pub const HEAD: Self = Self::from_static("head");
    /// OPTIONS method
    pub const OPTIONS: Self = Self::from_static("options");
    /// PATCH method
    pub const PATCH: Self = Self::from_static("patch");
    /// POST method
    pub const POST: Self = Self::from_static("post");
    /// PUT method
    pub const PUT: Self = Self::from_static("put");
    /// TRACE method
    pub const TRACE: Self = Self::from_static("trace");

    /// Creates a method predicate for an arbitrary token.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
        }
    }

    const fn from_static(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    /// Returns the method token as given.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name.to_uppercase())
    }
}

impl Predicate for Method {
    fn test(&self, req: &Request) -> bool {
        req.method.to_lowercase() == self.name.to_lowercase()
    }
}

/// Matches a header carrying exactly the given value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    /// Creates a header predicate. The value is compared verbatim.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Predicate for Header {
    fn test(&self, req: &Request) -> bool {
        req.get_header(&self.name) == Some(self.value.as_str())
    }
}

/// Matches the `host` header against `host`, lowercased.
///
/// Only the expected value is lowercased. The header itself is compared
/// as sent, so `Host: Example.com` never matches.
pub fn host(host: &str) -> Header {
    Header::new("host", host.to_lowercase())
}

/// Matches the `referrer` header against `host`, lowercased.
///
/// Same comparison rules as [`host`].
pub fn referrer(host: &str) -> Header {
    Header::new("referrer", host.to_lowercase())
}

/// Matches the URL path against a regular expression covering the whole path.
///
/// The leftmost match of the pattern must begin at the first character and
/// end at the last one; a match of a prefix or inner substring is rejected.
/// A pattern is therefore implicitly anchored at both ends:
///
/// ```
/// use oxide_edge_router::{Path, Predicate, Request};
///
/// let path = Path::new(".*/articles").unwrap();
/// assert!(path.test(&Request::get("https://example.com/v1/articles")));
/// assert!(!path.test(&Request::get("https://example.com/v1/articles/extra")));
/// ```
#[derive(Debug, Clone)]
pub struct Path {
    regex: Regex,
}

impl Path {
    /// Compiles a path pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// Wraps an already compiled regex.
    pub const fn from_regex(regex: Regex) -> Self {
        Self { regex }
    }

    /// Returns the pattern source.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Checks a bare path string.
    pub fn matches_path(&self, path: &str) -> bool {
        self.regex
            .find(path)
            .is_some_and(|m| m.start() == 0 && m.end() == path.len())
    }
}

impl Predicate for Path {
    fn test(&self, req: &Request) -> bool {
        req.path().is_some_and(|path| self.matches_path(&path))
    }
}

/// The condition set guarding a route.
#[derive(Debug, Default)]
pub enum Conditions {
    /// Matches every request.
    #[default]
    Empty,
    /// Matches when every predicate holds, evaluated in order.
    AllOf(Vec<Box<dyn Predicate>>),
}

impl Conditions {
    /// Creates an empty condition set.
    pub const fn new() -> Self {
        Self::Empty
    }

    /// Creates a condition set from a list of predicates.
    pub fn all_of(predicates: Vec<Box<dyn Predicate>>) -> Self {
        if predicates.is_empty() {
            Self::Empty
        } else {
            Self::AllOf(predicates)
        }
    }

    /// Appends a predicate.
    #[must_use]
    pub fn and(self, predicate: impl Predicate + 'static) -> Self {
        let mut predicates = match self {
            Self::Empty => Vec::new(),
            Self::AllOf(predicates) => predicates,
        };
        predicates.push(Box::new(predicate));
        Self::AllOf(predicates)
    }

    /// Returns true if the request satisfies the whole set.
    pub fn matches(&self, req: &Request) -> bool {
        match self {
            Self::Empty => true,
            Self::AllOf(predicates) => predicates.iter().all(|p| p.test(req)),
        }
    }

    /// Number of predicates in the set.
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::AllOf(predicates) => predicates.len(),
        }
    }

    /// Returns true for a catch-all set.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Box<dyn Predicate>>> for Conditions {
    fn from(predicates: Vec<Box<dyn Predicate>>) -> Self {
        Self::all_of(predicates)
    }
}
