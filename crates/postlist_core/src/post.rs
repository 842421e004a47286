use std::fmt;

use crate::SearchCriteria;

/// Post identifier. Not unique across a fetched collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub author: String,
    /// Opaque to the core; hosts decide how to display it.
    pub created_at: String,
}

/// Opaque cursor for the next page of results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageToken(String);

impl PageToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub items: Vec<Post>,
    /// `None` marks the end of data.
    pub next_page_token: Option<PageToken>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub criteria: SearchCriteria,
    pub page_token: Option<PageToken>,
    /// Number of items already held when the request was issued.
    pub offset: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn is_first_page(&self) -> bool {
        self.page_token.is_none() && self.offset == 0
    }
}

/// Classified failure kinds the list keeps in its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Timeout,
    NotFound,
    Server(u16),
    InvalidResponse,
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "network error"),
            ErrorKind::Timeout => write!(f, "request timed out"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::Server(status) => write!(f, "server responded with {status}"),
            ErrorKind::InvalidResponse => write!(f, "invalid response"),
            ErrorKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A page could not be retrieved. Blocks the list until the next reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl FetchFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A delete request failed. Surfaced as a notification; the item stays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    pub kind: ErrorKind,
    /// Machine-readable error code supplied by the API, if any.
    pub code: Option<String>,
}

impl DeleteFailure {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, code: None }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for DeleteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code.as_deref() {
            Some(code) if !code.is_empty() => write!(f, "{code}"),
            _ => write!(f, "{}", self.kind),
        }
    }
}
