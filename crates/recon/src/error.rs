use std::fmt;

/// A remote lookup that failed outright, as opposed to finding nothing.
#[derive(Debug)]
pub enum LookupError {
    /// Transport-level failure before any HTTP status was received.
    Network(String),
    /// Non-success HTTP status, with response body.
    Http(u16, String),
    /// Response body was not the JSON shape the store promises.
    Parse(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http(code, msg) => write!(f, "HTTP {code}: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for LookupError {}

/// Report delivery failure (webhook unreachable or rejecting).
#[derive(Debug)]
pub enum DeliveryError {
    Network(String),
    Http(u16, String),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http(code, msg) => write!(f, "HTTP {code}: {msg}"),
        }
    }
}

impl std::error::Error for DeliveryError {}
