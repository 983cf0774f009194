//! Navigation identifiers
//!
//! The host only ever hands us back a URI string of the form
//! `<namespace>:<level>:<payload>`, where the payload is the JSON encoding of
//! the record for that level. This module owns both halves: the record codec
//! and the URI framing around it.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while encoding or decoding navigation identifiers
#[derive(Debug, Error)]
pub enum IdentifierError {
    /// The URI does not have the `<namespace>:<level>[:<payload>]` shape
    #[error("Malformed navigation URI: {0}")]
    MalformedUri(String),

    /// The level segment names no known navigation level
    #[error("Unknown navigation level: {0}")]
    UnknownLevel(String),

    /// The URI belongs to another plugin
    #[error("URI namespace '{found}' does not match '{expected}'")]
    NamespaceMismatch { expected: String, found: String },

    /// A level that carries a record was invoked without one
    #[error("Missing payload for level '{0}'")]
    MissingPayload(Level),

    /// A record could not be serialized
    #[error("Failed to encode identifier: {0}")]
    Encode(#[source] serde_json::Error),

    /// A payload could not be deserialized into the expected record
    #[error("Failed to decode identifier: {0}")]
    Decode(#[source] serde_json::Error),
}

/// One addressable level of the browse hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Start,
    Category,
    Program,
    Season,
    /// Playable leaf; `episode` is accepted as an alias when parsing
    Video,
    Search,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Start,
        Level::Category,
        Level::Program,
        Level::Season,
        Level::Video,
        Level::Search,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Start => "start",
            Level::Category => "category",
            Level::Program => "program",
            Level::Season => "season",
            Level::Video => "video",
            Level::Search => "search",
        }
    }

    fn parse(segment: &str) -> Result<Self, IdentifierError> {
        match segment {
            "start" => Ok(Level::Start),
            "category" => Ok(Level::Category),
            "program" => Ok(Level::Program),
            "season" => Ok(Level::Season),
            "video" | "episode" => Ok(Level::Video),
            "search" => Ok(Level::Search),
            other => Err(IdentifierError::UnknownLevel(other.to_string())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed navigation URI, borrowing from the original string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationUri<'a> {
    pub namespace: &'a str,
    pub level: Level,
    pub payload: Option<&'a str>,
}

impl<'a> NavigationUri<'a> {
    /// Splits a URI into namespace, level and payload.
    ///
    /// Only the first two `:` separate segments; the payload may contain any
    /// number of colons itself.
    pub fn parse(uri: &'a str) -> Result<Self, IdentifierError> {
        let mut parts = uri.splitn(3, ':');
        let namespace = parts.next().filter(|ns| !ns.is_empty());
        let level = parts.next();

        let (Some(namespace), Some(level)) = (namespace, level) else {
            return Err(IdentifierError::MalformedUri(uri.to_string()));
        };

        Ok(Self {
            namespace,
            level: Level::parse(level)?,
            payload: parts.next().filter(|p| !p.is_empty()),
        })
    }

    /// Returns the payload, failing when the URI carries none.
    pub fn require_payload(&self) -> Result<&'a str, IdentifierError> {
        self.payload
            .ok_or(IdentifierError::MissingPayload(self.level))
    }
}

/// Serializes a navigation record into an identifier payload.
pub fn encode<T: Serialize>(record: &T) -> Result<String, IdentifierError> {
    serde_json::to_string(record).map_err(IdentifierError::Encode)
}

/// Deserializes an identifier payload back into its record.
pub fn decode<T: DeserializeOwned>(payload: &str) -> Result<T, IdentifierError> {
    serde_json::from_str(payload).map_err(IdentifierError::Decode)
}

/// Builds the full navigation URI for a record at the given level.
pub fn uri_for<T: Serialize>(
    namespace: &str,
    level: Level,
    record: &T,
) -> Result<String, IdentifierError> {
    Ok(format!("{}:{}:{}", namespace, level, encode(record)?))
}

/// Builds the payload-less URI of the start page.
pub fn start_uri(namespace: &str) -> String {
    format!("{}:{}", namespace, Level::Start)
}
