//! Todo domain model and backend selection.
//!
//! This module defines [`TodoItem`], the uniform shape every backend response is
//! normalized into, the opaque [`TodoId`] assigned by the server, and the
//! [`Backend`] selector that picks which service a request is routed to.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::TodoError;

/// Server-assigned todo identifier.
///
/// The Go service issues UUID strings and the Java service issues integers.
/// Both normalize into the same opaque text form so the rest of the crate never
/// has to know which backend produced an item. An identifier is never empty.
///
/// # Examples
///
/// ```
/// use todo_tracer::domain::TodoId;
///
/// let from_java: TodoId = serde_json::from_str("42").unwrap();
/// let from_go: TodoId = serde_json::from_str("\"3f2c\"").unwrap();
///
/// assert_eq!(from_java, TodoId::from(42));
/// assert_eq!(from_go.as_str(), "3f2c");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireId {
            Text(String),
            Integer(i64),
        }

        match WireId::deserialize(deserializer)? {
            WireId::Text(text) if text.trim().is_empty() => {
                Err(de::Error::custom("todo id must not be empty"))
            }
            WireId::Text(text) => Ok(Self(text)),
            WireId::Integer(n) => Ok(Self(n.to_string())),
        }
    }
}

impl TodoId {
    /// Returns the identifier as it is placed in request paths.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for TodoId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl From<i32> for TodoId {
    fn from(n: i32) -> Self {
        Self(n.to_string())
    }
}

impl From<&str> for TodoId {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for TodoId {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A todo as held by the client.
///
/// Items are created by the backend and are immutable from the client's point
/// of view; the only mutation the client can request is deletion. The cached
/// copy in UI state lives until the next reload or an explicit removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub name: String,
}

impl TodoItem {
    /// Creates a todo item from an identifier and a name.
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_tracer::domain::TodoItem;
    ///
    /// let item = TodoItem::new(1, "milk");
    /// assert_eq!(item.id.as_str(), "1");
    /// assert_eq!(item.name, "milk");
    /// ```
    #[must_use]
    pub fn new(id: impl Into<TodoId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Which todo service requests are routed to.
///
/// Each variant maps to a path prefix under the configured origin. Changing the
/// selected backend invalidates the cached list and triggers a reload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The Go service, reachable under `/go`.
    #[default]
    Go,
    /// The Java service, reachable under `/java`.
    Java,
}

impl Backend {
    /// Every selectable backend, in display order.
    pub const ALL: [Self; 2] = [Self::Go, Self::Java];

    /// Lower-case identifier used in config, attributes and error text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Java => "java",
        }
    }

    /// Path prefix the service is mounted under.
    #[must_use]
    pub const fn path_prefix(self) -> &'static str {
        match self {
            Self::Go => "/go",
            Self::Java => "/java",
        }
    }

    /// Capitalized name for headings ("Go", "Java").
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Go => "Go",
            Self::Java => "Java",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "go" => Ok(Self::Go),
            "java" => Ok(Self::Java),
            other => Err(TodoError::Config(format!(
                "unknown backend '{other}' (expected 'go' or 'java')"
            ))),
        }
    }
}
