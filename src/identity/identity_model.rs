use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::identity::sanitize::{sanitize_label, short_fingerprint};

/// Anything with a stable unique key, e.g. a model row with a database id.
pub trait Identifiable {
    fn stable_id(&self) -> String;
}

/// The identity segment of a generated identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Identity {
    /// Stable key, embedded verbatim
    Keyed(String),
    /// No key available; derived from the value's content
    Content(String),
}

impl Identity {
    pub fn keyed(id: impl Into<String>) -> Self {
        Identity::Keyed(id.into())
    }

    pub fn content(value: impl Into<String>) -> Self {
        Identity::Content(value.into())
    }

    pub fn of<T: Identifiable + ?Sized>(value: &T) -> Self {
        Identity::Keyed(value.stable_id())
    }

    /// Content identity for values that only offer a `Debug` rendering.
    pub fn from_debug<T: Debug + ?Sized>(value: &T) -> Self {
        Identity::Content(format!("{:?}", value))
    }

    /// Token embedded in the identifier.
    ///
    /// Keyed identities are used as-is. Content is sanitized like a label;
    /// content that sanitizes to nothing (symbols, non-Latin text) falls
    /// back to a short fingerprint so the token is never empty.
    pub fn token(&self) -> String {
        match self {
            Identity::Keyed(key) => {
                let key = key.trim();
                if key.is_empty() {
                    short_fingerprint("")
                } else {
                    key.to_string()
                }
            }
            Identity::Content(content) => {
                let sanitized = sanitize_label(content);
                if sanitized.is_empty() {
                    short_fingerprint(content)
                } else {
                    sanitized
                }
            }
        }
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Identity::Content(value.to_string())
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Identity::Content(value)
    }
}
