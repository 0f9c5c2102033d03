//! Data types for facts API responses.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;

/// A fact category tag (e.g., "food", "dev").
///
/// The client never checks a category against the list the service
/// publishes; any string is accepted on decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty category means "no filter" to
    /// [`random_fact_by_category`](super::FactApiClient::random_fact_by_category).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for Category {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Category {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A single fact returned by `/jokes/random`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// The fact text.
    pub value: String,
    /// Categories the fact belongs to. The wire field is `category` and the
    /// service sends `null` for uncategorised facts.
    #[serde(
        rename = "category",
        default,
        deserialize_with = "deserialize_default_from_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub categories: Vec<Category>,
    /// Service-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Permalink to the fact on the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Avatar image shown alongside the fact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}
