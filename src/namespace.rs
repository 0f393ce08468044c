//! Namespace tags for stored locations.
//!
//! A namespace identifies the provider or category a location came from.
//! It is an attribute of the record, not a separate store: every location
//! shares one identifier sequence and one sorted index, and namespace-scoped
//! searches simply filter on the tag.

use crate::error::{GeoIndexError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest namespace name accepted, in bytes.
pub const MAX_NAMESPACE_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamespaceName(String);

impl NamespaceName {
    /// Parses and validates a string as a namespace name.
    ///
    /// # Returns
    ///
    /// `Ok(NamespaceName)` if the name is valid, `Err(GeoIndexError::InvalidInput)` otherwise.
    pub fn parse<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(GeoIndexError::InvalidInput(
                "Namespace name cannot be empty".into(),
            ));
        }

        if name.contains('\0') {
            return Err(GeoIndexError::InvalidInput(
                "Namespace name cannot contain null bytes".into(),
            ));
        }

        if name.len() > MAX_NAMESPACE_LEN {
            return Err(GeoIndexError::InvalidInput(format!(
                "Namespace name cannot exceed {} characters",
                MAX_NAMESPACE_LEN
            )));
        }

        Ok(Self(name))
    }

    /// Returns a reference to the inner string of the namespace name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NamespaceName {
    type Error = GeoIndexError;

    fn try_from(name: String) -> Result<Self> {
        Self::parse(name)
    }
}

impl From<NamespaceName> for String {
    fn from(name: NamespaceName) -> Self {
        name.0
    }
}

impl AsRef<str> for NamespaceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
