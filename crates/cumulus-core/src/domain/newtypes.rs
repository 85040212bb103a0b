//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for domain values, validated at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// A file name used as the synchronization key
///
/// Names are unique within a snapshot and identify the same file on both
/// sides. A valid name is non-empty and contains no path separators or NUL
/// bytes - the mirror is flat, so a name never addresses a nested path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileName(String);

impl FileName {
    /// Create a validated `FileName`
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::InvalidFileName(
                "name must not be empty".to_string(),
            ));
        }
        if name.contains(['/', '\\', '\0']) {
            return Err(DomainError::InvalidFileName(name));
        }
        Ok(Self(name))
    }

    /// Get the name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FileName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FileName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
