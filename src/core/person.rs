use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a person taking part in a shared bill.
///
/// Names are the only identity the engine knows about: two items consumed
/// by `"Alice"` belong to the same person, and the payer of an activity is
/// matched against consumers by exact string equality.
///
/// # Examples
///
/// ```
/// use split_engine::core::person::PersonName;
///
/// let alice = PersonName::new("Alice");
/// let bob = PersonName::new("Bob");
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the name is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PersonName {
    fn from(s: String) -> Self {
        Self(s)
    }
}
