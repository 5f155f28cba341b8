use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};

/// A normalized course identifier.
///
/// Identifiers are compared ignoring ASCII case and ASCII whitespace. That is
/// achieved by normalizing once, at construction: every ASCII whitespace
/// character is removed and ASCII letters are uppercased. `"cs 101"`, `"CS101"` and
/// `" CS 101 "` all produce the identifier `CS101`.
///
/// Ordering is the byte-wise lexicographic ordering of the normalized string.
///
/// The empty identifier is permitted. A row such as `,Title` carries an empty
/// identifier field and is still a well-formed record.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CourseId(String);

impl CourseId {
    /// Creates an identifier from raw user or file input, normalizing it.
    ///
    /// # Examples
    ///
    /// ```
    /// use planner::CourseId;
    ///
    /// assert_eq!(CourseId::new(" cs 101 ").as_str(), "CS101");
    /// assert_eq!(CourseId::new("math\t201"), CourseId::new("MATH201"));
    /// ```
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// Returns the normalized identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// ASCII whitespace as the C locale defines it, vertical tab included.
const WHITESPACE: [char; 6] = [' ', '\t', '\n', '\x0B', '\x0C', '\r'];

/// Strips ASCII whitespace and uppercases ASCII letters. Other characters
/// pass through unchanged.
fn normalize(raw: &str) -> String {
    let mut id: String = raw.chars().filter(|c| !WHITESPACE.contains(c)).collect();
    id.make_ascii_uppercase();
    id
}

impl From<&str> for CourseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CourseId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<CourseId> for String {
    fn from(id: CourseId) -> Self {
        id.0
    }
}

impl FromStr for CourseId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl AsRef<str> for CourseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CourseId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for CourseId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for CourseId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CourseId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
