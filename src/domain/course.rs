use serde::Serialize;

use crate::domain::CourseId;

/// A single course record.
///
/// The identifier is the record's key. The title is display text and is kept
/// exactly as given (apart from surrounding whitespace, which the parser
/// trims). Prerequisites are identifiers of other courses; they are normalized
/// like the key so that they can be looked up, but they are never checked for
/// existence and duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    /// The normalized course identifier.
    pub id: CourseId,
    /// The course title.
    pub title: String,
    /// Prerequisite course identifiers, in source order.
    pub prerequisites: Vec<CourseId>,
}

impl Course {
    /// Creates a course with no prerequisites.
    #[must_use]
    pub fn new(id: impl Into<CourseId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            prerequisites: Vec::new(),
        }
    }

    /// Builder-style helper that sets the prerequisite list.
    #[must_use]
    pub fn with_prerequisites<I, P>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<CourseId>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if the course has at least one prerequisite.
    #[must_use]
    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }
}
