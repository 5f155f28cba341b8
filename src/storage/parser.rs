//! Parsing of single delimited rows into course records.
//!
//! A row looks like `ID,Title,PREREQ1,PREREQ2,...`. Fields are trimmed;
//! there is no quoting, so a delimiter can never appear inside a field.

use crate::domain::{Course, CourseId};

/// Characters stripped from either end of a row and of each field.
const TRIM: &[char] = &[' ', '\t', '\r', '\n'];

/// The outcome of parsing one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// The row is empty or contains only whitespace.
    Blank,
    /// The row has fewer than the two fields needed for an identifier and a
    /// title.
    Malformed {
        /// How many fields the row split into.
        fields: usize,
    },
    /// The row describes a course.
    Record(Course),
}

impl Parsed {
    /// Returns the course, if the row described one.
    #[must_use]
    pub fn into_record(self) -> Option<Course> {
        match self {
            Self::Record(course) => Some(course),
            Self::Blank | Self::Malformed { .. } => None,
        }
    }
}

/// Splits a row on `delimiter`, trimming every field.
///
/// A row ending in the delimiter yields a final empty field, so `"a,b,"`
/// splits into three fields.
///
/// # Examples
///
/// ```
/// use planner::storage::split_fields;
///
/// assert_eq!(split_fields(" CS101 , Intro ", ','), ["CS101", "Intro"]);
/// assert_eq!(split_fields("CS101,Intro,", ','), ["CS101", "Intro", ""]);
/// ```
#[must_use]
pub fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).map(|field| field.trim_matches(TRIM)).collect()
}

/// Parses a single row.
///
/// - The first field is the course identifier, normalized.
/// - The second field is the title, kept as written.
/// - Any further non-empty fields are prerequisite identifiers, normalized.
///   Empty fields among them (including the one produced by a trailing
///   delimiter) are dropped.
#[must_use]
pub fn parse_line(line: &str, delimiter: char) -> Parsed {
    if line.trim_matches(TRIM).is_empty() {
        return Parsed::Blank;
    }

    let fields = split_fields(line, delimiter);
    let [id, title, prerequisites @ ..] = fields.as_slice() else {
        return Parsed::Malformed {
            fields: fields.len(),
        };
    };

    Parsed::Record(Course {
        id: CourseId::new(id),
        title: (*title).to_string(),
        prerequisites: prerequisites
            .iter()
            .filter(|field| !field.is_empty())
            .map(|field| CourseId::new(field))
            .collect(),
    })
}
