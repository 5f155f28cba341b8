//! The course catalog store
//!
//! A [`Catalog`] owns a [`CourseTree`] for the duration of one load. It is
//! rebuilt wholesale from a [`RecordSource`], and answers lookups and ordered
//! listings. An empty catalog reports [`LookupError::Uninitialized`] so that
//! callers can tell "nothing loaded" apart from "no such course".

use std::io::{self, BufRead};

use tracing::instrument;

use crate::{
    domain::{tree, Config, Course, CourseId, CourseTree, Insertion},
    storage::{
        parser::{parse_line, Parsed},
        source::RecordSource,
    },
};

/// Drops a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// An ordered, key-unique store of courses.
#[derive(Debug)]
pub struct Catalog {
    tree: CourseTree,
    delimiter: char,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::with_delimiter(',')
    }
}

/// Errors that can occur when rebuilding a catalog.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source could not be opened. The catalog was left untouched.
    #[error("unable to open {location}")]
    SourceUnavailable {
        /// A description of the source.
        location: String,
        /// The underlying I/O error.
        #[source]
        cause: io::Error,
    },
}

/// Errors returned by catalog queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The catalog holds no courses; load data first.
    #[error("no course data has been loaded")]
    Uninitialized,
    /// No course has the requested identifier.
    #[error("course {0} not found")]
    NotFound(CourseId),
}

/// Counts gathered while rebuilding a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Rows read from the source.
    pub rows: usize,
    /// Courses added as new entries.
    pub inserted: usize,
    /// Rows that overwrote a course with the same identifier.
    pub replaced: usize,
    /// Blank rows.
    pub blank: usize,
    /// Rows skipped for lacking an identifier and title.
    pub skipped: usize,
    /// Whether reading stopped early because of an I/O error. Courses read
    /// before the error are kept.
    pub interrupted: bool,
}

impl Catalog {
    /// Creates an empty catalog that splits rows on `delimiter`.
    #[must_use]
    pub const fn with_delimiter(delimiter: char) -> Self {
        Self {
            tree: CourseTree::new(),
            delimiter,
        }
    }

    /// Creates an empty catalog using the delimiter from `config`.
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self::with_delimiter(config.delimiter())
    }

    /// Returns the number of courses held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if no courses are held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Replaces the contents of the catalog with the courses in `source`.
    ///
    /// Rows are applied top to bottom, so a later row with the same
    /// identifier as an earlier one wins. Blank and malformed rows are
    /// skipped and counted.
    ///
    /// If reading fails part way through, the courses read so far are kept
    /// and the summary is marked as interrupted.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::SourceUnavailable`] if the source cannot be
    /// opened. In that case the existing contents are left unchanged.
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub fn rebuild<S>(&mut self, source: &S) -> Result<LoadSummary, LoadError>
    where
        S: RecordSource + ?Sized,
    {
        let reader = source.open().map_err(|cause| LoadError::SourceUnavailable {
            location: source.describe(),
            cause,
        })?;

        let released = self.tree.teardown();
        tracing::debug!(released, "discarded previous catalog");

        let summary = self.populate(reader);
        tracing::info!(
            courses = self.tree.len(),
            height = self.tree.height(),
            rows = summary.rows,
            replaced = summary.replaced,
            skipped = summary.skipped,
            "catalog loaded"
        );
        Ok(summary)
    }

    fn populate<R: BufRead>(&mut self, mut reader: R) -> LoadSummary {
        let mut summary = LoadSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Stopped reading at row {}: {e}", summary.rows + 1);
                    summary.interrupted = true;
                    break;
                }
            }
            summary.rows += 1;

            let line = String::from_utf8_lossy(strip_line_ending(&buf));
            match parse_line(&line, self.delimiter) {
                Parsed::Blank => summary.blank += 1,
                Parsed::Malformed { fields } => {
                    tracing::debug!("Skipping row {} with {fields} field(s)", summary.rows);
                    summary.skipped += 1;
                }
                Parsed::Record(course) => match self.tree.insert(course) {
                    Insertion::Inserted => summary.inserted += 1,
                    Insertion::Replaced => summary.replaced += 1,
                },
            }
        }

        summary
    }

    /// Looks up a course by a raw key, normalizing it first.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Uninitialized`] if the catalog is empty, or
    /// [`LookupError::NotFound`] if no course has the normalized identifier.
    pub fn find(&self, raw_key: &str) -> Result<&Course, LookupError> {
        if self.tree.is_empty() {
            return Err(LookupError::Uninitialized);
        }
        let id = CourseId::new(raw_key);
        self.tree.get(&id).ok_or(LookupError::NotFound(id))
    }

    /// Returns every course in ascending identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Uninitialized`] if the catalog is empty.
    pub fn enumerate(&self) -> Result<tree::Iter<'_>, LookupError> {
        if self.tree.is_empty() {
            return Err(LookupError::Uninitialized);
        }
        Ok(self.tree.iter())
    }

    /// Releases every course, returning the catalog to its empty state.
    ///
    /// Returns the number of courses released.
    pub fn teardown(&mut self) -> usize {
        self.tree.teardown()
    }
}
