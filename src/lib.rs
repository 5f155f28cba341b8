//! Course Catalog
//!
//! Course records are loaded from a delimited text file into an ordered tree,
//! then looked up by identifier or listed in identifier order.

pub mod domain;
pub use domain::{Config, ConfigError, Course, CourseId, CourseTree, Insertion};

/// Loading course records from delimited text sources.
pub mod storage;
pub use storage::{Catalog, InlineSource, LoadError, LoadSummary, LookupError, RecordSource};
