//! Domain models for the course catalog.
//!
//! This module contains the core domain types: course identifiers, course
//! records, the ordered tree that stores them, and configuration.

/// Course record type.
pub mod course;
pub use course::Course;

mod config;
pub use config::{Config, ConfigError};

/// Normalized course identifiers.
pub mod course_id;
pub use course_id::CourseId;

pub mod tree;
pub use tree::{CourseTree, Insertion};
