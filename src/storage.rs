pub mod catalog;
pub mod parser;
mod source;

pub use catalog::{Catalog, LoadError, LoadSummary, LookupError};
pub use parser::{parse_line, split_fields, Parsed};
pub use source::{InlineSource, RecordSource};
