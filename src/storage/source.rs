//! Where course rows come from.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

/// Something that can be opened and read line by line.
///
/// Opening is separate from reading so that a catalog can refuse to discard
/// its contents when the source is not available at all.
pub trait RecordSource {
    /// The reader produced by a successful [`open`](Self::open).
    type Reader: BufRead;

    /// Opens the source for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be opened.
    fn open(&self) -> io::Result<Self::Reader>;

    /// A human-readable description of the source, used in logs and errors.
    fn describe(&self) -> String;
}

impl RecordSource for Path {
    type Reader = BufReader<File>;

    fn open(&self) -> io::Result<Self::Reader> {
        File::open(self).map(BufReader::new)
    }

    fn describe(&self) -> String {
        self.display().to_string()
    }
}

impl RecordSource for PathBuf {
    type Reader = BufReader<File>;

    fn open(&self) -> io::Result<Self::Reader> {
        self.as_path().open()
    }

    fn describe(&self) -> String {
        self.as_path().describe()
    }
}

/// Course rows held in memory.
///
/// ```
/// use planner::{Catalog, InlineSource};
///
/// let mut catalog = Catalog::default();
/// catalog
///     .rebuild(&InlineSource::new("CS101,Intro\nCS200,Data Structures,CS101\n"))
///     .unwrap();
/// assert_eq!(catalog.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineSource<'a> {
    text: &'a str,
}

impl<'a> InlineSource<'a> {
    /// Wraps the given text.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl<'a> RecordSource for InlineSource<'a> {
    type Reader = &'a [u8];

    fn open(&self) -> io::Result<Self::Reader> {
        Ok(self.text.as_bytes())
    }

    fn describe(&self) -> String {
        "<inline>".to_string()
    }
}
