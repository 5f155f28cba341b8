//! The interactive menu.
//!
//! Each round prints the menu, reads one choice, and dispatches it against a
//! [`Catalog`] owned by the session. Input and output are generic so the
//! whole loop can be driven from memory.

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use planner::{Catalog, Config, LoadError};
use tracing::instrument;

use super::{render, terminal::Palette};

/// A request read from the menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Load,
    List,
    Show,
    Exit,
    /// A number that is not on the menu.
    Unknown(i64),
    /// Input that is not a number at all.
    Invalid,
}

impl MenuChoice {
    fn parse(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(1) => Self::Load,
            Ok(2) => Self::List,
            Ok(3) => Self::Show,
            Ok(9) => Self::Exit,
            Ok(other) => Self::Unknown(other),
            Err(_) => Self::Invalid,
        }
    }
}

/// What the loop should do after handling a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// An interactive menu session.
pub struct Session<'a, R, W> {
    catalog: Catalog,
    default_source: Option<&'a Path>,
    input: R,
    output: W,
    palette: Palette,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(config: &'a Config, input: R, output: W, palette: Palette) -> Self {
        Self {
            catalog: Catalog::from_config(config),
            default_source: config.source.as_deref(),
            input,
            output,
            palette,
        }
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    #[instrument(level = "debug", skip(self))]
    pub fn run(mut self) -> io::Result<()> {
        write!(self.output, "Welcome to the course planner.\n\n")?;

        loop {
            self.prompt_menu()?;
            let Some(line) = self.read_line()? else {
                tracing::debug!("input closed");
                break;
            };
            writeln!(self.output)?;

            if self.handle(MenuChoice::parse(&line))? == Flow::Quit {
                break;
            }
        }

        self.output.flush()
    }

    fn prompt_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "1. Load Data Structure.")?;
        writeln!(self.output, "2. Print Course List.")?;
        writeln!(self.output, "3. Print Course.")?;
        write!(self.output, "9. Exit\n\n")?;
        write!(self.output, "What would you like to do? ")?;
        self.output.flush()
    }

    fn handle(&mut self, choice: MenuChoice) -> io::Result<Flow> {
        tracing::trace!(?choice, "menu choice");
        match choice {
            MenuChoice::Load => self.load()?,
            MenuChoice::List => self.list()?,
            MenuChoice::Show => self.show()?,
            MenuChoice::Exit => {
                writeln!(self.output, "Thank you for using the course planner!")?;
                return Ok(Flow::Quit);
            }
            MenuChoice::Unknown(n) => write!(self.output, "{n} is not a valid option.\n\n")?,
            MenuChoice::Invalid => write!(self.output, "is not a valid option.\n\n")?,
        }
        Ok(Flow::Continue)
    }

    fn load(&mut self) -> io::Result<()> {
        let file = match self.default_source {
            Some(default) => {
                write!(self.output, "Enter the file name [{}]: ", default.display())?;
                self.output.flush()?;
                match self.read_line()? {
                    Some(line) if !line.trim().is_empty() => PathBuf::from(line.trim_start()),
                    Some(_) => default.to_path_buf(),
                    None => return Ok(()),
                }
            }
            None => {
                write!(self.output, "Enter the file name: ")?;
                self.output.flush()?;
                let Some(line) = self.read_nonblank_line()? else {
                    return Ok(());
                };
                PathBuf::from(line.trim_start())
            }
        };
        writeln!(self.output)?;

        match self.catalog.rebuild(file.as_path()) {
            Ok(summary) => {
                if summary.interrupted {
                    tracing::warn!("{} was only partially read", file.display());
                }
                write!(self.output, "{}\n\n", self.palette.success("Data loaded."))?;
            }
            Err(LoadError::SourceUnavailable { location, cause }) => {
                tracing::debug!("failed to open {location}: {cause}");
                let message = format!("Unable to open file: {}", file.display());
                write!(self.output, "{}\n\n", self.palette.warning(&message))?;
            }
        }
        Ok(())
    }

    fn list(&mut self) -> io::Result<()> {
        match self.catalog.enumerate() {
            Ok(courses) => render::schedule(&mut self.output, self.palette, courses),
            Err(e) => render::lookup_error(&mut self.output, self.palette, &e),
        }
    }

    fn show(&mut self) -> io::Result<()> {
        if self.catalog.is_empty() {
            return writeln!(self.output, "{}", self.palette.warning(render::LOAD_FIRST));
        }

        write!(self.output, "What course do you want to know about? ")?;
        self.output.flush()?;
        let Some(query) = self.read_nonblank_line()? else {
            return Ok(());
        };
        writeln!(self.output)?;

        match self.catalog.find(&query) {
            Ok(course) => render::course_detail(&mut self.output, self.palette, course),
            Err(e) => render::lookup_error(&mut self.output, self.palette, &e),
        }
    }

    /// Reads one line without its line ending. `None` means end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Reads lines until one contains something other than whitespace.
    fn read_nonblank_line(&mut self) -> io::Result<Option<String>> {
        while let Some(line) = self.read_line()? {
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}
