use std::{io::Write, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use planner::{Config, LookupError};
use tracing::instrument;

use super::{render, terminal::Palette, OutputFormat};

#[derive(Debug, Parser)]
#[command(about = "Display a course and its prerequisites")]
pub struct Show {
    /// The course identifier (case and whitespace are ignored)
    course: String,

    /// The course file to load (defaults to the configured source)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Show {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: &Config, palette: Palette) -> anyhow::Result<()> {
        let catalog = super::load_catalog(self.file, config)?;

        let course = match catalog.find(&self.course) {
            Ok(course) => course,
            Err(LookupError::NotFound(id)) => anyhow::bail!("Course {id} not found"),
            Err(e @ LookupError::Uninitialized) => {
                return Err(e).context("the course file contains no courses");
            }
        };

        let mut stdout = std::io::stdout().lock();
        match self.output {
            OutputFormat::Text => render::course_detail(&mut stdout, palette, course)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut stdout, course)?;
                writeln!(stdout)?;
            }
        }
        Ok(())
    }
}
