use std::{io::Write, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use planner::Config;
use tracing::instrument;

use super::{render, terminal::Palette, OutputFormat};

#[derive(Debug, Parser)]
#[command(about = "Print every course in identifier order")]
pub struct List {
    /// The course file to load (defaults to the configured source)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl List {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: &Config, palette: Palette) -> anyhow::Result<()> {
        let catalog = super::load_catalog(self.file, config)?;
        let courses = catalog
            .enumerate()
            .context("the course file contains no courses")?;

        let mut stdout = std::io::stdout().lock();
        match self.output {
            OutputFormat::Text => render::schedule(&mut stdout, palette, courses)?,
            OutputFormat::Json => {
                let courses: Vec<_> = courses.collect();
                serde_json::to_writer_pretty(&mut stdout, &courses)?;
                writeln!(stdout)?;
            }
        }
        Ok(())
    }
}
