use std::path::PathBuf;

mod list;
mod menu;
mod render;
mod show;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use list::List;
use planner::{Catalog, Config};
use show::Show;
use terminal::Palette;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = "planner.toml", global = true)]
    config: PathBuf,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = Config::load_or_default(&self.config);
        let palette = if self.no_color {
            Palette::plain()
        } else {
            Palette::detect()
        };

        self.command
            .unwrap_or(Command::Menu)
            .run(&config, palette)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // Menu output owns stdout.
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Run the interactive menu (default)
    Menu,

    /// Print every course in identifier order
    List(List),

    /// Display a course and its prerequisites
    Show(Show),
}

impl Command {
    fn run(self, config: &Config, palette: Palette) -> anyhow::Result<()> {
        match self {
            Self::Menu => run_menu(config, palette)?,
            Self::List(command) => command.run(config, palette)?,
            Self::Show(command) => command.run(config, palette)?,
        }
        Ok(())
    }
}

/// Output formats for one-shot commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[instrument(level = "debug", skip(config))]
fn run_menu(config: &Config, palette: Palette) -> anyhow::Result<()> {
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    menu::Session::new(config, stdin, stdout, palette)
        .run()
        .context("console I/O failed")
}

/// Loads the named file, or the configured default, into a fresh catalog.
fn load_catalog(file: Option<PathBuf>, config: &Config) -> anyhow::Result<Catalog> {
    let path = file
        .or_else(|| config.source.clone())
        .context("no course file given and no default source configured")?;

    let mut catalog = Catalog::from_config(config);
    let summary = catalog
        .rebuild(path.as_path())
        .with_context(|| format!("failed to load {}", path.display()))?;

    if summary.interrupted {
        tracing::warn!("{} was only partially read", path.display());
    }
    tracing::debug!(?summary, "loaded {}", path.display());

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    #[test]
    fn menu_is_the_default_command() {
        let cli = Cli::try_parse_from(["planner"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("planner.toml"));
    }

    #[test]
    fn parses_show_arguments() {
        let cli =
            Cli::try_parse_from(["planner", "-vv", "show", "cs 101", "--file", "courses.csv", "--output", "json"])
                .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Command::Show(_))));
    }

    #[test]
    fn load_catalog_prefers_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"CS101,Intro\n").unwrap();

        let mut config = Config::default();
        config.source = Some(PathBuf::from("does-not-exist.csv"));

        let catalog = load_catalog(Some(file.path().to_path_buf()), &config).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn load_catalog_falls_back_to_configured_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"CS101,Intro\nCS102,More\n").unwrap();

        let mut config = Config::default();
        config.source = Some(file.path().to_path_buf());

        let catalog = load_catalog(None, &config).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn load_catalog_without_any_source_fails() {
        let error = load_catalog(None, &Config::default()).unwrap_err();
        assert!(error.to_string().contains("no course file given"));
    }

    #[test]
    fn load_catalog_reports_missing_file() {
        let error = load_catalog(Some(PathBuf::from("/nonexistent/courses.csv")), &Config::default())
            .unwrap_err();
        assert!(error.to_string().contains("failed to load"));
    }
}
