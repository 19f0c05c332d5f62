use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use time::format_description;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reposcout::{Config, ConfigError, GitPromptProbe, SortOrder, Tracker};

#[derive(Parser)]
#[command(name = "reposcout", version, about = "Lists the status of your tracked Git folders")]
struct Cli {
    /// Alternative configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sort order for the listing.
    #[arg(long, value_enum, default_value = "modified-date")]
    sort: SortArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Name,
    ModifiedDate,
    Changes,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Name => SortOrder::Name,
            SortArg::ModifiedDate => SortOrder::ModifiedDate,
            SortArg::Changes => SortOrder::Changes,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reposcout=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ConfigError> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    info!(config = %config_path.display(), "starting reposcout");

    let config = Config::load_or_create(&config_path)?;
    let mut tracker = Tracker::new(config, config_path, Box::new(GitPromptProbe::default()));
    tracker.sort(cli.sort.into());
    print_listing(&tracker);

    Ok(())
}

fn print_listing(tracker: &Tracker) {
    let date_format = format_description::parse(tracker.date_format()).ok();
    let width = tracker.path_column_width();

    println!("Tracked folder statuses :");
    println!("_________________________");
    for folder in tracker.folders() {
        let date = folder
            .modified_date()
            .and_then(|date| date_format.as_ref().and_then(|format| date.format(format).ok()))
            .unwrap_or_default();
        let remote = if folder.has_remote() { "has remote" } else { "" };
        let line = format!(
            "{date:<16} - {path:<width$} - {git} {go} {remote}",
            path = folder.path().display(),
            git = folder.git_status(),
            go = folder.go_status(),
        );
        println!("{}", line.trim_end());
    }
}
