use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod consolidate;
mod fetch;
mod normalize;
mod scrape;
mod store;
mod types;

/// Per-page dumps written by `scrape` and read by `consolidate`
pub const DATASET_FILE: &str = "dataset.json";
pub const CONSOLIDATED_FILE: &str = "consolidated_dataset.json";

/// Pages scraped, in processing order
pub const SOURCE_URLS: &[&str] = &[
    "https://en.wikipedia.org/wiki/List_of_national_capitals_by_population",
    "https://en.wikipedia.org/wiki/List_of_national_capitals_by_area",
    "https://en.wikipedia.org/wiki/List_of_national_capitals_by_latitude",
];

#[derive(Parser)]
#[command(name = "capitals-consolidate")]
#[command(about = "Scrape Wikipedia capital-city tables and merge them into one record per country")]
struct Cli {
    /// Defaults to `consolidate`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge dataset.json into consolidated_dataset.json
    Consolidate,
    /// Fetch the source pages into dataset.json
    Scrape,
    /// Scrape, then consolidate
    Run,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let dataset = Path::new(DATASET_FILE);
    let consolidated = Path::new(CONSOLIDATED_FILE);

    match cli.command.unwrap_or(Commands::Consolidate) {
        Commands::Consolidate => consolidate::run_consolidate(dataset, consolidated),
        Commands::Scrape => scrape::run_scrape(dataset),
        Commands::Run => {
            scrape::run_scrape(dataset)?;
            consolidate::run_consolidate(dataset, consolidated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_means_consolidate() {
        let cli = Cli::try_parse_from(["capitals-consolidate"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["capitals-consolidate", "scrape"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Scrape)));

        assert!(Cli::try_parse_from(["capitals-consolidate", "--output", "x.json"]).is_err());
    }
}
