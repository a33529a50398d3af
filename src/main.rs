//! CLI entry point for the bike-sharing dashboard.
//!
//! Loads the hourly dataset once, then renders, exports or interactively
//! recomputes the dashboard views for a chosen date range.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bikeshare_dashboard::analyzers::cache::{DEFAULT_CACHE_CAPACITY, ViewCache};
use bikeshare_dashboard::analyzers::dashboard::Dashboard;
use bikeshare_dashboard::config::{DEFAULT_SOURCE, LogSettings, Settings};
use bikeshare_dashboard::dataset::{DateRange, Dataset};
use bikeshare_dashboard::fetch::load_source;
use bikeshare_dashboard::labels::WeekdayOrigin;
use bikeshare_dashboard::output::{OutputFormat, export_views, print_pretty, render};
use bikeshare_dashboard::session::Session;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_dashboard")]
#[command(
    about = "Ride-count dashboard over the Capital Bikeshare hourly dataset",
    long_about = None
)]
struct Cli {
    /// Path to file or URL to fetch
    #[arg(
        long,
        global = true,
        value_name = "FILE_OR_URL",
        env = "BIKESHARE_SOURCE",
        default_value = DEFAULT_SOURCE
    )]
    source: String,

    /// Weekday that code 0 stands for in the `weekday` column
    #[arg(
        long,
        global = true,
        value_enum,
        env = "BIKESHARE_WEEKDAY_ORIGIN",
        default_value_t = WeekdayOrigin::Sunday
    )]
    weekday_origin: WeekdayOrigin,

    /// Number of date ranges whose views are memoised (0 = off)
    #[arg(
        long,
        global = true,
        env = "BIKESHARE_CACHE_CAPACITY",
        default_value_t = DEFAULT_CACHE_CAPACITY
    )]
    cache_capacity: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RangeArgs {
    /// First day to include (YYYY-MM-DD); defaults to the earliest day in the data
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD); defaults to the latest day in the data
    #[arg(long)]
    end: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print metrics and every view for a date range
    Summary {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the date span and row count of the dataset
    Range,
    /// Write every view for a date range as CSV files
    Export {
        #[command(flatten)]
        range: RangeArgs,

        /// Directory to write the CSV files to
        #[arg(short = 'd', long, default_value = "views")]
        output_dir: PathBuf,

        /// Gzip compress the CSV files
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Read date ranges from stdin and re-render the dashboard for each
    Interactive {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing(&LogSettings::from_env())?;

    let cli = Cli::parse();
    let settings = Settings {
        source: cli.source,
        weekday_origin: cli.weekday_origin,
        cache_capacity: cli.cache_capacity,
    };

    let dataset = load_dataset(&settings)?;

    match cli.command {
        Commands::Summary { range, format } => {
            let range = resolve(&dataset, &range)?;
            let dashboard = Dashboard::build(&dataset, range, settings.weekday_origin);
            print_pretty(&dashboard);
            println!("{}", render(&dashboard, format)?);
        }
        Commands::Range => match dataset.bounds() {
            Some(bounds) => println!("{} .. {} ({} rows)", bounds.start, bounds.end, dataset.len()),
            None => println!("dataset is empty"),
        },
        Commands::Export {
            range,
            output_dir,
            gzip,
        } => {
            let range = resolve(&dataset, &range)?;
            let dashboard = Dashboard::build(&dataset, range, settings.weekday_origin);
            let paths = export_views(&output_dir, &dashboard, gzip)
                .with_context(|| format!("failed to export views to {}", output_dir.display()))?;
            for path in paths {
                println!("{}", path.display());
            }
        }
        Commands::Interactive { format } => {
            let cache = ViewCache::new(settings.cache_capacity, settings.weekday_origin);
            let mut session = Session::new(&dataset, cache, format);
            session.run(io::stdin().lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file
fn init_tracing(log: &LogSettings) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(log.log_dir(), log.log_file_name());
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive(log.stderr_level.parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive(log.json_level.parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

/// Fetches and parses the dataset named by `settings.source`.
#[tracing::instrument(skip_all, fields(source = %settings.source))]
fn load_dataset(settings: &Settings) -> Result<Dataset> {
    let bytes = load_source(&settings.source)?;
    let dataset = Dataset::from_csv(&bytes, settings.weekday_origin)
        .with_context(|| format!("failed to parse dataset from {}", settings.source))?;
    info!(rows = dataset.len(), "Dataset ready");
    Ok(dataset)
}

fn resolve(dataset: &Dataset, args: &RangeArgs) -> Result<DateRange> {
    dataset
        .resolve_range(args.start, args.end)
        .context("dataset is empty; pass both --start and --end")
}
