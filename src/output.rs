//! Output formatting and persistence for dashboards.
//!
//! Supports pretty-printing, JSON rendering, a plain-text report and CSV
//! export of each view.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::dashboard::Dashboard;
use crate::analyzers::types::LongRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Full JSON document: views, metric cards and chart specifications.
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    dashboard: &'a Dashboard,
    metrics: [crate::analyzers::dashboard::MetricCard; 3],
    charts: Vec<crate::analyzers::charts::ChartSpec>,
}

/// Logs a dashboard using Rust's debug pretty-print format.
pub fn print_pretty(dashboard: &Dashboard) {
    debug!("{:#?}", dashboard);
}

pub fn render_json(dashboard: &Dashboard) -> Result<String> {
    let report = JsonReport {
        dashboard,
        metrics: dashboard.metrics(),
        charts: dashboard.charts(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render(dashboard: &Dashboard, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => render_text(dashboard),
        OutputFormat::Json => render_json(dashboard),
    }
}

/// Headline metrics followed by one table per view.
pub fn render_text(dashboard: &Dashboard) -> Result<String> {
    let mut out = String::new();
    let range = dashboard.range;

    writeln!(out, "Bike-Sharing Dashboard")?;
    if range.is_inverted() {
        writeln!(out, "No days selected ({} .. {})", range.start, range.end)?;
    } else {
        writeln!(out, "{} .. {} ({} rows)", range.start, range.end, dashboard.rows)?;
    }
    writeln!(out)?;

    for card in dashboard.metrics() {
        writeln!(out, "{:<24}{:>12}", card.label, card.value)?;
    }
    let shares = [
        ("Casual share", dashboard.totals.casual_pct()),
        ("Registered share", dashboard.totals.registered_pct()),
    ];
    for (label, pct) in shares {
        writeln!(out, "{:<24}{:>11.1}%", label, pct)?;
    }

    writeln!(out)?;
    writeln!(out, "Hourly Count of Bikeshare Rides")?;
    writeln!(out, "{:>4} {:>10} {:>12} {:>10}", "hr", "casual", "registered", "cnt")?;
    for row in &dashboard.hourly {
        writeln!(
            out,
            "{:>4} {:>10} {:>12} {:>10}",
            row.hr, row.casual, row.registered, row.cnt
        )?;
    }

    let long_views = [
        ("Monthly Count of Bikeshare Rides", &dashboard.monthly),
        ("Weekly Count of Bikeshare Rides", &dashboard.weekly),
        ("Bikeshare Rides by Weather", &dashboard.weather),
        ("Bikeshare Rides by Season", &dashboard.season),
    ];
    for (title, rows) in long_views {
        writeln!(out)?;
        write_long_table(&mut out, title, rows)?;
    }

    Ok(out)
}

fn write_long_table(out: &mut String, title: &str, rows: &[LongRow]) -> std::fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "{:<16} {:<10} {:>10}", "category", "status", "count")?;
    for row in rows {
        writeln!(
            out,
            "{:<16} {:<10} {:>10}",
            row.label,
            row.status.as_str(),
            row.count
        )?;
    }
    Ok(())
}

const LONG_HEADERS: [&str; 4] = ["code", "label", "status", "count"];

/// Writes every view of `dashboard` into `dir` as headed CSV files.
///
/// With `gzip` each file gets a `.csv.gz` name and is compressed. Returns
/// the written paths in view order.
#[tracing::instrument(skip(dashboard))]
pub fn export_views(dir: &Path, dashboard: &Dashboard, gzip: bool) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let paths = vec![
        write_view(
            dir,
            "totals",
            &["total_rides", "total_casual", "total_registered"],
            &[dashboard.totals],
            gzip,
        )?,
        write_view(
            dir,
            "hourly",
            &["hr", "casual", "registered", "cnt"],
            &dashboard.hourly,
            gzip,
        )?,
        write_view(dir, "monthly", &LONG_HEADERS, &dashboard.monthly, gzip)?,
        write_view(dir, "weekly", &LONG_HEADERS, &dashboard.weekly, gzip)?,
        write_view(dir, "weather", &LONG_HEADERS, &dashboard.weather, gzip)?,
        write_view(dir, "season", &LONG_HEADERS, &dashboard.season, gzip)?,
    ];

    info!(files = paths.len(), "Views exported");
    Ok(paths)
}

fn write_view<T: Serialize>(
    dir: &Path,
    name: &str,
    headers: &[&str],
    rows: &[T],
    gzip: bool,
) -> Result<PathBuf> {
    let path = if gzip {
        dir.join(format!("{name}.csv.gz"))
    } else {
        dir.join(format!("{name}.csv"))
    };
    debug!(path = %path.display(), rows = rows.len(), "Writing view");

    let file = File::create(&path)?;
    if gzip {
        let encoder = GzEncoder::new(file, Compression::default());
        let encoder = write_rows(encoder, headers, rows)?;
        encoder.finish()?;
    } else {
        write_rows(file, headers, rows)?;
    }

    Ok(path)
}

/// Writes the header row explicitly so empty views still carry one.
fn write_rows<W: Write, T: Serialize>(inner: W, headers: &[&str], rows: &[T]) -> Result<W> {
    let mut writer = WriterBuilder::new()
        .has_headers(false) // headers are written by hand
        .from_writer(inner);

    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|e| anyhow!("failed to flush CSV writer: {}", e.error()))
}
