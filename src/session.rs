//! Line-driven interactive session: each entered range re-runs
//! filter, aggregate and render against the loaded dataset.

use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::analyzers::cache::ViewCache;
use crate::dataset::{DateRange, Dataset};
use crate::output::{OutputFormat, render};
use crate::parser::parse_date;

const HELP: &str = "Enter `START END` (YYYY-MM-DD), a single date, `all`, or `quit`.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Range { start: NaiveDate, end: NaiveDate },
    All,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    let words: Vec<&str> = line
        .split_whitespace()
        .flat_map(|w| w.split(".."))
        .filter(|w| !w.is_empty())
        .collect();

    let command = match words.as_slice() {
        [] => return Ok(None),
        [w] if w.eq_ignore_ascii_case("all") => Command::All,
        [w] if w.eq_ignore_ascii_case("help") || *w == "?" => Command::Help,
        [w] if ["quit", "exit", "q"].iter().any(|q| w.eq_ignore_ascii_case(q)) => Command::Quit,
        [day] => {
            let day = date_arg(day)?;
            Command::Range { start: day, end: day }
        }
        [start, end] => Command::Range {
            start: date_arg(start)?,
            end: date_arg(end)?,
        },
        _ => bail!("expected at most two dates, got `{line}`"),
    };
    Ok(Some(command))
}

fn date_arg(value: &str) -> Result<NaiveDate> {
    match parse_date(value) {
        Some(day) => Ok(day),
        None => bail!("`{value}` is not a YYYY-MM-DD date"),
    }
}

pub struct Session<'a> {
    dataset: &'a Dataset,
    cache: ViewCache,
    format: OutputFormat,
}

impl<'a> Session<'a> {
    pub fn new(dataset: &'a Dataset, cache: ViewCache, format: OutputFormat) -> Self {
        Self {
            dataset,
            cache,
            format,
        }
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        if let Some(bounds) = self.dataset.bounds() {
            writeln!(output, "Data available from {} to {}.", bounds.start, bounds.end)?;
        }
        writeln!(output, "{HELP}")?;

        for line in input.lines() {
            let line = line?;
            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(output, "error: {e}")?;
                    continue;
                }
            };
            debug!(?command, "Session command");

            let range = match command {
                Command::Quit => break,
                Command::Help => {
                    writeln!(output, "{HELP}")?;
                    continue;
                }
                Command::All => match self.dataset.bounds() {
                    Some(bounds) => bounds,
                    None => {
                        writeln!(output, "dataset is empty")?;
                        continue;
                    }
                },
                Command::Range { start, end } => DateRange::new(start, end),
            };

            let dashboard = self.cache.get_or_build(self.dataset, range);
            writeln!(output, "{}", render(&dashboard, self.format)?)?;
            output.flush()?;
        }

        info!(
            hits = self.cache.hits(),
            misses = self.cache.misses(),
            "Interactive session finished"
        );
        Ok(())
    }
}
