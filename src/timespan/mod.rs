/// Background timespans: file parsing and chart annotation layout.
///
/// File layout (tab separated, blocks separated by blank lines):
/// ```text
///  Presidents  took office  left office          ← header: name + column labels
///  McKinley    1897         1901                 ← era: label + years
///  Roosevelt   1901         1909
///
///  Wars        start        escalation  end      ← staged: 3 year columns
///  WWI         1914         1917        1918
/// ```

pub mod layout;

use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::config::Year;

pub use layout::{Fill, LegendEntry, Mark};

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// One row of a timespan block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Era {
    pub label: String,
    pub start: Year,
    /// Start of the second stage, for staged timespans only.
    pub stage_break: Option<Year>,
    pub end: Year,
}

/// A named set of eras drawn behind the ngram lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timespan {
    pub name: String,
    /// Header labels following the name (2 plain, 3 staged).
    pub columns: Vec<String>,
    pub eras: Vec<Era>,
}

impl Timespan {
    pub fn is_staged(&self) -> bool {
        self.columns.len() == 3
    }

    /// Headers of any other width make a timespan that is listed but never drawn.
    pub fn is_valid(&self) -> bool {
        matches!(self.columns.len(), 2 | 3)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimespanError {
    #[error("line {line}: expected {expected} fields, found {found}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: '{value}' is not a year")]
    Year { line: usize, value: String },
}

/// Read every timespan of a file. Malformed blocks are logged and skipped.
pub fn load(path: &Path) -> Result<Vec<Timespan>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading timespan file {}", path.display()))?;
    let (timespans, errors) = parse(&text);
    for err in &errors {
        log::warn!("{}: skipped timespan block, {err}", path.display());
    }
    Ok(timespans)
}

/// Parse timespan blocks, returning the good ones and one error per bad block.
pub fn parse(text: &str) -> (Vec<Timespan>, Vec<TimespanError>) {
    let mut timespans = Vec::new();
    let mut errors = Vec::new();
    let mut block: Vec<(usize, &str)> = Vec::new();

    let lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));
    // Trailing sentinel closes the last block.
    for (line_no, line) in lines.chain(std::iter::once((0, ""))) {
        if !line.trim().is_empty() {
            block.push((line_no, line));
            continue;
        }
        if block.is_empty() {
            continue;
        }
        match parse_block(&block) {
            Ok(timespan) => {
                if !timespan.is_valid() {
                    log::warn!("The format of the data of '{}' is incorrect.", timespan.name);
                }
                timespans.push(timespan);
            }
            Err(err) => errors.push(err),
        }
        block.clear();
    }
    (timespans, errors)
}

fn split_fields(line: &str) -> Vec<&str> {
    line.trim_end_matches(['\r', '\n']).split('\t').collect()
}

fn parse_block(block: &[(usize, &str)]) -> Result<Timespan, TimespanError> {
    let (_, header) = block[0];
    let mut header = split_fields(header).into_iter().map(str::to_string);
    let name = header.next().unwrap_or_default();
    let columns: Vec<String> = header.collect();

    let mut timespan = Timespan {
        name,
        columns,
        eras: Vec::new(),
    };
    if !timespan.is_valid() {
        return Ok(timespan);
    }

    let expected = timespan.columns.len() + 1;
    for &(line, row) in &block[1..] {
        let fields = split_fields(row);
        if fields.len() != expected {
            return Err(TimespanError::RowWidth {
                line,
                expected,
                found: fields.len(),
            });
        }
        let years = fields[1..]
            .iter()
            .map(|field| {
                field.trim().parse::<Year>().map_err(|_| TimespanError::Year {
                    line,
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<Year>, _>>()?;

        let era = match years[..] {
            [start, end] => Era {
                label: fields[0].to_string(),
                start,
                stage_break: None,
                end,
            },
            [start, stage_break, end] => Era {
                label: fields[0].to_string(),
                start,
                stage_break: Some(stage_break),
                end,
            },
            _ => unreachable!("row width checked against the header"),
        };
        timespan.eras.push(era);
    }
    Ok(timespan)
}
