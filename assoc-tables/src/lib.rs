pub mod canon;
pub mod collect;
pub mod config;
pub mod emit;
pub mod error;
pub mod halide;
pub mod order;
pub mod record;
pub mod table;

use log::info;
use std::fmt;
use std::fs;

use collect::Collection;
use config::GenConfig;
use error::{GenError, Result};
use table::{Arity, OrderedTable};

/// Counters for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Report {
    pub total: usize,
    pub unique: usize,
    pub right: usize,
    pub unknown: usize,
}

impl Report {
    fn new(collection: &Collection) -> Self {
        Self {
            total: collection.total,
            unique: collection.unique(),
            right: collection.right,
            unknown: collection.unknown,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total exprs: {}", self.total)?;
        writeln!(f, "Unique exprs: {}", self.unique)?;
        writeln!(f, "Right-associativity exprs: {}", self.right)?;
        write!(f, "UNKNOWN-associativity exprs: {}", self.unknown)
    }
}

/// Builds the tables from proof log lines. The double family is left
/// empty: the log only carries single-operator proofs.
pub fn build_table<I, S>(lines: I) -> Result<(OrderedTable, Report)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut collection = Collection::new();
    collection.add_lines(lines);
    let ordered = order::order(&collection)?;
    let report = Report::new(&collection);

    for summary in report.to_string().lines() {
        info!("{}", summary);
    }
    for rec in ordered.iter().take(10) {
        info!("({}, {})", rec.record.expression, rec.record.identity);
    }

    Ok((table::partition(&ordered, Arity::Single), report))
}

/// Generated header and source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub header: String,
    pub source: String,
}

pub fn render(table: &OrderedTable) -> Rendered {
    Rendered {
        header: emit::render_header(),
        source: emit::render_source(table),
    }
}

/// Reads the proof log and writes both generated files. Nothing is
/// written unless the whole log was processed.
pub fn run(config: &GenConfig) -> Result<Report> {
    let input = config.input_path();
    info!("Reading {}", input.display());
    let log = fs::read_to_string(&input).map_err(|e| GenError::io(&input, e))?;
    let (table, report) = build_table(log.lines())?;
    let rendered = render(&table);

    let header_path = config.header_path();
    fs::write(&header_path, rendered.header).map_err(|e| GenError::io(&header_path, e))?;
    let source_path = config.source_path();
    fs::write(&source_path, rendered.source).map_err(|e| GenError::io(&source_path, e))?;
    info!(
        "Wrote {} and {}",
        header_path.display(),
        source_path.display()
    );
    Ok(report)
}
