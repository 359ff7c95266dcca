//! Table Loading and Writing
//!
//! Reads the decision table with Polars and writes scored results back out.
//! The scorer itself never touches files; this module is the glue on either side.
//!
//! Input layout: first column = alternative label, remaining columns = criteria.
//! Output layout: every input column untouched, then score and rank columns.

use crate::error::ScoringError;
use crate::types::{DecisionMatrix, ResultRow};
use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reader/writer settings
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Field delimiter for delimited text input and output
    pub delimiter: u8,
    /// Name of the appended score column
    pub score_column: String,
    /// Name of the appended rank column
    pub rank_column: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            score_column: "Score".to_string(),
            rank_column: "Rank".to_string(),
        }
    }
}

/// Loaded input: original frame plus the validated matrix
#[derive(Debug)]
pub struct DecisionTable {
    /// Input exactly as read (written back unchanged alongside the results)
    pub frame: DataFrame,

    /// Labels + criteria values, validated
    pub matrix: DecisionMatrix,
}

/// Load a decision table from CSV (or any delimited text) or Parquet
///
/// Format is picked by extension: `.parquet` is scanned with Polars' lazy
/// reader, everything else is parsed as delimited text with a header row.
pub fn read_decision_table(path: &Path, options: &TableOptions) -> Result<DecisionTable> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let frame = if has_extension(path, "parquet") {
        load_parquet(path)?
    } else {
        load_delimited(path, options.delimiter)?
    };

    let matrix = decision_matrix_from_frame(&frame)
        .with_context(|| format!("Invalid decision table: {}", path.display()))?;

    info!(
        "Loaded {} alternatives × {} criteria from {}",
        matrix.n_alternatives(),
        matrix.n_criteria(),
        path.display()
    );

    Ok(DecisionTable { frame, matrix })
}

fn load_parquet(path: &Path) -> Result<DataFrame> {
    LazyFrame::scan_parquet(path, Default::default())
        .with_context(|| format!("Failed to scan parquet: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to load parquet: {}", path.display()))
}

fn load_delimited(path: &Path, delimiter: u8) -> Result<DataFrame> {
    let parse_options = CsvParseOptions::default()
        .with_separator(delimiter)
        .with_null_values(Some(NullValues::AllColumnsSingle("NA".into())));

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None) // Scan entire file
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to parse CSV: {}", path.display()))
}

/// Build the typed matrix from a loaded frame
///
/// # Errors
/// - `InsufficientColumns` if the frame has fewer than 3 columns
/// - `EmptyMatrix` if the frame has a header but no data rows
/// - `NonNumericCriteria` listing every criteria column that is not an integer or
///   float column, or that has missing cells
/// - Polars errors if the label column cannot be rendered as text
pub fn decision_matrix_from_frame(frame: &DataFrame) -> Result<DecisionMatrix> {
    let columns = frame.get_columns();
    let Some((label_column, criteria_columns)) = columns.split_first() else {
        return Err(ScoringError::InsufficientColumns { found: 0 }.into());
    };
    if criteria_columns.len() < 2 {
        return Err(ScoringError::InsufficientColumns { found: criteria_columns.len() }.into());
    }
    // Header-only files infer text dtypes, so this must precede the dtype check
    if frame.height() == 0 {
        return Err(ScoringError::EmptyMatrix.into());
    }

    let labels_text = label_column
        .cast(&DataType::String)
        .with_context(|| format!("Label column '{}' cannot be read as text", label_column.name()))?;
    let labels: Vec<String> = labels_text
        .str()?
        .into_iter()
        .map(|opt| opt.unwrap_or_default().to_string())
        .collect();

    // Explicit schema: integer/float dtype and no missing cells
    let mut offending = Vec::new();
    let mut criteria_values: Vec<Vec<f64>> = Vec::with_capacity(criteria_columns.len());
    for column in criteria_columns {
        if !is_numeric_dtype(column.dtype()) || column.null_count() > 0 {
            offending.push(column.name().to_string());
            continue;
        }
        let floats = column.cast(&DataType::Float64)?;
        let values: Vec<f64> = floats
            .f64()?
            .into_iter()
            .map(|opt| opt.unwrap_or(f64::NAN))
            .collect();
        criteria_values.push(values);
    }

    if !offending.is_empty() {
        return Err(ScoringError::NonNumericCriteria(offending).into());
    }

    let criteria: Vec<String> = criteria_columns
        .iter()
        .map(|column| column.name().to_string())
        .collect();

    let rows: Vec<(String, Vec<f64>)> = labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let values = criteria_values.iter().map(|column| column[i]).collect();
            (label, values)
        })
        .collect();

    Ok(DecisionMatrix::new(criteria, rows)?)
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Write scored results
///
/// `.json` destinations receive the result rows as a JSON array; anything else
/// gets the original table plus score and rank columns as delimited text.
///
/// The file is written to a hidden sibling first and renamed into place, so a
/// failed write never leaves a truncated or half-updated destination.
pub fn write_results(
    table: &DecisionTable,
    rows: &[ResultRow],
    path: &Path,
    options: &TableOptions,
) -> Result<()> {
    if rows.len() != table.frame.height() {
        anyhow::bail!(
            "Result has {} rows but the input table has {}",
            rows.len(),
            table.frame.height()
        );
    }

    let staging = staging_path(path)?;
    let written = if has_extension(path, "json") {
        write_json(rows, &staging)
    } else {
        write_delimited(&table.frame, rows, &staging, options)
    };

    if let Err(err) = written {
        let _ = fs::remove_file(&staging);
        return Err(err);
    }

    if let Err(err) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(err)
            .with_context(|| format!("Failed to move results into place: {}", path.display()));
    }
    debug!("Wrote {} result rows to {}", rows.len(), path.display());

    Ok(())
}

fn write_delimited(
    frame: &DataFrame,
    rows: &[ResultRow],
    path: &Path,
    options: &TableOptions,
) -> Result<()> {
    check_output_columns(frame, options)?;

    let scores: Vec<f64> = rows.iter().map(|row| row.score).collect();
    let ranks: Vec<u32> = rows.iter().map(|row| row.rank).collect();

    let mut output = frame.clone();
    output
        .with_column(Series::new(options.score_column.as_str().into(), scores))
        .with_context(|| format!("Failed to append column '{}'", options.score_column))?;
    output
        .with_column(Series::new(options.rank_column.as_str().into(), ranks))
        .with_context(|| format!("Failed to append column '{}'", options.rank_column))?;

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(options.delimiter)
        .finish(&mut output)
        .with_context(|| format!("Failed to write CSV: {}", path.display()))?;

    Ok(())
}

/// Appended columns must not clobber an input column or each other
fn check_output_columns(frame: &DataFrame, options: &TableOptions) -> Result<()> {
    if options.score_column == options.rank_column {
        anyhow::bail!(
            "Score and rank columns must have different names, both are '{}'",
            options.score_column
        );
    }

    let existing = frame.get_column_names();
    for name in [&options.score_column, &options.rank_column] {
        if existing.iter().any(|column| column.as_str() == name.as_str()) {
            anyhow::bail!("Input table already has a column named '{}'", name);
        }
    }

    Ok(())
}

fn write_json(rows: &[ResultRow], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, rows)
        .with_context(|| "Failed to serialize results JSON")?;
    writer
        .flush()
        .with_context(|| format!("Failed to write JSON: {}", path.display()))?;
    Ok(())
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow::anyhow!("Output path has no file name: {}", path.display()))?;
    Ok(path.with_file_name(format!(".{}.tmp", file_name)))
}

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
}
